use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BabylonError {
    #[error("{0}")]
    StdError(#[from] StdError),
    #[error("Unauthorized: expected {expected}, got {actual}")]
    Unauthorized { expected: String, actual: String },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Misconfigured: {0}")]
    Misconfigured(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
    #[error("Invalid: {0}")]
    Invalid(String),
    #[error("Contract call failed: {0}")]
    ContractCallFailure(String),
    #[error("{0}")]
    Bank(String),
    /// Returned by a message handler that does not handle the given message, so that the
    /// next handler in the chain gets a chance
    #[error("Unknown message")]
    UnknownMsg,
}

impl BabylonError {
    pub fn unauthorized(expected: impl ToString, actual: impl ToString) -> Self {
        Self::Unauthorized {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn invalid_address(address: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}
