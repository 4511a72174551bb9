use cosmwasm_std::{Addr, Binary, Storage};

use crate::error::BabylonError;
use crate::queries::{self, QueryMsg};
use crate::state::bsn_contracts::{get_bsn_contracts, BsnContracts};
use crate::state::params::{get_params, Params};

/// Name of the module, and of its module account
pub const MODULE_NAME: &str = "babylon";
/// Name of the host's module account collecting the transaction fees
pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

/// Keeper is the entrypoint of the module. It only holds the immutable wiring decided when
/// the host application is assembled; all state lives in the store of the [`Context`].
///
/// [`Context`]: crate::host::Context
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keeper {
    /// Account allowed to change params and the contract registry, and to instantiate the
    /// contracts. Usually the governance module account
    authority: Addr,
    /// Module account the fees are intercepted from
    fee_collector: String,
}

impl Keeper {
    pub fn new(authority: Addr) -> Self {
        Keeper {
            authority,
            fee_collector: FEE_COLLECTOR_NAME.to_string(),
        }
    }

    pub fn with_fee_collector(mut self, module: impl Into<String>) -> Self {
        self.fee_collector = module.into();
        self
    }

    pub fn authority(&self) -> &Addr {
        &self.authority
    }

    pub fn fee_collector(&self) -> &str {
        &self.fee_collector
    }

    pub(crate) fn ensure_authority(&self, signer: &str) -> Result<(), BabylonError> {
        if signer != self.authority.as_str() {
            return Err(BabylonError::unauthorized(&self.authority, signer));
        }
        Ok(())
    }

    pub fn params(&self, storage: &dyn Storage) -> Params {
        get_params(storage)
    }

    pub fn bsn_contracts(&self, storage: &dyn Storage) -> Result<Option<BsnContracts>, BabylonError> {
        Ok(get_bsn_contracts(storage)?)
    }

    /// Answers the module's query endpoints
    pub fn query(&self, storage: &dyn Storage, msg: QueryMsg) -> Result<Binary, BabylonError> {
        queries::query(storage, msg)
    }
}
