//! msg is the module that includes custom messages that the BSN contracts
//! can send to the consumer chain's Babylon module. The messages include:
//! - FinalizedHeader: reporting a BTC-finalised header
//! - MintRewards: minting block rewards for the finality providers

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, CosmosMsg};

/// BabylonMsg is the message that the BSN contracts can send to the consumer chain.
/// The consumer chain has to compose the Babylon module's message handlers in front of
/// the VM dispatcher for handling these messages
#[cw_serde]
pub enum BabylonMsg {
    /// FinalizedHeader reports a BTC-finalised header
    /// can be used for many use cases, notably unbonding mature validators/delegations till this header
    FinalizedHeader {
        height: i64,
        time: i64, // NOTE: UNIX timestamp is in i64
    },
    /// MintRewards mints the requested block rewards for the finality providers.
    /// It can only be sent from the finality contract.
    /// The rewards are minted to the module account and forwarded to `recipient`
    MintRewards { amount: Coin, recipient: String },
}

// make BabylonMsg to implement CosmosMsg::CustomMsg
impl cosmwasm_std::CustomMsg for BabylonMsg {}

impl From<BabylonMsg> for CosmosMsg<BabylonMsg> {
    fn from(original: BabylonMsg) -> Self {
        CosmosMsg::Custom(original)
    }
}
