//! Wire types exchanged with the Babylon contract when the module provisions the BSN
//! contracts.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The Babylon contract query used to discover the addresses of its children
pub const CONFIG_QUERY: &[u8] = br#"{"config":{}}"#;

/// BabylonInstantiateMsg is the instantiation message of the Babylon contract.
/// The Babylon contract instantiates the BTC light client, BTC staking and BTC finality
/// contracts from the given code ids, passing them their (opaque) instantiation messages.
#[cw_serde]
pub struct BabylonInstantiateMsg {
    pub network: String,
    /// babylon_tag is a string encoding four bytes used for identification / tagging of the Babylon zone.
    /// NOTE: this is a hex string, not raw bytes
    pub babylon_tag: String,
    pub btc_confirmation_depth: u32,
    pub checkpoint_finalization_timeout: u32,
    /// notify_cosmos_zone indicates whether to send Cosmos zone messages notifying BTC-finalised
    /// headers.
    pub notify_cosmos_zone: bool,
    pub btc_light_client_code_id: u64,
    pub btc_light_client_msg: Binary,
    pub btc_staking_code_id: u64,
    pub btc_staking_msg: Binary,
    pub btc_finality_code_id: u64,
    pub btc_finality_msg: Binary,
    pub consumer_name: String,
    pub consumer_description: String,
    /// If set, this will be the Wasm migration / upgrade admin of the child contracts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
}

/// BabylonContractConfig is the part of the Babylon contract's `Config` the module cares
/// about. Other fields of the config are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default, JsonSchema)]
pub struct BabylonContractConfig {
    #[serde(default)]
    pub btc_light_client: Option<String>,
    #[serde(default)]
    pub btc_staking: Option<String>,
    #[serde(default)]
    pub btc_finality: Option<String>,
}
