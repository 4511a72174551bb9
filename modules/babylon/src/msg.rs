//! Governance messages of the module.
//!
//! Messages travel in the legacy amino JSON envelope, tagged with their wire-stable names
//! (`{"type": "babylon/MsgUpdateParams", "value": {...}}`).

use cosmwasm_std::{Api, Binary};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::BabylonError;
use crate::state::bsn_contracts::BsnContracts;
use crate::state::params::Params;

/// Hex length of the tag identifying the Babylon network
const BABYLON_TAG_HEX_LEN: usize = 8;
/// BTC networks the BTC light client contract understands
const BTC_NETWORKS: [&str; 4] = ["mainnet", "testnet", "signet", "regtest"];

/// Wire identification of a module message
pub trait ModuleMsg {
    /// Type URL of the message in the host's message router
    const TYPE_URL: &'static str;
    /// Name of the message in the amino JSON envelope
    const AMINO_NAME: &'static str;

    /// The account that must have signed the message
    fn signer(&self) -> &str;

    /// Stateless validation of the message
    fn validate_basic(&self, api: &dyn Api) -> Result<(), BabylonError>;
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(tag = "type", content = "value")]
pub enum Msg {
    #[serde(rename = "babylon/MsgSetBSNContracts")]
    SetBsnContracts(MsgSetBsnContracts),
    #[serde(rename = "babylon/MsgUpdateParams")]
    UpdateParams(MsgUpdateParams),
    #[serde(rename = "babylon/MsgInstantiateBabylonContracts")]
    InstantiateBabylonContracts(MsgInstantiateBabylonContracts),
}

impl Msg {
    pub fn type_url(&self) -> &'static str {
        match self {
            Msg::SetBsnContracts(_) => MsgSetBsnContracts::TYPE_URL,
            Msg::UpdateParams(_) => MsgUpdateParams::TYPE_URL,
            Msg::InstantiateBabylonContracts(_) => MsgInstantiateBabylonContracts::TYPE_URL,
        }
    }
}

fn validate_signer(api: &dyn Api, signer: &str) -> Result<(), BabylonError> {
    api.addr_validate(signer)
        .map(|_| ())
        .map_err(|err| BabylonError::invalid_address(signer, err))
}

/// MsgSetBsnContracts replaces the registry of the BSN contracts
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct MsgSetBsnContracts {
    pub authority: String,
    pub contracts: Option<BsnContracts>,
}

impl ModuleMsg for MsgSetBsnContracts {
    const TYPE_URL: &'static str = "/babylonlabs.babylon.v1beta1.MsgSetBSNContracts";
    const AMINO_NAME: &'static str = "babylon/MsgSetBSNContracts";

    fn signer(&self) -> &str {
        &self.authority
    }

    fn validate_basic(&self, api: &dyn Api) -> Result<(), BabylonError> {
        validate_signer(api, &self.authority)?;
        self.contracts
            .as_ref()
            .ok_or_else(|| BabylonError::InvalidRequest("contracts must be set".to_string()))?
            .validate(api)
    }
}

/// MsgUpdateParams replaces the module params
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct MsgUpdateParams {
    pub authority: String,
    pub params: Params,
}

impl ModuleMsg for MsgUpdateParams {
    const TYPE_URL: &'static str = "/babylonlabs.babylon.v1beta1.MsgUpdateParams";
    const AMINO_NAME: &'static str = "babylon/MsgUpdateParams";

    fn signer(&self) -> &str {
        &self.authority
    }

    fn validate_basic(&self, api: &dyn Api) -> Result<(), BabylonError> {
        validate_signer(api, &self.authority)?;
        self.params.validate()
    }
}

/// MsgInstantiateBabylonContracts instantiates the Babylon contract, which in turn
/// instantiates the BTC light client, BTC staking and BTC finality contracts
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct MsgInstantiateBabylonContracts {
    pub signer: String,
    pub babylon_contract_code_id: u64,
    pub btc_light_client_contract_code_id: u64,
    pub btc_staking_contract_code_id: u64,
    pub btc_finality_contract_code_id: u64,
    /// BTC network the light client follows (mainnet, testnet, signet or regtest)
    pub network: String,
    /// Hex encoding of the four bytes tagging the Babylon network
    pub babylon_tag: String,
    pub btc_confirmation_depth: u32,
    pub checkpoint_finalization_timeout: u32,
    pub notify_cosmos_zone: bool,
    /// Instantiation messages of the child contracts, passed verbatim
    pub btc_light_client_msg: Binary,
    pub btc_staking_msg: Binary,
    pub btc_finality_msg: Binary,
    pub consumer_name: String,
    pub consumer_description: String,
    /// Migration admin of the child contracts. Empty for none
    #[serde(default)]
    pub admin: String,
}

impl ModuleMsg for MsgInstantiateBabylonContracts {
    const TYPE_URL: &'static str = "/babylonlabs.babylon.v1beta1.MsgInstantiateBabylonContracts";
    const AMINO_NAME: &'static str = "babylon/MsgInstantiateBabylonContracts";

    fn signer(&self) -> &str {
        &self.signer
    }

    fn validate_basic(&self, api: &dyn Api) -> Result<(), BabylonError> {
        validate_signer(api, &self.signer)?;

        for (name, code_id) in [
            ("babylon_contract_code_id", self.babylon_contract_code_id),
            (
                "btc_light_client_contract_code_id",
                self.btc_light_client_contract_code_id,
            ),
            ("btc_staking_contract_code_id", self.btc_staking_contract_code_id),
            (
                "btc_finality_contract_code_id",
                self.btc_finality_contract_code_id,
            ),
        ] {
            if code_id == 0 {
                return Err(BabylonError::InvalidRequest(format!(
                    "{name} must be positive"
                )));
            }
        }

        if !BTC_NETWORKS.contains(&self.network.as_str()) {
            return Err(BabylonError::InvalidRequest(format!(
                "unknown BTC network: {}",
                self.network
            )));
        }
        if self.babylon_tag.len() != BABYLON_TAG_HEX_LEN || hex::decode(&self.babylon_tag).is_err()
        {
            return Err(BabylonError::InvalidRequest(format!(
                "babylon_tag must be {BABYLON_TAG_HEX_LEN} hex characters, got {}",
                self.babylon_tag
            )));
        }
        if self.btc_confirmation_depth == 0 {
            return Err(BabylonError::InvalidRequest(
                "btc_confirmation_depth must be positive".to_string(),
            ));
        }
        if self.checkpoint_finalization_timeout == 0 {
            return Err(BabylonError::InvalidRequest(
                "checkpoint_finalization_timeout must be positive".to_string(),
            ));
        }

        for (name, init_msg) in [
            ("btc_light_client_msg", &self.btc_light_client_msg),
            ("btc_staking_msg", &self.btc_staking_msg),
            ("btc_finality_msg", &self.btc_finality_msg),
        ] {
            serde_json::from_slice::<serde_json::Value>(init_msg.as_slice()).map_err(|err| {
                BabylonError::InvalidRequest(format!("{name} is not valid JSON: {err}"))
            })?;
        }

        if self.consumer_name.trim().is_empty() {
            return Err(BabylonError::InvalidRequest(
                "consumer_name cannot be empty".to_string(),
            ));
        }
        if self.consumer_description.trim().is_empty() {
            return Err(BabylonError::InvalidRequest(
                "consumer_description cannot be empty".to_string(),
            ));
        }
        if !self.admin.is_empty() {
            api.addr_validate(&self.admin)
                .map_err(|err| BabylonError::invalid_address(&self.admin, err))?;
        }
        Ok(())
    }
}
