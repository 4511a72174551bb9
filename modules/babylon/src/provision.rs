//! One-shot provisioning of the BSN contracts.
//!
//! The Babylon contract references its three siblings, and they reference it back. The
//! module only instantiates the Babylon contract, which instantiates the others, and then
//! discovers their addresses by querying the Babylon contract's config.

use babylon_bindings::contract::CONFIG_QUERY;
use babylon_bindings::{BabylonContractConfig, BabylonInstantiateMsg};
use cosmwasm_std::{from_json, to_json_vec, Addr};
use tracing::info;

use crate::error::BabylonError;
use crate::host::Context;
use crate::keeper::Keeper;
use crate::msg::MsgInstantiateBabylonContracts;
use crate::state::bsn_contracts::{set_bsn_contracts, BsnContracts};

pub const BABYLON_CONTRACT_LABEL: &str = "Babylon";

impl MsgInstantiateBabylonContracts {
    /// The instantiation message of the Babylon contract
    pub fn babylon_init_msg(&self) -> BabylonInstantiateMsg {
        BabylonInstantiateMsg {
            network: self.network.clone(),
            babylon_tag: self.babylon_tag.clone(),
            btc_confirmation_depth: self.btc_confirmation_depth,
            checkpoint_finalization_timeout: self.checkpoint_finalization_timeout,
            notify_cosmos_zone: self.notify_cosmos_zone,
            btc_light_client_code_id: self.btc_light_client_contract_code_id,
            btc_light_client_msg: self.btc_light_client_msg.clone(),
            btc_staking_code_id: self.btc_staking_contract_code_id,
            btc_staking_msg: self.btc_staking_msg.clone(),
            btc_finality_code_id: self.btc_finality_contract_code_id,
            btc_finality_msg: self.btc_finality_msg.clone(),
            consumer_name: self.consumer_name.clone(),
            consumer_description: self.consumer_description.clone(),
            admin: (!self.admin.is_empty()).then(|| self.admin.clone()),
        }
    }
}

fn required_child(name: &str, addr: Option<String>) -> Result<String, BabylonError> {
    match addr {
        Some(addr) if !addr.is_empty() => Ok(addr),
        _ => Err(BabylonError::Invalid(format!(
            "{name} contract address is empty"
        ))),
    }
}

impl Keeper {
    /// Instantiates the Babylon contract with the authority as creator and admin, reads the
    /// addresses of the contracts it instantiated, and stores the four of them.
    ///
    /// Calling it again instantiates a new set of contracts and replaces the registry.
    pub fn instantiate_babylon_contracts(
        &self,
        ctx: &mut Context,
        msg: &MsgInstantiateBabylonContracts,
    ) -> Result<BsnContracts, BabylonError> {
        self.ensure_authority(&msg.signer)?;

        let init_msg = to_json_vec(&msg.babylon_init_msg())?;
        let authority = self.authority().clone();
        let babylon = ctx
            .wasm
            .instantiate(
                msg.babylon_contract_code_id,
                &authority,
                Some(&authority),
                &init_msg,
                BABYLON_CONTRACT_LABEL,
            )
            .map_err(|err| BabylonError::ContractCallFailure(err.to_string()))?;

        let config = self.query_babylon_config(ctx, &babylon)?;
        let contracts = BsnContracts {
            babylon_contract: babylon.to_string(),
            btc_light_client_contract: required_child("BTC light client", config.btc_light_client)?,
            btc_staking_contract: required_child("BTC staking", config.btc_staking)?,
            btc_finality_contract: required_child("BTC finality", config.btc_finality)?,
        };
        set_bsn_contracts(ctx.storage, ctx.api, &contracts)?;

        info!(
            height = ctx.height(),
            babylon = %contracts.babylon_contract,
            btc_light_client = %contracts.btc_light_client_contract,
            btc_staking = %contracts.btc_staking_contract,
            btc_finality = %contracts.btc_finality_contract,
            "instantiated BSN contracts"
        );
        Ok(contracts)
    }

    fn query_babylon_config(
        &self,
        ctx: &Context,
        babylon: &Addr,
    ) -> Result<BabylonContractConfig, BabylonError> {
        let res = ctx
            .wasm
            .query_smart(babylon, CONFIG_QUERY)
            .map_err(|err| BabylonError::ContractCallFailure(err.to_string()))?;
        Ok(from_json(res)?)
    }
}
