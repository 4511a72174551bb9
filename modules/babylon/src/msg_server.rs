use cosmwasm_std::{to_json_binary, Event, Response};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::BabylonError;
use crate::host::Context;
use crate::keeper::Keeper;
use crate::msg::{
    ModuleMsg, Msg, MsgInstantiateBabylonContracts, MsgSetBsnContracts, MsgUpdateParams,
};
use crate::state::bsn_contracts::set_bsn_contracts;
use crate::state::params::set_params;

/// Data returned by a successful `MsgInstantiateBabylonContracts`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct InstantiateBabylonContractsResponse {
    pub babylon_contract: String,
    pub btc_light_client_contract: String,
    pub btc_staking_contract: String,
    pub btc_finality_contract: String,
}

impl Keeper {
    /// Routes a governance message. A failing message returns an error and the host transaction
    /// rolls back whatever it already wrote, including contracts instantiated through the VM.
    pub fn handle_msg(&self, ctx: &mut Context, msg: Msg) -> Result<Response, BabylonError> {
        match msg {
            Msg::SetBsnContracts(msg) => self.set_bsn_contracts(ctx, msg),
            Msg::UpdateParams(msg) => self.update_params(ctx, msg),
            Msg::InstantiateBabylonContracts(msg) => self.handle_instantiate(ctx, msg),
        }
    }

    pub fn set_bsn_contracts(
        &self,
        ctx: &mut Context,
        msg: MsgSetBsnContracts,
    ) -> Result<Response, BabylonError> {
        self.ensure_authority(msg.signer())?;
        let contracts = msg
            .contracts
            .ok_or_else(|| BabylonError::InvalidRequest("contracts must be set".to_string()))?;
        set_bsn_contracts(ctx.storage, ctx.api, &contracts)?;

        Ok(Response::new()
            .add_attribute("action", "set_bsn_contracts")
            .add_attribute("authority", msg.authority))
    }

    pub fn update_params(
        &self,
        ctx: &mut Context,
        msg: MsgUpdateParams,
    ) -> Result<Response, BabylonError> {
        self.ensure_authority(msg.signer())?;
        set_params(ctx.storage, &msg.params)?;

        Ok(Response::new()
            .add_attribute("action", "update_params")
            .add_attribute("authority", msg.authority))
    }

    fn handle_instantiate(
        &self,
        ctx: &mut Context,
        msg: MsgInstantiateBabylonContracts,
    ) -> Result<Response, BabylonError> {
        self.ensure_authority(msg.signer())?;
        msg.validate_basic(ctx.api)?;
        let contracts = self.instantiate_babylon_contracts(ctx, &msg)?;

        let data = InstantiateBabylonContractsResponse {
            babylon_contract: contracts.babylon_contract.clone(),
            btc_light_client_contract: contracts.btc_light_client_contract.clone(),
            btc_staking_contract: contracts.btc_staking_contract.clone(),
            btc_finality_contract: contracts.btc_finality_contract.clone(),
        };
        let event = Event::new("instantiate_babylon_contracts")
            .add_attribute("babylon_contract", contracts.babylon_contract)
            .add_attribute("btc_light_client_contract", contracts.btc_light_client_contract)
            .add_attribute("btc_staking_contract", contracts.btc_staking_contract)
            .add_attribute("btc_finality_contract", contracts.btc_finality_contract);
        Ok(Response::new()
            .add_attribute("action", "instantiate_babylon_contracts")
            .add_attribute("authority", msg.signer)
            .add_event(event)
            .set_data(to_json_binary(&data)?))
    }
}
