use cosmwasm_std::{Api, Storage};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::BabylonError;
use crate::state::bsn_contracts::{get_bsn_contracts, set_bsn_contracts, BsnContracts};
use crate::state::params::{get_params, set_params, Params};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema, Default)]
pub struct GenesisState {
    pub params: Params,
    #[serde(default)]
    pub bsn_contracts: Option<BsnContracts>,
}

impl GenesisState {
    pub fn validate(&self, api: &dyn Api) -> Result<(), BabylonError> {
        self.params.validate()?;
        if let Some(contracts) = &self.bsn_contracts {
            contracts.validate(api)?;
        }
        Ok(())
    }
}

/// Default genesis: default params and no contract registry
pub fn default_genesis() -> GenesisState {
    GenesisState::default()
}

/// Initialises the module's state.
///
/// # Panics
///
/// Panics if the genesis state is invalid: the chain must not start from an incoherent state.
pub fn init_genesis(storage: &mut dyn Storage, api: &dyn Api, genesis: &GenesisState) {
    if let Err(err) = genesis.validate(api) {
        panic!("invalid babylon genesis state: {err}");
    }
    if let Err(err) = set_params(storage, &genesis.params) {
        panic!("failed to store babylon params: {err}");
    }
    if let Some(contracts) = &genesis.bsn_contracts {
        if let Err(err) = set_bsn_contracts(storage, api, contracts) {
            panic!("failed to store babylon contract registry: {err}");
        }
    }
}

pub fn export_genesis(storage: &dyn Storage) -> Result<GenesisState, BabylonError> {
    Ok(GenesisState {
        params: get_params(storage),
        bsn_contracts: get_bsn_contracts(storage)?,
    })
}
