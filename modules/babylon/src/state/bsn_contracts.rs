use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, StdResult, Storage};
use cw_storage_plus::Item;

use crate::error::BabylonError;

pub(crate) const BSN_CONTRACTS: Item<BsnContracts> = Item::new("bsn_contracts_key");

/// BsnContracts is the registry of the four BSN contracts deployed on the consumer chain
#[cw_serde]
#[derive(Default)]
pub struct BsnContracts {
    pub babylon_contract: String,
    pub btc_light_client_contract: String,
    pub btc_staking_contract: String,
    pub btc_finality_contract: String,
}

impl BsnContracts {
    /// All four contracts are registered
    pub fn is_set(&self) -> bool {
        !self.babylon_contract.is_empty()
            && !self.btc_light_client_contract.is_empty()
            && !self.btc_staking_contract.is_empty()
            && !self.btc_finality_contract.is_empty()
    }

    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("babylon_contract", &self.babylon_contract),
            ("btc_light_client_contract", &self.btc_light_client_contract),
            ("btc_staking_contract", &self.btc_staking_contract),
            ("btc_finality_contract", &self.btc_finality_contract),
        ]
    }

    /// Every non-empty address must be a valid account address of the host chain
    pub fn validate(&self, api: &dyn Api) -> Result<(), BabylonError> {
        for (name, addr) in self.fields() {
            if addr.is_empty() {
                continue;
            }
            api.addr_validate(addr)
                .map_err(|err| BabylonError::invalid_address(addr, format!("{name}: {err}")))?;
        }
        Ok(())
    }

    /// Validated address of the BTC finality contract, if registered
    pub fn btc_finality(&self, api: &dyn Api) -> Result<Option<Addr>, BabylonError> {
        validate_optional(api, &self.btc_finality_contract)
    }
}

fn validate_optional(api: &dyn Api, addr: &str) -> Result<Option<Addr>, BabylonError> {
    if addr.is_empty() {
        return Ok(None);
    }
    api.addr_validate(addr)
        .map(Some)
        .map_err(|err| BabylonError::invalid_address(addr, err))
}

/// Validates and stores the full contract registry
pub fn set_bsn_contracts(
    storage: &mut dyn Storage,
    api: &dyn Api,
    contracts: &BsnContracts,
) -> Result<(), BabylonError> {
    contracts.validate(api)?;
    BSN_CONTRACTS.save(storage, contracts)?;
    Ok(())
}

/// Returns the contract registry, or `None` if it was never written
pub fn get_bsn_contracts(storage: &dyn Storage) -> StdResult<Option<BsnContracts>> {
    BSN_CONTRACTS.may_load(storage)
}
