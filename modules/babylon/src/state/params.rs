use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal, Storage};
use cw_storage_plus::Item;
use derivative::Derivative;
use tracing::error;

use crate::error::BabylonError;

pub(crate) const PARAMS: Item<Params> = Item::new("params_key");

/// Params are the governance-controlled parameters of the module
#[cw_serde]
#[derive(Derivative)]
#[derivative(Default)]
pub struct Params {
    /// `max_gas_begin_blocker` is the upper bound on the gas a contract sudo callback can
    /// consume
    #[derivative(Default(value = "500_000"))]
    pub max_gas_begin_blocker: u32,
    /// `blocks_per_year` is the number of blocks produced in a year, used for reward rates
    #[derivative(Default(value = "6_311_520"))]
    pub blocks_per_year: u64,
    /// `finality_inflation_rate` is the annual inflation share directed to finality providers
    #[derivative(Default(value = "Decimal::percent(7)"))]
    pub finality_inflation_rate: Decimal,
    /// `btc_staking_portion` is the share of the fees collected each block that is routed to
    /// the BTC finality contract
    #[derivative(Default(value = "Decimal::percent(60)"))]
    pub btc_staking_portion: Decimal,
}

impl Params {
    /// The value observed before any params were ever stored
    pub fn zero() -> Self {
        Params {
            max_gas_begin_blocker: 0,
            blocks_per_year: 0,
            finality_inflation_rate: Decimal::zero(),
            btc_staking_portion: Decimal::zero(),
        }
    }

    pub fn validate(&self) -> Result<(), BabylonError> {
        if self.max_gas_begin_blocker == 0 {
            return Err(BabylonError::InvalidParameter(
                "max_gas_begin_blocker must be positive".to_string(),
            ));
        }
        if self.blocks_per_year == 0 {
            return Err(BabylonError::InvalidParameter(
                "blocks_per_year must be positive".to_string(),
            ));
        }
        // `Decimal` is unsigned, so the inflation rate cannot be negative
        if self.btc_staking_portion > Decimal::one() {
            return Err(BabylonError::InvalidParameter(format!(
                "btc_staking_portion must be within [0, 1], got {}",
                self.btc_staking_portion
            )));
        }
        Ok(())
    }
}

/// Validates and stores the params, replacing the previous ones
pub fn set_params(storage: &mut dyn Storage, params: &Params) -> Result<(), BabylonError> {
    params.validate()?;
    PARAMS.save(storage, params)?;
    Ok(())
}

/// Returns the stored params, or zero params if none have been stored yet
pub fn get_params(storage: &dyn Storage) -> Params {
    match PARAMS.may_load(storage) {
        Ok(Some(params)) => params,
        Ok(None) => Params::zero(),
        Err(err) => {
            error!(error = %err, "failed to decode stored params");
            Params::zero()
        }
    }
}
