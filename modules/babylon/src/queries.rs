use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Binary, Coin, Storage};

use crate::error::BabylonError;
use crate::state::bsn_contracts::{get_bsn_contracts, BsnContracts};
use crate::state::gauge::{btc_staking_gauges, get_btc_staking_gauge};
use crate::state::params::{get_params, Params};

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// `Params` returns the current params of the module
    #[returns(ParamsResponse)]
    Params {},
    /// `BsnContracts` returns the registry of the BSN contracts, if it was ever set
    #[returns(BsnContractsResponse)]
    BsnContracts {},
    /// `BtcStakingGauge` returns the rewards routed to BTC staking at the given height
    #[returns(BtcStakingGaugeResponse)]
    BtcStakingGauge { height: u64 },
    /// `BtcStakingGauges` returns the gauges in ascending height order.
    ///
    /// `start_after` is the height to start after, or `None` to start from the first one.
    /// `limit` is the maximum number of gauges to return
    #[returns(BtcStakingGaugesResponse)]
    BtcStakingGauges {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ParamsResponse {
    pub params: Params,
}

#[cw_serde]
pub struct BsnContractsResponse {
    pub bsn_contracts: Option<BsnContracts>,
}

#[cw_serde]
pub struct BtcStakingGaugeResponse {
    pub coins: Option<Vec<Coin>>,
}

#[cw_serde]
pub struct GaugeEntry {
    pub height: u64,
    pub coins: Vec<Coin>,
}

#[cw_serde]
pub struct BtcStakingGaugesResponse {
    pub gauges: Vec<GaugeEntry>,
}

pub fn query(storage: &dyn Storage, msg: QueryMsg) -> Result<Binary, BabylonError> {
    match msg {
        QueryMsg::Params {} => Ok(to_json_binary(&params(storage))?),
        QueryMsg::BsnContracts {} => Ok(to_json_binary(&bsn_contracts(storage)?)?),
        QueryMsg::BtcStakingGauge { height } => {
            Ok(to_json_binary(&btc_staking_gauge(storage, height)?)?)
        }
        QueryMsg::BtcStakingGauges { start_after, limit } => Ok(to_json_binary(
            &btc_staking_gauge_range(storage, start_after, limit)?,
        )?),
    }
}

pub fn params(storage: &dyn Storage) -> ParamsResponse {
    ParamsResponse {
        params: get_params(storage),
    }
}

pub fn bsn_contracts(storage: &dyn Storage) -> Result<BsnContractsResponse, BabylonError> {
    Ok(BsnContractsResponse {
        bsn_contracts: get_bsn_contracts(storage)?,
    })
}

pub fn btc_staking_gauge(
    storage: &dyn Storage,
    height: u64,
) -> Result<BtcStakingGaugeResponse, BabylonError> {
    Ok(BtcStakingGaugeResponse {
        coins: get_btc_staking_gauge(storage, height)?,
    })
}

pub fn btc_staking_gauge_range(
    storage: &dyn Storage,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> Result<BtcStakingGaugesResponse, BabylonError> {
    let gauges = btc_staking_gauges(storage, start_after, limit)?
        .into_iter()
        .map(|(height, coins)| GaugeEntry { height, coins })
        .collect();
    Ok(BtcStakingGaugesResponse { gauges })
}
