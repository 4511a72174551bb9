//! Per-height ledger of the rewards routed to BTC staking.
//!
//! Entries are keyed by the big-endian block height, so a range read walks them in height
//! order. The module only appends to it.

use cosmwasm_std::{Coin, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use crate::error::BabylonError;

pub(crate) const BTC_STAKING_GAUGE: Map<u64, Vec<Coin>> = Map::new("staking_gauge");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// A coin set is valid if it is non-empty, sorted by denom without duplicates, and every
/// coin has a valid denom and a positive amount
pub fn validate_coins(coins: &[Coin]) -> Result<(), BabylonError> {
    if coins.is_empty() {
        return Err(BabylonError::InvalidRequest(
            "coin set must not be empty".to_string(),
        ));
    }
    for coin in coins {
        validate_denom(&coin.denom)?;
        if coin.amount.is_zero() {
            return Err(BabylonError::InvalidRequest(format!(
                "coin {} has a zero amount",
                coin.denom
            )));
        }
    }
    if coins.windows(2).any(|pair| pair[0].denom >= pair[1].denom) {
        return Err(BabylonError::InvalidRequest(
            "coin set must be sorted by denom without duplicates".to_string(),
        ));
    }
    Ok(())
}

fn validate_denom(denom: &str) -> Result<(), BabylonError> {
    let mut chars = denom.chars();
    let valid = (3..=128).contains(&denom.len())
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'));
    if !valid {
        return Err(BabylonError::InvalidRequest(format!(
            "invalid denom: {denom}"
        )));
    }
    Ok(())
}

/// Records the rewards routed to BTC staking at the given height
pub fn set_btc_staking_gauge(
    storage: &mut dyn Storage,
    height: u64,
    coins: &[Coin],
) -> Result<(), BabylonError> {
    validate_coins(coins)?;
    BTC_STAKING_GAUGE.save(storage, height, &coins.to_vec())?;
    Ok(())
}

pub fn get_btc_staking_gauge(storage: &dyn Storage, height: u64) -> StdResult<Option<Vec<Coin>>> {
    BTC_STAKING_GAUGE.may_load(storage, height)
}

/// Gauges in ascending height order, starting after the given height
pub fn btc_staking_gauges(
    storage: &dyn Storage,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<(u64, Vec<Coin>)>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);
    BTC_STAKING_GAUGE
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}
