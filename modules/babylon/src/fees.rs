//! Interception of the fee collector.
//!
//! At the start of every block a portion of each balance held by the fee collector is moved
//! to the BTC finality contract, which distributes it to finality providers and their BTC
//! delegators. The remainder is left for the host's distribution pipeline.

use cosmwasm_std::{Coin, Decimal, Event};
use tracing::debug;

use crate::error::BabylonError;
use crate::host::Context;
use crate::keeper::Keeper;
use crate::state::bsn_contracts::get_bsn_contracts;
use crate::state::gauge::{set_btc_staking_gauge, validate_coins};
use crate::state::params::get_params;

/// Portion of each coin routed to BTC staking, sorted by denom. Amounts are truncated, never
/// rounded up, and coins whose portion truncates to zero are dropped
pub fn btc_staking_portion(balances: &[Coin], portion: Decimal) -> Result<Vec<Coin>, BabylonError> {
    let mut share = Vec::with_capacity(balances.len());
    for balance in balances {
        let amount = balance
            .amount
            .checked_mul_floor(portion)
            .map_err(|err| BabylonError::InvalidParameter(err.to_string()))?;
        if !amount.is_zero() {
            share.push(Coin::new(amount, balance.denom.clone()));
        }
    }
    share.sort_by(|a, b| a.denom.cmp(&b.denom));
    Ok(share)
}

impl Keeper {
    /// Moves the BTC staking portion of the fee collector's balances to the BTC finality
    /// contract, and records it in the gauge of the current height.
    ///
    /// Returns the event describing the interception, if anything was moved.
    pub fn handle_coins_in_fee_collector(
        &self,
        ctx: &mut Context,
    ) -> Result<Option<Event>, BabylonError> {
        let height = ctx.height();
        if height == 0 {
            return Ok(None);
        }

        let fee_collector = ctx.bank.module_address(self.fee_collector());
        let balances: Vec<Coin> = ctx
            .bank
            .get_all_balances(&fee_collector)
            .map_err(|err| BabylonError::Bank(err.to_string()))?
            .into_iter()
            .filter(|coin| !coin.amount.is_zero())
            .collect();
        if balances.is_empty() {
            debug!(height, "fee collector is empty");
            return Ok(None);
        }

        let params = get_params(ctx.storage);
        let share = btc_staking_portion(&balances, params.btc_staking_portion)?;

        let finality = get_bsn_contracts(ctx.storage)?
            .ok_or_else(|| BabylonError::Misconfigured("BSN contracts are not set".to_string()))?
            .btc_finality(ctx.api)?
            .ok_or_else(|| {
                BabylonError::Misconfigured("BTC finality contract is not set".to_string())
            })?;

        if share.is_empty() {
            debug!(height, "BTC staking portion of the fees truncates to zero");
            return Ok(None);
        }

        // The gauge entry must be writable before any coin leaves the fee collector
        validate_coins(&share)?;
        ctx.bank
            .send_coins_from_module_to_account(self.fee_collector(), &finality, &share)
            .map_err(|err| BabylonError::Bank(err.to_string()))?;
        set_btc_staking_gauge(ctx.storage, height, &share)?;

        let amount = share
            .iter()
            .map(Coin::to_string)
            .collect::<Vec<_>>()
            .join(",");
        debug!(height, %amount, "intercepted fees for BTC staking");
        Ok(Some(
            Event::new("fee_interception")
                .add_attribute("height", height.to_string())
                .add_attribute("recipient", finality)
                .add_attribute("amount", amount),
        ))
    }
}
