//! Per-block sudo callbacks to the BTC staking and BTC finality contracts.

use std::fmt;

use babylon_bindings::BabylonSudoMsg;
use cosmwasm_std::to_json_vec;
use tracing::{debug, info, warn};

use crate::error::BabylonError;
use crate::host::Context;
use crate::keeper::Keeper;
use crate::state::bsn_contracts::get_bsn_contracts;
use crate::state::params::get_params;

/// Lifecycle hook a sudo callback is delivered in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    BeginBlock,
    EndBlock,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::BeginBlock => f.write_str("BeginBlock"),
            Phase::EndBlock => f.write_str("EndBlock"),
        }
    }
}

impl Phase {
    fn sudo_msg(self, ctx: &Context) -> BabylonSudoMsg {
        let hash_hex = ctx.header.hash_hex();
        let app_hash_hex = ctx.header.app_hash_hex();
        match self {
            Phase::BeginBlock => BabylonSudoMsg::BeginBlock {
                hash_hex,
                app_hash_hex,
            },
            Phase::EndBlock => BabylonSudoMsg::EndBlock {
                hash_hex,
                app_hash_hex,
            },
        }
    }
}

impl Keeper {
    /// Delivers the BeginBlock callback to the BTC staking contract, then to the BTC finality
    /// contract. A failing staking callback prevents the finality one.
    pub fn begin_block_sudo(&self, ctx: &mut Context) -> Result<(), BabylonError> {
        let Some(contracts) = get_bsn_contracts(ctx.storage)? else {
            info!(height = ctx.height(), "BSN contracts are not set, skipping BeginBlock sudo");
            return Ok(());
        };
        let msg = Phase::BeginBlock.sudo_msg(ctx);
        self.sudo_contract(ctx, "btc_staking", &contracts.btc_staking_contract, &msg)?;
        self.sudo_contract(ctx, "btc_finality", &contracts.btc_finality_contract, &msg)
    }

    /// Delivers the EndBlock callback to the BTC finality contract
    pub fn end_block_sudo(&self, ctx: &mut Context) -> Result<(), BabylonError> {
        let Some(contracts) = get_bsn_contracts(ctx.storage)? else {
            info!(height = ctx.height(), "BSN contracts are not set, skipping EndBlock sudo");
            return Ok(());
        };
        let msg = Phase::EndBlock.sudo_msg(ctx);
        self.sudo_contract(ctx, "btc_finality", &contracts.btc_finality_contract, &msg)
    }

    /// Calls the contract at `addr` with `msg`, bounded by the params' gas limit. Unset,
    /// malformed or unknown addresses are skipped, so that a misconfigured registry cannot
    /// stop block production.
    fn sudo_contract(
        &self,
        ctx: &mut Context,
        name: &str,
        addr: &str,
        msg: &BabylonSudoMsg,
    ) -> Result<(), BabylonError> {
        let height = ctx.height();
        if addr.is_empty() {
            info!(height, contract = name, "contract is not set, skipping sudo");
            return Ok(());
        }
        let contract = match ctx.api.addr_validate(addr) {
            Ok(contract) => contract,
            Err(err) => {
                warn!(height, contract = name, %addr, error = %err, "malformed contract address, skipping sudo");
                return Ok(());
            }
        };
        if ctx.wasm.contract_info(&contract).is_none() {
            info!(height, contract = name, %addr, "contract does not exist, skipping sudo");
            return Ok(());
        }

        let gas_limit = u64::from(get_params(ctx.storage).max_gas_begin_blocker);
        let payload = to_json_vec(msg)?;
        ctx.wasm
            .sudo(&contract, &payload, gas_limit)
            .map_err(|err| BabylonError::ContractCallFailure(format!("{name}: {err}")))?;
        debug!(height, contract = name, gas_limit, "sudo call delivered");
        Ok(())
    }
}
