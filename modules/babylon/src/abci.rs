//! BeginBlocker and EndBlocker of the module.
//!
//! Runtime failures of the fee interception and of the sudo callbacks are absorbed: they are
//! logged and turned into events, and the block goes on. A misbehaving contract must not be
//! able to halt the consumer chain.

use cosmwasm_std::Event;
use tracing::warn;

use crate::error::BabylonError;
use crate::host::Context;
use crate::keeper::Keeper;
use crate::sudo::Phase;

pub const EVENT_FEE_COLLECTOR_ERROR: &str = "fee_collector_error";
pub const EVENT_CONTRACT_COMMUNICATION_ERROR: &str = "contract_communication_error";

/// Validator set change requested by the module. The module never requests any
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorUpdate {
    pub pub_key: Vec<u8>,
    pub power: i64,
}

/// Outcome of a lifecycle hook
#[derive(Clone, Debug, PartialEq, Default)]
pub struct BlockResponse {
    pub events: Vec<Event>,
    pub validator_updates: Vec<ValidatorUpdate>,
}

fn fee_collector_error(err: &BabylonError, height: u64) -> Event {
    Event::new(EVENT_FEE_COLLECTOR_ERROR)
        .add_attribute("error", err.to_string())
        .add_attribute("height", height.to_string())
}

fn contract_communication_error(err: &BabylonError, height: u64, phase: Phase) -> Event {
    Event::new(EVENT_CONTRACT_COMMUNICATION_ERROR)
        .add_attribute("error", err.to_string())
        .add_attribute("height", height.to_string())
        .add_attribute("phase", phase.to_string())
}

impl Keeper {
    pub fn begin_blocker(&self, ctx: &mut Context) -> BlockResponse {
        let height = ctx.height();
        let mut res = BlockResponse::default();

        if height > 0 {
            match self.handle_coins_in_fee_collector(ctx) {
                Ok(Some(event)) => res.events.push(event),
                Ok(None) => {}
                Err(err) => {
                    warn!(height, error = %err, "failed to intercept the fee collector");
                    res.events.push(fee_collector_error(&err, height));
                }
            }
        }

        if let Err(err) = self.begin_block_sudo(ctx) {
            warn!(height, error = %err, "BeginBlock sudo failed");
            res.events
                .push(contract_communication_error(&err, height, Phase::BeginBlock));
        }

        res
    }

    pub fn end_blocker(&self, ctx: &mut Context) -> BlockResponse {
        let height = ctx.height();
        let mut res = BlockResponse::default();

        if let Err(err) = self.end_block_sudo(ctx) {
            warn!(height, error = %err, "EndBlock sudo failed");
            res.events
                .push(contract_communication_error(&err, height, Phase::EndBlock));
        }

        res
    }
}
