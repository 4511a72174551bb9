//! Handlers for the messages contracts dispatch to the host.
//!
//! Each handler either handles a message or returns [`BabylonError::UnknownMsg`], so that the
//! host can compose them in front of the VM's native dispatcher.

use babylon_bindings::BabylonMsg;
use cosmwasm_std::{Addr, Coin, CosmosMsg, Event};
use tracing::{info, warn};

use crate::error::BabylonError;
use crate::host::Context;
use crate::keeper::MODULE_NAME;
use crate::state::bsn_contracts::get_bsn_contracts;

/// Type URL prefix of the host's native staking messages
const STAKING_TYPE_URL_PREFIX: &str = "/cosmos.staking.";

pub trait MessageHandler {
    /// Handles `msg` sent by `contract`, returning the events it produced
    fn dispatch_msg(
        &self,
        ctx: &mut Context,
        contract: &Addr,
        msg: &CosmosMsg<BabylonMsg>,
    ) -> Result<Vec<Event>, BabylonError>;
}

/// Rejects native staking operations from contracts. Stake can only move through the
/// reward and slashing paths of the module.
pub struct IntegrityHandler;

impl MessageHandler for IntegrityHandler {
    fn dispatch_msg(
        &self,
        _ctx: &mut Context,
        contract: &Addr,
        msg: &CosmosMsg<BabylonMsg>,
    ) -> Result<Vec<Event>, BabylonError> {
        #[allow(deprecated)]
        let is_staking = match msg {
            CosmosMsg::Staking(_) => true,
            CosmosMsg::Any(any) => any.type_url.starts_with(STAKING_TYPE_URL_PREFIX),
            CosmosMsg::Stargate { type_url, .. } => type_url.starts_with(STAKING_TYPE_URL_PREFIX),
            _ => false,
        };
        if is_staking {
            warn!(%contract, "contract attempted a native staking operation");
            return Err(BabylonError::Unsupported(
                "staking messages are not supported for contracts".to_string(),
            ));
        }
        Err(BabylonError::UnknownMsg)
    }
}

/// Handles the module's custom messages
pub struct BabylonMsgHandler;

impl BabylonMsgHandler {
    fn mint_rewards(
        &self,
        ctx: &mut Context,
        contract: &Addr,
        amount: &Coin,
        recipient: &str,
    ) -> Result<Vec<Event>, BabylonError> {
        let finality = get_bsn_contracts(ctx.storage)?
            .ok_or_else(|| BabylonError::Misconfigured("BSN contracts are not set".to_string()))?
            .btc_finality(ctx.api)?
            .ok_or_else(|| {
                BabylonError::Misconfigured("BTC finality contract is not set".to_string())
            })?;
        if *contract != finality {
            return Err(BabylonError::unauthorized(finality, contract));
        }
        if amount.amount.is_zero() {
            return Err(BabylonError::InvalidRequest(
                "cannot mint a zero amount".to_string(),
            ));
        }
        let recipient = ctx
            .api
            .addr_validate(recipient)
            .map_err(|err| BabylonError::invalid_address(recipient, err))?;

        let amount = vec![amount.clone()];
        ctx.bank
            .mint_coins(MODULE_NAME, &amount)
            .map_err(|err| BabylonError::Bank(err.to_string()))?;
        ctx.bank
            .send_coins_from_module_to_account(MODULE_NAME, &recipient, &amount)
            .map_err(|err| BabylonError::Bank(err.to_string()))?;

        info!(height = ctx.height(), %recipient, amount = %amount[0], "minted rewards");
        Ok(vec![Event::new("mint_rewards")
            .add_attribute("recipient", recipient)
            .add_attribute("amount", amount[0].to_string())])
    }
}

impl MessageHandler for BabylonMsgHandler {
    fn dispatch_msg(
        &self,
        ctx: &mut Context,
        contract: &Addr,
        msg: &CosmosMsg<BabylonMsg>,
    ) -> Result<Vec<Event>, BabylonError> {
        match msg {
            CosmosMsg::Custom(BabylonMsg::MintRewards { amount, recipient }) => {
                self.mint_rewards(ctx, contract, amount, recipient)
            }
            _ => Err(BabylonError::UnknownMsg),
        }
    }
}

/// Ordered handlers. The first handler that does not return [`BabylonError::UnknownMsg`]
/// decides the outcome
pub struct MessageHandlerChain<'a> {
    handlers: Vec<Box<dyn MessageHandler + 'a>>,
}

impl<'a> MessageHandlerChain<'a> {
    pub fn new(handlers: Vec<Box<dyn MessageHandler + 'a>>) -> Self {
        MessageHandlerChain { handlers }
    }

    /// The module's handlers, to be placed in front of the VM's native dispatcher
    pub fn babylon() -> Self {
        MessageHandlerChain::new(vec![Box::new(IntegrityHandler), Box::new(BabylonMsgHandler)])
    }

    pub fn push(mut self, handler: Box<dyn MessageHandler + 'a>) -> Self {
        self.handlers.push(handler);
        self
    }
}

impl MessageHandler for MessageHandlerChain<'_> {
    fn dispatch_msg(
        &self,
        ctx: &mut Context,
        contract: &Addr,
        msg: &CosmosMsg<BabylonMsg>,
    ) -> Result<Vec<Event>, BabylonError> {
        for handler in &self.handlers {
            match handler.dispatch_msg(ctx, contract, msg) {
                Err(BabylonError::UnknownMsg) => continue,
                res => return res,
            }
        }
        Err(BabylonError::UnknownMsg)
    }
}
