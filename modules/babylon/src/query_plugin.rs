//! Custom query channel between the contracts and the module.
//!
//! [`CustomQuerier`] decorates the VM's native query handler: custom queries it recognises
//! are answered from the module's store, and everything else is handed to the next handler.

use babylon_bindings::{BabylonQuery, ParamsResponse};
use cosmwasm_std::{
    to_json_binary, Addr, ContractResult, QuerierResult, Storage, SystemError, SystemResult,
};
use serde_json::Value;

use crate::error::BabylonError;
use crate::host::WasmKeeper;
use crate::state::bsn_contracts::get_bsn_contracts;
use crate::state::params::get_params;

/// A handler in the chain of VM query handlers
pub trait QueryHandler {
    fn handle_query(&self, caller: &Addr, request: &[u8]) -> QuerierResult;
}

pub struct CustomQuerier<'a> {
    next: &'a dyn QueryHandler,
    storage: &'a dyn Storage,
    wasm: &'a dyn WasmKeeper,
}

#[derive(Default)]
pub struct CustomQuerierBuilder<'a> {
    next: Option<&'a dyn QueryHandler>,
    storage: Option<&'a dyn Storage>,
    wasm: Option<&'a dyn WasmKeeper>,
}

impl<'a> CustomQuerierBuilder<'a> {
    pub fn with_next(mut self, next: &'a dyn QueryHandler) -> Self {
        self.next = Some(next);
        self
    }

    pub fn with_storage(mut self, storage: &'a dyn Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_wasm(mut self, wasm: &'a dyn WasmKeeper) -> Self {
        self.wasm = Some(wasm);
        self
    }

    pub fn build(self) -> Result<CustomQuerier<'a>, BabylonError> {
        let next = self
            .next
            .ok_or_else(|| BabylonError::InvalidRequest("next query handler is not set".into()))?;
        let storage = self
            .storage
            .ok_or_else(|| BabylonError::InvalidRequest("module store is not set".into()))?;
        let wasm = self
            .wasm
            .ok_or_else(|| BabylonError::InvalidRequest("wasm keeper is not set".into()))?;
        Ok(CustomQuerier {
            next,
            storage,
            wasm,
        })
    }
}

impl<'a> CustomQuerier<'a> {
    pub fn builder() -> CustomQuerierBuilder<'a> {
        CustomQuerierBuilder::default()
    }

    /// Module params together with the code ids and addresses of the registered contracts
    pub fn params(&self) -> Result<ParamsResponse, BabylonError> {
        let params = get_params(self.storage);
        let contracts = get_bsn_contracts(self.storage)?.unwrap_or_default();
        Ok(ParamsResponse {
            babylon_contract_code_id: self.code_id(&contracts.babylon_contract),
            btc_staking_contract_code_id: self.code_id(&contracts.btc_staking_contract),
            btc_finality_contract_code_id: self.code_id(&contracts.btc_finality_contract),
            babylon_contract_address: Addr::unchecked(contracts.babylon_contract),
            btc_staking_contract_address: Addr::unchecked(contracts.btc_staking_contract),
            btc_finality_contract_address: Addr::unchecked(contracts.btc_finality_contract),
            max_gas_begin_blocker: params.max_gas_begin_blocker,
        })
    }

    fn code_id(&self, addr: &str) -> u64 {
        if addr.is_empty() {
            return 0;
        }
        self.wasm
            .contract_info(&Addr::unchecked(addr))
            .map_or(0, |info| info.code_id)
    }

    fn custom_query(&self, query: BabylonQuery) -> QuerierResult {
        let res = match query {
            BabylonQuery::Params {} => self
                .params()
                .and_then(|params| Ok(to_json_binary(&params)?)),
        };
        match res {
            Ok(bin) => SystemResult::Ok(ContractResult::Ok(bin)),
            Err(err) => SystemResult::Ok(ContractResult::Err(err.to_string())),
        }
    }
}

/// The custom payload of a query request, if it is a custom query
fn custom_payload(request: &[u8]) -> Option<Value> {
    let mut request: Value = serde_json::from_slice(request).ok()?;
    request.get_mut("custom").map(Value::take)
}

impl QueryHandler for CustomQuerier<'_> {
    fn handle_query(&self, caller: &Addr, request: &[u8]) -> QuerierResult {
        let Some(custom) = custom_payload(request) else {
            return self.next.handle_query(caller, request);
        };
        match serde_json::from_value::<BabylonQuery>(custom) {
            Ok(query) => self.custom_query(query),
            // Not one of ours
            Err(_) => self.next.handle_query(caller, request),
        }
    }
}

/// Terminal handler of a query chain, rejecting everything it is given
pub struct UnsupportedQuerier;

impl QueryHandler for UnsupportedQuerier {
    fn handle_query(&self, _caller: &Addr, request: &[u8]) -> QuerierResult {
        SystemResult::Err(SystemError::UnsupportedRequest {
            kind: String::from_utf8_lossy(request).into_owned(),
        })
    }
}
