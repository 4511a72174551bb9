//! Interfaces of the host chain the module depends on.
//!
//! The module holds no state of its own outside of the store it is handed. Every entrypoint
//! receives a [`Context`] bundling the module's namespaced store, the address codec, the
//! bank and VM keepers of the host, and the header of the block being executed.

use anyhow::Result as AnyResult;
use cosmwasm_std::{Addr, Api, Binary, Coin, Storage, Timestamp};

/// Header of the block being executed, as exposed by the host
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BlockHeader {
    pub height: u64,
    pub time: Timestamp,
    pub chain_id: String,
    /// Hash of the current block
    pub hash: Vec<u8>,
    /// Application state root after the previous block
    pub app_hash: Vec<u8>,
}

impl BlockHeader {
    /// Lowercase hex of the current block hash
    pub fn hash_hex(&self) -> String {
        hex::encode(&self.hash)
    }

    /// Lowercase hex of the previous application state root
    pub fn app_hash_hex(&self) -> String {
        hex::encode(&self.app_hash)
    }
}

/// Bank primitives of the host chain
pub trait BankKeeper {
    /// Account address of the given module account
    fn module_address(&self, module: &str) -> Addr;

    fn get_all_balances(&self, addr: &Addr) -> AnyResult<Vec<Coin>>;

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        recipient: &Addr,
        amount: &[Coin],
    ) -> AnyResult<()>;

    fn mint_coins(&mut self, module: &str, amount: &[Coin]) -> AnyResult<()>;
}

/// Information the VM keeps about an instantiated contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractInfo {
    pub code_id: u64,
    pub creator: Addr,
    pub admin: Option<Addr>,
    pub label: String,
}

/// Contract primitives of the host VM
pub trait WasmKeeper {
    /// Instantiates a contract and returns its address
    fn instantiate(
        &mut self,
        code_id: u64,
        creator: &Addr,
        admin: Option<&Addr>,
        init_msg: &[u8],
        label: &str,
    ) -> AnyResult<Addr>;

    /// Privileged call into a contract. The call must not consume more than `gas_limit`
    fn sudo(&mut self, contract: &Addr, msg: &[u8], gas_limit: u64) -> AnyResult<Option<Binary>>;

    fn query_smart(&self, contract: &Addr, msg: &[u8]) -> AnyResult<Binary>;

    fn contract_info(&self, contract: &Addr) -> Option<ContractInfo>;
}

/// Explicit context handle every module entrypoint runs in
pub struct Context<'a> {
    pub storage: &'a mut dyn Storage,
    pub api: &'a dyn Api,
    pub bank: &'a mut dyn BankKeeper,
    pub wasm: &'a mut dyn WasmKeeper,
    pub header: BlockHeader,
}

impl Context<'_> {
    pub fn height(&self) -> u64 {
        self.header.height
    }
}
