pub mod abci;
pub mod cli;
pub mod error;
pub mod fees;
pub mod genesis;
pub mod handler_plugin;
pub mod host;
pub mod keeper;
pub mod msg;
pub mod msg_server;
pub mod provision;
pub mod queries;
pub mod query_plugin;
pub mod state;
pub mod sudo;


pub use crate::abci::BlockResponse;
pub use crate::error::BabylonError;
pub use crate::genesis::{default_genesis, export_genesis, init_genesis, GenesisState};
pub use crate::handler_plugin::{MessageHandler, MessageHandlerChain};
pub use crate::host::{BankKeeper, BlockHeader, Context, WasmKeeper};
pub use crate::keeper::Keeper;
pub use crate::msg::Msg;
pub use crate::queries::QueryMsg;
pub use crate::query_plugin::{CustomQuerier, QueryHandler};
