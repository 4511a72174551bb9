pub mod contract;
pub mod msg;
pub mod query;
pub mod sudo;

pub use contract::{BabylonContractConfig, BabylonInstantiateMsg};
pub use msg::BabylonMsg;
pub use query::{BabylonQuery, ParamsResponse};
pub use sudo::BabylonSudoMsg;
