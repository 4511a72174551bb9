use cosmwasm_schema::cw_serde;

/// BabylonSudoMsg is the privileged callback the consumer chain's Babylon module delivers
/// to the BTC staking and BTC finality contracts once per block.
///
/// `hash_hex` is the lowercase hex of the current block hash, and `app_hash_hex` the
/// lowercase hex of the application state root of the previous block.
#[cw_serde]
pub enum BabylonSudoMsg {
    /// Sent in BeginBlock, first to the BTC staking contract and then to the BTC finality
    /// contract. It allows them to index the BTC height and update the power distribution of
    /// the active finality providers.
    BeginBlock {
        hash_hex: String,
        app_hash_hex: String,
    },
    /// Sent in EndBlock to the BTC finality contract. It allows it to index blocks and tally
    /// the finality provider votes.
    EndBlock {
        hash_hex: String,
        app_hash_hex: String,
    },
}
