//! Command line surface of the module, mounted by the host binary under `babylon`.

use clap::{Args, Parser, Subcommand};
use cosmwasm_std::{to_json_binary, Binary};

use crate::error::BabylonError;
use crate::msg::{Msg, MsgInstantiateBabylonContracts};
use crate::queries::QueryMsg;

#[derive(Parser, Debug)]
#[command(name = "babylon", about = "Babylon module commands")]
pub struct BabylonCli {
    #[command(subcommand)]
    pub command: BabylonCommand,
}

#[derive(Subcommand, Debug)]
pub enum BabylonCommand {
    /// Babylon transaction subcommands
    #[command(subcommand)]
    Tx(TxCommand),
    /// Babylon query subcommands
    #[command(subcommand)]
    Query(QueryCommand),
}

#[derive(Subcommand, Debug)]
pub enum TxCommand {
    /// Instantiate the Babylon contract, which instantiates the BTC light client, BTC staking
    /// and BTC finality contracts
    InstantiateBabylonContracts(InstantiateBabylonContractsArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct InstantiateBabylonContractsArgs {
    pub babylon_contract_code_id: u64,
    pub btc_light_client_contract_code_id: u64,
    pub btc_staking_contract_code_id: u64,
    pub btc_finality_contract_code_id: u64,
    /// BTC network: mainnet, testnet, signet or regtest
    pub btc_network: String,
    /// Hex-encoded four byte tag of the Babylon network
    pub babylon_tag: String,
    pub btc_confirmation_depth: u32,
    pub checkpoint_finalization_timeout: u32,
    #[arg(action = clap::ArgAction::Set)]
    pub notify_cosmos_zone: bool,
    pub btc_staking_init_msg: String,
    pub btc_finality_init_msg: String,
    pub btc_light_client_init_msg: String,
    pub consumer_name: String,
    pub consumer_description: String,
    pub admin: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum QueryCommand {
    /// Show the module params
    Params,
    /// Show the registered BSN contracts
    BsnContracts,
}

fn init_msg(name: &str, json: &str) -> Result<Binary, BabylonError> {
    serde_json::from_str::<serde_json::Value>(json)
        .map_err(|err| BabylonError::InvalidRequest(format!("{name} is not valid JSON: {err}")))?;
    Ok(Binary::from(json.as_bytes()))
}

impl InstantiateBabylonContractsArgs {
    /// The message the host signs with `signer` and broadcasts
    pub fn into_msg(self, signer: &str) -> Result<Msg, BabylonError> {
        Ok(Msg::InstantiateBabylonContracts(
            MsgInstantiateBabylonContracts {
                signer: signer.to_string(),
                babylon_contract_code_id: self.babylon_contract_code_id,
                btc_light_client_contract_code_id: self.btc_light_client_contract_code_id,
                btc_staking_contract_code_id: self.btc_staking_contract_code_id,
                btc_finality_contract_code_id: self.btc_finality_contract_code_id,
                network: self.btc_network,
                babylon_tag: self.babylon_tag,
                btc_confirmation_depth: self.btc_confirmation_depth,
                checkpoint_finalization_timeout: self.checkpoint_finalization_timeout,
                notify_cosmos_zone: self.notify_cosmos_zone,
                btc_light_client_msg: init_msg(
                    "btc light client init msg",
                    &self.btc_light_client_init_msg,
                )?,
                btc_staking_msg: init_msg("btc staking init msg", &self.btc_staking_init_msg)?,
                btc_finality_msg: init_msg("btc finality init msg", &self.btc_finality_init_msg)?,
                consumer_name: self.consumer_name,
                consumer_description: self.consumer_description,
                admin: self.admin,
            },
        ))
    }
}

impl QueryCommand {
    /// JSON request the host submits to the module's query endpoint
    pub fn to_request(&self) -> Result<Binary, BabylonError> {
        Ok(to_json_binary(&QueryMsg::from(self.clone()))?)
    }
}

impl From<QueryCommand> for QueryMsg {
    fn from(cmd: QueryCommand) -> Self {
        match cmd {
            QueryCommand::Params => QueryMsg::Params {},
            QueryCommand::BsnContracts => QueryMsg::BsnContracts {},
        }
    }
}
