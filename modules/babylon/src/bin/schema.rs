use std::env::current_dir;
use std::fs::create_dir_all;

use cosmwasm_schema::{export_schema, export_schema_with_title, remove_schemas, schema_for};

use babylon_bindings::{BabylonInstantiateMsg, BabylonQuery, BabylonSudoMsg, ParamsResponse};
use babylon_module::genesis::GenesisState;
use babylon_module::msg::Msg;
use babylon_module::msg_server::InstantiateBabylonContractsResponse;
use babylon_module::queries::{
    BsnContractsResponse, BtcStakingGaugeResponse, BtcStakingGaugesResponse, QueryMsg,
};

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(Msg), &out_dir);
    export_schema(&schema_for!(InstantiateBabylonContractsResponse), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(babylon_module::queries::ParamsResponse), &out_dir);
    export_schema(&schema_for!(BsnContractsResponse), &out_dir);
    export_schema(&schema_for!(BtcStakingGaugeResponse), &out_dir);
    export_schema(&schema_for!(BtcStakingGaugesResponse), &out_dir);
    export_schema(&schema_for!(GenesisState), &out_dir);

    export_schema(&schema_for!(BabylonInstantiateMsg), &out_dir);
    export_schema(&schema_for!(BabylonQuery), &out_dir);
    export_schema_with_title(&schema_for!(ParamsResponse), &out_dir, "CustomParamsResponse");
    export_schema(&schema_for!(BabylonSudoMsg), &out_dir);
}
