use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, bail, Result as AnyResult};
use derivative::Derivative;
use serde::de::DeserializeOwned;

use cosmwasm_std::testing::{MockApi, MockStorage};
use cosmwasm_std::{
    from_json, to_json_vec, Addr, Binary, Coin, ContractResult, CosmosMsg, Empty, Event, Querier,
    QuerierResult, QueryRequest, Response, SystemResult, Timestamp, WasmMsg, WasmQuery,
};
use cw_multi_test::{
    App, BankKeeper as MultiBankKeeper, BankSudo, BasicAppBuilder, Executor, FailingModule,
    SudoMsg, WasmKeeper as MultiWasmKeeper, WasmSudo,
};

use babylon_bindings::{BabylonMsg, BabylonSudoMsg};

use crate::abci::BlockResponse;
use crate::error::BabylonError;
use crate::genesis::{default_genesis, export_genesis, init_genesis, GenesisState};
use crate::handler_plugin::{MessageHandler, MessageHandlerChain};
use crate::host::{BankKeeper, BlockHeader, ContractInfo, Context, WasmKeeper};
use crate::keeper::{Keeper, FEE_COLLECTOR_NAME};
use crate::msg::tests::instantiate_msg;
use crate::msg::{Msg, MsgInstantiateBabylonContracts, MsgSetBsnContracts, MsgUpdateParams};
use crate::queries::{BsnContractsResponse, BtcStakingGaugeResponse, ParamsResponse, QueryMsg};
use crate::query_plugin::{CustomQuerier, QueryHandler};
use crate::state::bsn_contracts::BsnContracts;
use crate::state::params::Params;

use super::contracts::{
    contract_babylon, contract_broken_babylon, contract_btc_finality, contract_btc_light_client,
    contract_btc_staking,
};

/// Bech32 prefix of the consumer chain
pub const PREFIX: &str = "bbnc";

/// How many seconds per block
pub const BLOCK_TIME: u64 = 5;

const GENESIS_TIME: u64 = 1_700_000_000;

pub type BabylonAppWrapped = App<
    MultiBankKeeper,
    MockApi,
    MockStorage,
    FailingModule<BabylonMsg, Empty, Empty>,
    MultiWasmKeeper<BabylonMsg, Empty>,
>;

type SharedApp = Rc<RefCell<BabylonAppWrapped>>;

pub fn mock_api() -> MockApi {
    MockApi::default().with_prefix(PREFIX)
}

pub fn block_header(height: u64) -> BlockHeader {
    BlockHeader {
        height,
        time: Timestamp::from_seconds(GENESIS_TIME + height * BLOCK_TIME),
        chain_id: "bsn-test-1".to_string(),
        hash: height.to_be_bytes().to_vec(),
        app_hash: vec![0xab, 0xcd, 0xef, height as u8],
    }
}

/// A sudo call as received by the VM
#[derive(Clone, Debug, PartialEq)]
pub struct SudoCall {
    pub contract: Addr,
    pub msg: BabylonSudoMsg,
    pub gas_limit: u64,
}

/// Bank keeper backed by the bank of the multi-test app
pub struct TestBank {
    app: SharedApp,
}

impl BankKeeper for TestBank {
    fn module_address(&self, module: &str) -> Addr {
        self.app.borrow().api().addr_make(module)
    }

    fn get_all_balances(&self, addr: &Addr) -> AnyResult<Vec<Coin>> {
        Ok(self.app.borrow().wrap().query_all_balances(addr.as_str())?)
    }

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        recipient: &Addr,
        amount: &[Coin],
    ) -> AnyResult<()> {
        let module = self.module_address(module);
        self.app
            .borrow_mut()
            .send_tokens(module, recipient.clone(), amount)?;
        Ok(())
    }

    fn mint_coins(&mut self, module: &str, amount: &[Coin]) -> AnyResult<()> {
        let to_address = self.module_address(module).to_string();
        self.app.borrow_mut().sudo(SudoMsg::Bank(BankSudo::Mint {
            to_address,
            amount: amount.to_vec(),
        }))?;
        Ok(())
    }
}

/// VM keeper backed by the wasm keeper of the multi-test app. Records every sudo call
pub struct TestWasm {
    app: SharedApp,
    sudo_log: Rc<RefCell<Vec<SudoCall>>>,
}

impl WasmKeeper for TestWasm {
    fn instantiate(
        &mut self,
        code_id: u64,
        creator: &Addr,
        admin: Option<&Addr>,
        init_msg: &[u8],
        label: &str,
    ) -> AnyResult<Addr> {
        let msg = WasmMsg::Instantiate {
            admin: admin.map(|admin| admin.to_string()),
            code_id,
            msg: Binary::from(init_msg),
            funds: vec![],
            label: label.to_string(),
        };
        let res = self.app.borrow_mut().execute(creator.clone(), msg.into())?;

        // The first instantiate event is the one of the contract itself, the ones of its
        // submessages follow
        let code_id = code_id.to_string();
        res.events
            .iter()
            .filter(|event| event.ty == "instantiate")
            .find(|event| {
                event
                    .attributes
                    .iter()
                    .any(|attr| attr.key == "code_id" && attr.value == code_id)
            })
            .and_then(|event| {
                event
                    .attributes
                    .iter()
                    .find(|attr| attr.key == "_contract_address")
            })
            .map(|attr| Addr::unchecked(&attr.value))
            .ok_or_else(|| anyhow!("cannot parse contract address"))
    }

    fn sudo(&mut self, contract: &Addr, msg: &[u8], gas_limit: u64) -> AnyResult<Option<Binary>> {
        self.sudo_log.borrow_mut().push(SudoCall {
            contract: contract.clone(),
            msg: from_json(msg)?,
            gas_limit,
        });
        let res = self.app.borrow_mut().sudo(SudoMsg::Wasm(WasmSudo {
            contract_addr: contract.clone(),
            message: Binary::from(msg),
        }))?;
        Ok(res.data)
    }

    fn query_smart(&self, contract: &Addr, msg: &[u8]) -> AnyResult<Binary> {
        let request = to_json_vec(&QueryRequest::<Empty>::Wasm(WasmQuery::Smart {
            contract_addr: contract.to_string(),
            msg: Binary::from(msg),
        }))?;
        match self.app.borrow().raw_query(&request) {
            SystemResult::Ok(ContractResult::Ok(res)) => Ok(res),
            SystemResult::Ok(ContractResult::Err(err)) => bail!("smart query failed: {err}"),
            SystemResult::Err(err) => bail!("smart query failed: {err}"),
        }
    }

    fn contract_info(&self, contract: &Addr) -> Option<ContractInfo> {
        let data = self.app.borrow().contract_data(contract).ok()?;
        Some(ContractInfo {
            code_id: data.code_id,
            creator: data.creator,
            admin: data.admin,
            label: data.label,
        })
    }
}

/// The VM's native query handler, as seen from the custom querier
pub struct NativeQuerier;

pub const NATIVE_QUERY_MARKER: &[u8] = br#""native""#;

impl QueryHandler for NativeQuerier {
    fn handle_query(&self, _caller: &Addr, _request: &[u8]) -> QuerierResult {
        SystemResult::Ok(ContractResult::Ok(Binary::from(NATIVE_QUERY_MARKER)))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CodeIds {
    pub babylon: u64,
    pub broken_babylon: u64,
    pub btc_light_client: u64,
    pub btc_staking: u64,
    pub btc_finality: u64,
}

#[derive(Derivative)]
#[derivative(Default = "new")]
pub struct SuiteBuilder {
    params: Option<Params>,
    fee_collector_funds: Vec<Coin>,
    with_contracts: bool,
}

impl SuiteBuilder {
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_fee_collector_funds(mut self, funds: &[Coin]) -> Self {
        self.fee_collector_funds = funds.to_vec();
        self
    }

    /// Provisions the BSN contracts through governance
    pub fn with_contracts(mut self) -> Self {
        self.with_contracts = true;
        self
    }

    #[track_caller]
    pub fn build(self) -> Suite {
        let app = BasicAppBuilder::<BabylonMsg, Empty>::new_custom()
            .with_api(mock_api())
            .build(|_, _, _| {});
        let app = Rc::new(RefCell::new(app));

        let code_ids = {
            let mut app = app.borrow_mut();
            CodeIds {
                babylon: app.store_code(contract_babylon()),
                broken_babylon: app.store_code(contract_broken_babylon()),
                btc_light_client: app.store_code(contract_btc_light_client()),
                btc_staking: app.store_code(contract_btc_staking()),
                btc_finality: app.store_code(contract_btc_finality()),
            }
        };

        let api = mock_api();
        let gov = api.addr_make("gov");
        let mut genesis = default_genesis();
        if let Some(params) = self.params {
            genesis.params = params;
        }
        let mut storage = MockStorage::new();
        init_genesis(&mut storage, &api, &genesis);

        let sudo_log = Rc::new(RefCell::new(vec![]));
        let mut suite = Suite {
            bank: TestBank { app: app.clone() },
            wasm: TestWasm {
                app: app.clone(),
                sudo_log: sudo_log.clone(),
            },
            app,
            storage,
            api,
            keeper: Keeper::new(gov.clone()),
            gov,
            code_ids,
            sudo_log,
            height: 0,
        };

        if !self.fee_collector_funds.is_empty() {
            suite.fund_fee_collector(&self.fee_collector_funds);
        }
        if self.with_contracts {
            suite.instantiate_contracts(code_ids.babylon).unwrap();
            suite.clear_sudo_log();
        }
        suite
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Suite {
    #[derivative(Debug = "ignore")]
    app: SharedApp,
    #[derivative(Debug = "ignore")]
    bank: TestBank,
    #[derivative(Debug = "ignore")]
    wasm: TestWasm,
    /// Store of the module
    #[derivative(Debug = "ignore")]
    storage: MockStorage,
    #[derivative(Debug = "ignore")]
    api: MockApi,
    pub keeper: Keeper,
    /// Governance account, the authority of the module
    pub gov: Addr,
    pub code_ids: CodeIds,
    #[derivative(Debug = "ignore")]
    sudo_log: Rc<RefCell<Vec<SudoCall>>>,
    /// Height of the block being executed
    height: u64,
}

impl Suite {
    pub fn addr_make(&self, name: &str) -> Addr {
        self.api.addr_make(name)
    }

    /// Runs `f` in the context of the block being executed
    pub fn with_ctx<R>(&mut self, f: impl FnOnce(&Keeper, &mut Context) -> R) -> R {
        let header = block_header(self.height);
        self.app.borrow_mut().update_block(|block| {
            block.height = header.height;
            block.time = header.time;
        });
        let mut ctx = Context {
            storage: &mut self.storage,
            api: &self.api,
            bank: &mut self.bank,
            wasm: &mut self.wasm,
            header,
        };
        f(&self.keeper, &mut ctx)
    }

    pub fn begin_block(&mut self, height: u64) -> BlockResponse {
        self.height = height;
        self.with_ctx(|keeper, ctx| keeper.begin_blocker(ctx))
    }

    pub fn end_block(&mut self) -> BlockResponse {
        self.with_ctx(|keeper, ctx| keeper.end_blocker(ctx))
    }

    pub fn handle_msg(&mut self, msg: Msg) -> Result<Response, BabylonError> {
        self.with_ctx(|keeper, ctx| keeper.handle_msg(ctx, msg))
    }

    /// Dispatches a message sent by `contract` through the module's message handlers
    pub fn dispatch(
        &mut self,
        contract: &Addr,
        msg: CosmosMsg<BabylonMsg>,
    ) -> Result<Vec<Event>, BabylonError> {
        self.with_ctx(|_, ctx| MessageHandlerChain::babylon().dispatch_msg(ctx, contract, &msg))
    }

    /// Issues a raw VM query through the module's custom querier
    pub fn vm_query(&self, caller: &Addr, request: &[u8]) -> QuerierResult {
        let querier = CustomQuerier::builder()
            .with_next(&NativeQuerier)
            .with_storage(&self.storage)
            .with_wasm(&self.wasm)
            .build()
            .unwrap();
        querier.handle_query(caller, request)
    }

    pub fn instantiate_msg(&self, babylon_code_id: u64) -> MsgInstantiateBabylonContracts {
        let mut msg = instantiate_msg(&self.api, self.gov.as_str());
        msg.babylon_contract_code_id = babylon_code_id;
        msg.btc_light_client_contract_code_id = self.code_ids.btc_light_client;
        msg.btc_staking_contract_code_id = self.code_ids.btc_staking;
        msg.btc_finality_contract_code_id = self.code_ids.btc_finality;
        msg
    }

    pub fn instantiate_contracts(&mut self, babylon_code_id: u64) -> Result<Response, BabylonError> {
        let msg = self.instantiate_msg(babylon_code_id);
        self.handle_msg(Msg::InstantiateBabylonContracts(msg))
    }

    pub fn set_bsn_contracts(
        &mut self,
        signer: &Addr,
        contracts: BsnContracts,
    ) -> Result<Response, BabylonError> {
        self.handle_msg(Msg::SetBsnContracts(MsgSetBsnContracts {
            authority: signer.to_string(),
            contracts: Some(contracts),
        }))
    }

    pub fn update_params(&mut self, signer: &Addr, params: Params) -> Result<Response, BabylonError> {
        self.handle_msg(Msg::UpdateParams(MsgUpdateParams {
            authority: signer.to_string(),
            params,
        }))
    }

    #[track_caller]
    pub fn query<T: DeserializeOwned>(&self, msg: QueryMsg) -> T {
        from_json(self.keeper.query(&self.storage, msg).unwrap()).unwrap()
    }

    pub fn params(&self) -> Params {
        self.query::<ParamsResponse>(QueryMsg::Params {}).params
    }

    pub fn bsn_contracts(&self) -> Option<BsnContracts> {
        self.query::<BsnContractsResponse>(QueryMsg::BsnContracts {})
            .bsn_contracts
    }

    /// The registered contracts, which must be set
    #[track_caller]
    pub fn contracts(&self) -> BsnContracts {
        self.bsn_contracts().unwrap()
    }

    pub fn gauge(&self, height: u64) -> Option<Vec<Coin>> {
        self.query::<BtcStakingGaugeResponse>(QueryMsg::BtcStakingGauge { height })
            .coins
    }

    pub fn export_genesis(&self) -> GenesisState {
        export_genesis(&self.storage).unwrap()
    }

    pub fn contract_info(&self, contract: &str) -> Option<ContractInfo> {
        self.wasm.contract_info(&Addr::unchecked(contract))
    }

    pub fn fee_collector(&self) -> Addr {
        self.bank.module_address(FEE_COLLECTOR_NAME)
    }

    #[track_caller]
    pub fn fund_fee_collector(&mut self, funds: &[Coin]) {
        self.bank.mint_coins(FEE_COLLECTOR_NAME, funds).unwrap();
    }

    #[track_caller]
    pub fn balances(&self, addr: &str) -> Vec<Coin> {
        self.bank.get_all_balances(&Addr::unchecked(addr)).unwrap()
    }

    pub fn sudo_calls(&self) -> Vec<SudoCall> {
        self.sudo_log.borrow().clone()
    }

    pub fn clear_sudo_log(&mut self) {
        self.sudo_log.borrow_mut().clear();
    }
}
