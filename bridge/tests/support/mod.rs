//! Two-chain test harness: an escrow bridge on chain A and a mirror bridge
//! on chain B, each publishing through its own transport endpoint, all inside
//! one cw-multi-test `App`. A relayer account moves packets between the
//! endpoints.

#![allow(dead_code)]

use bech32::FromBase32;
use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse, TokenInfoResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use subnet_bridge::fee_policy::FeePolicyMsg;
use subnet_bridge::ledger::LedgerMsg;
use subnet_bridge::msg::{ExecuteMsg, FailedMessageResponse, InstantiateMsg, QueryMsg};
use transport_endpoint::msg::{
    ExecuteMsg as EndpointExecuteMsg, InstantiateMsg as EndpointInstantiateMsg, NonceResponse,
    QueryMsg as EndpointQueryMsg,
};
use transport_endpoint::state::Packet;

pub const DENOM: &str = "uluna";
pub const CHAIN_A: u16 = 101;
pub const CHAIN_B: u16 = 102;

/// Flat transport quote charged by both endpoints
pub const BASE_FEE: u128 = 2;

/// Account on chain A (valid bech32, decodes to 20 bytes)
pub const USER_A: &str = "terra1x46rqay4d3cssq8gxxvqz8xt6nwlz4td20k38v";
/// Account on chain B: bech32 of twenty 0x11 bytes
pub const USER_B: &str = "terra1zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg38edzs0";

pub fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        subnet_bridge::contract::execute,
        subnet_bridge::contract::instantiate,
        subnet_bridge::contract::query,
    )
    .with_reply(subnet_bridge::contract::reply)
    .with_migrate(subnet_bridge::contract::migrate);
    Box::new(contract)
}

pub fn contract_endpoint() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        transport_endpoint::contract::execute,
        transport_endpoint::contract::instantiate,
        transport_endpoint::contract::query,
    );
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

/// Raw 20-byte address of a bech32 account
pub fn raw(addr: &str) -> Binary {
    let (_, data, _) = bech32::decode(addr).unwrap();
    let bytes = Vec::<u8>::from_base32(&data).unwrap();
    assert_eq!(bytes.len(), 20, "{addr} is not a 20-byte account");
    Binary::from(bytes)
}

pub struct Harness {
    pub app: App,
    pub admin: Addr,
    pub relayer: Addr,
    pub user_a: Addr,
    pub user_b: Addr,
    pub fee_handler: Addr,
    pub endpoint_a: Addr,
    pub endpoint_b: Addr,
    pub bridge_a: Addr,
    pub bridge_b: Addr,
    pub token: Addr,
}

/// Escrow bridge on A, mirror bridge on B with the given fee policy and cap.
pub fn setup(fee_policy: FeePolicyMsg, max_supply: u128) -> Harness {
    let mut app = App::default();

    let admin = Addr::unchecked("terra1admin");
    let relayer = Addr::unchecked("terra1relayer");
    let user_a = Addr::unchecked(USER_A);
    let user_b = Addr::unchecked(USER_B);
    let fee_handler = Addr::unchecked("terra1feehandler");

    app.init_modules(|router, _, storage| {
        for account in [&admin, &user_a, &user_b] {
            router
                .bank
                .init_balance(storage, account, coins(10_000_000, DENOM))
                .unwrap();
        }
    });

    let bridge_code = app.store_code(contract_bridge());
    let endpoint_code = app.store_code(contract_endpoint());
    let cw20_code = app.store_code(contract_cw20());

    let endpoint = |app: &mut App, chain_id: u16| {
        app.instantiate_contract(
            endpoint_code,
            admin.clone(),
            &EndpointInstantiateMsg {
                chain_id,
                admin: admin.to_string(),
                relayer: relayer.to_string(),
                native_denom: DENOM.to_string(),
                base_fee: Uint128::new(BASE_FEE),
                fee_per_byte: Uint128::zero(),
            },
            &[],
            "transport-endpoint",
            None,
        )
        .unwrap()
    };
    let endpoint_a = endpoint(&mut app, CHAIN_A);
    let endpoint_b = endpoint(&mut app, CHAIN_B);

    // Mirror token starts with the admin as minter, handed to the bridge below
    let token = app
        .instantiate_contract(
            cw20_code,
            admin.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Subnet Mirror".to_string(),
                symbol: "MIRR".to_string(),
                decimals: 6,
                initial_balances: vec![],
                mint: Some(MinterResponse {
                    minter: admin.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            "mirror-token",
            None,
        )
        .unwrap();

    let bridge_a = app
        .instantiate_contract(
            bridge_code,
            admin.clone(),
            &InstantiateMsg {
                admins: vec![admin.to_string()],
                endpoint: endpoint_a.to_string(),
                native_denom: DENOM.to_string(),
                address_prefix: "terra".to_string(),
                ledger: LedgerMsg::Escrow {
                    denom: DENOM.to_string(),
                },
                use_custom_adapter_params: false,
                allowed_chains: vec![CHAIN_B],
            },
            &[],
            "subnet-bridge-escrow",
            Some(admin.to_string()),
        )
        .unwrap();

    let bridge_b = app
        .instantiate_contract(
            bridge_code,
            admin.clone(),
            &InstantiateMsg {
                admins: vec![admin.to_string()],
                endpoint: endpoint_b.to_string(),
                native_denom: DENOM.to_string(),
                address_prefix: "terra".to_string(),
                ledger: LedgerMsg::Mirror {
                    token: token.to_string(),
                    max_supply: Uint128::new(max_supply),
                    fee_policy,
                },
                use_custom_adapter_params: false,
                allowed_chains: vec![CHAIN_A],
            },
            &[],
            "subnet-bridge-mirror",
            Some(admin.to_string()),
        )
        .unwrap();

    app.execute_contract(
        admin.clone(),
        token.clone(),
        &Cw20ExecuteMsg::UpdateMinter {
            new_minter: Some(bridge_b.to_string()),
        },
        &[],
    )
    .unwrap();

    Harness {
        app,
        admin,
        relayer,
        user_a,
        user_b,
        fee_handler,
        endpoint_a,
        endpoint_b,
        bridge_a,
        bridge_b,
        token,
    }
}

/// Default harness: fee paid to a handler on the mirror side.
pub fn setup_default() -> Harness {
    setup(
        FeePolicyMsg::TransferToHandler {
            handler: "terra1feehandler".to_string(),
        },
        1_000_000,
    )
}

pub fn send_msg(dst_chain_id: u16, to: &str, amount: u128, refund: &Addr) -> ExecuteMsg {
    ExecuteMsg::Send {
        dst_chain_id,
        to_address: raw(to),
        amount: Uint128::new(amount),
        refund_address: refund.to_string(),
        zro_payment_address: None,
        adapter_params: Binary::default(),
        fee_amount: None,
    }
}

impl Harness {
    // ------------------------------------------------------------------------
    // Flows
    // ------------------------------------------------------------------------

    /// Escrow `amount` on A for `to` on B (attaching `amount + 5`).
    pub fn send_a_to_b(&mut self, to: &str, amount: u128) -> AppResponse {
        let msg = send_msg(CHAIN_B, to, amount, &self.user_a);
        self.app
            .execute_contract(
                self.user_a.clone(),
                self.bridge_a.clone(),
                &msg,
                &coins(amount + 5, DENOM),
            )
            .unwrap()
    }

    /// Burn `amount` (+ `fee` to the handler) on B for `to` on A.
    pub fn send_b_to_a(&mut self, to: &str, amount: u128, fee: u128) -> AppResponse {
        self.approve_bridge_b(amount + fee);
        let mut msg = send_msg(CHAIN_A, to, amount, &self.user_b);
        if let ExecuteMsg::Send { fee_amount, .. } = &mut msg {
            *fee_amount = Some(Uint128::new(fee));
        }
        self.app
            .execute_contract(
                self.user_b.clone(),
                self.bridge_b.clone(),
                &msg,
                &coins(BASE_FEE, DENOM),
            )
            .unwrap()
    }

    pub fn approve_bridge_b(&mut self, amount: u128) {
        self.app
            .execute_contract(
                self.user_b.clone(),
                self.token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: self.bridge_b.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    /// Deliver the latest packet A published to chain B.
    pub fn relay_a_to_b(&mut self) -> Result<AppResponse, String> {
        let (endpoint, bridge, receiver) = (
            self.endpoint_a.clone(),
            self.bridge_a.clone(),
            self.bridge_b.clone(),
        );
        let to_endpoint = self.endpoint_b.clone();
        self.relay(&endpoint, &bridge, CHAIN_A, CHAIN_B, &to_endpoint, &receiver)
    }

    /// Deliver the latest packet B published to chain A.
    pub fn relay_b_to_a(&mut self) -> Result<AppResponse, String> {
        let (endpoint, bridge, receiver) = (
            self.endpoint_b.clone(),
            self.bridge_b.clone(),
            self.bridge_a.clone(),
        );
        let to_endpoint = self.endpoint_a.clone();
        self.relay(&endpoint, &bridge, CHAIN_B, CHAIN_A, &to_endpoint, &receiver)
    }

    /// Have the relayer push an arbitrary payload into bridge B as if it came
    /// from bridge A.
    pub fn deliver_to_b(&mut self, nonce: u64, payload: Binary) -> Result<AppResponse, String> {
        self.app
            .execute_contract(
                self.relayer.clone(),
                self.endpoint_b.clone(),
                &EndpointExecuteMsg::Deliver {
                    src_chain_id: CHAIN_A,
                    src_address: src_address(&self.bridge_a),
                    nonce,
                    receiver: self.bridge_b.to_string(),
                    payload,
                },
                &[],
            )
            .map_err(|e| e.root_cause().to_string())
    }

    fn relay(
        &mut self,
        from_endpoint: &Addr,
        src_app: &Addr,
        src_chain_id: u16,
        dst_chain_id: u16,
        to_endpoint: &Addr,
        receiver: &Addr,
    ) -> Result<AppResponse, String> {
        let nonce = self.outbound_nonce(from_endpoint, dst_chain_id, src_app);
        let packet = self.packet(from_endpoint, dst_chain_id, src_app, nonce);
        self.app
            .execute_contract(
                self.relayer.clone(),
                to_endpoint.clone(),
                &EndpointExecuteMsg::Deliver {
                    src_chain_id,
                    src_address: src_address(src_app),
                    nonce,
                    receiver: receiver.to_string(),
                    payload: packet.payload,
                },
                &[],
            )
            .map_err(|e| e.root_cause().to_string())
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn native_balance(&self, addr: &Addr) -> Uint128 {
        self.app.wrap().query_balance(addr, DENOM).unwrap().amount
    }

    pub fn escrow_balance(&self) -> Uint128 {
        self.native_balance(&self.bridge_a)
    }

    pub fn mirror_balance(&self, addr: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.token,
                &Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn mirror_supply(&self) -> Uint128 {
        let res: TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.token, &Cw20QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply
    }

    pub fn failed_message(
        &self,
        bridge: &Addr,
        src_chain_id: u16,
        src_app: &Addr,
        nonce: u64,
    ) -> Option<Binary> {
        let res: FailedMessageResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                bridge,
                &QueryMsg::FailedMessage {
                    src_chain_id,
                    src_address: src_address(src_app),
                    nonce,
                },
            )
            .unwrap();
        res.payload_hash
    }

    pub fn outbound_nonce(&self, endpoint: &Addr, dst_chain_id: u16, src_app: &Addr) -> u64 {
        let res: NonceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                endpoint,
                &EndpointQueryMsg::OutboundNonce {
                    dst_chain_id,
                    src_address: src_app.to_string(),
                },
            )
            .unwrap();
        res.nonce
    }

    pub fn inbound_nonce(&self, endpoint: &Addr, src_chain_id: u16, src_app: &Addr) -> u64 {
        let res: NonceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                endpoint,
                &EndpointQueryMsg::InboundNonce {
                    src_chain_id,
                    src_address: src_address(src_app),
                },
            )
            .unwrap();
        res.nonce
    }

    pub fn packet(&self, endpoint: &Addr, dst_chain_id: u16, src_app: &Addr, nonce: u64) -> Packet {
        self.app
            .wrap()
            .query_wasm_smart(
                endpoint,
                &EndpointQueryMsg::Packet {
                    dst_chain_id,
                    src_address: src_app.to_string(),
                    nonce,
                },
            )
            .unwrap()
    }
}

/// Path address of an application as carried in inbound packets
pub fn src_address(app_addr: &Addr) -> Binary {
    Binary::from(app_addr.as_bytes())
}

/// Value of `key` on the first `wasm-<ty>` event, if any
pub fn event_attr(res: &AppResponse, ty: &str, key: &str) -> Option<String> {
    let ty = format!("wasm-{}", ty);
    res.events
        .iter()
        .filter(|e| e.ty == ty)
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

/// First plain response attribute named `key` set by any contract
pub fn wasm_attr(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

/// Number of `wasm-<ty>` events in a response
pub fn count_events(res: &AppResponse, ty: &str) -> usize {
    let ty = format!("wasm-{}", ty);
    res.events.iter().filter(|e| e.ty == ty).count()
}
