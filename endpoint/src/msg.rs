use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

use crate::state::{Config, Packet};

#[cw_serde]
pub struct InstantiateMsg {
    pub chain_id: u16,
    /// Admin who can change fees
    pub admin: String,
    pub relayer: String,
    pub native_denom: String,
    pub base_fee: Uint128,
    pub fee_per_byte: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Publish a payload (called by applications)
    Send {
        dst_chain_id: u16,
        payload: Binary,
        refund_address: String,
        zro_payment_address: Option<String>,
        adapter_params: Binary,
    },
    /// Relayer: hand an inbound packet to its receiver
    Deliver {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        receiver: String,
        payload: Binary,
    },
    /// Admin: update the fee schedule
    SetFees {
        base_fee: Uint128,
        fee_per_byte: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Fee quote for publishing `payload`
    #[returns(common::FeeEstimateResponse)]
    EstimateFees {
        dst_chain_id: u16,
        user_application: String,
        payload: Binary,
        pay_in_zro: bool,
        adapter_params: Binary,
    },
    /// Returns a stored outbound packet
    #[returns(Packet)]
    Packet {
        dst_chain_id: u16,
        src_address: String,
        nonce: u64,
    },
    /// Last nonce assigned on an outbound path (0 if none)
    #[returns(NonceResponse)]
    OutboundNonce {
        dst_chain_id: u16,
        src_address: String,
    },
    /// Last nonce delivered on an inbound path (0 if none)
    #[returns(NonceResponse)]
    InboundNonce {
        src_chain_id: u16,
        src_address: Binary,
    },
    #[returns(Config)]
    Config {},
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}
