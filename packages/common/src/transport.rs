//! Transport interface shared by the bridge and the endpoint.
//!
//! The bridge only knows the endpoint through these messages. Each enum is a
//! subset of the full endpoint (or bridge) message set, serialized with the
//! same variant names so either side can decode it as its own message type.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

/// Outbound calls an application makes on the endpoint.
#[cw_serde]
pub enum TransportExecuteMsg {
    /// Publish `payload` to the application at the same path on `dst_chain_id`.
    ///
    /// Native funds attached to the call are the gas budget; any surplus over
    /// the endpoint's quote is refunded to `refund_address`.
    Send {
        dst_chain_id: u16,
        payload: Binary,
        refund_address: String,
        zro_payment_address: Option<String>,
        adapter_params: Binary,
    },
}

/// Fee quotes an application requests from the endpoint.
#[cw_serde]
pub enum TransportQueryMsg {
    EstimateFees {
        dst_chain_id: u16,
        user_application: String,
        payload: Binary,
        pay_in_zro: bool,
        adapter_params: Binary,
    },
}

#[cw_serde]
pub struct FeeEstimateResponse {
    /// Fee payable in the chain's native denom
    pub native_fee: Uint128,
    /// Fee payable in the alternate fee token (zero when unsupported)
    pub zro_fee: Uint128,
}

/// Inbound call the endpoint makes on the receiving application.
#[cw_serde]
pub enum ReceiverExecuteMsg {
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },
}
