//! Message types for the subnet bridge contract
//!
//! This module defines all messages for instantiation, execution, and queries.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128, Uint256};

use crate::ledger::{Ledger, LedgerMsg};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Initial admin role members (at least one)
    pub admins: Vec<String>,
    /// Transport endpoint contract
    pub endpoint: String,
    /// Native denom accepted as attached value
    pub native_denom: String,
    /// Bech32 prefix of accounts on this chain (e.g. "terra")
    pub address_prefix: String,
    /// Escrow or mirror ledger
    pub ledger: LedgerMsg,
    /// Whether sends may carry custom adapter params
    pub use_custom_adapter_params: bool,
    /// Chain ids accepted from the start
    pub allowed_chains: Vec<u16>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outgoing Transfers
    // ========================================================================
    /// Send `amount` to `to_address` on `dst_chain_id`.
    ///
    /// Escrow bridge: attach `amount` plus the transport budget in the native
    /// denom. Mirror bridge: approve the bridge for `amount` (plus `fee_amount`
    /// when fees are paid to a handler) and attach the transport budget.
    Send {
        dst_chain_id: u16,
        /// Recipient on the destination ledger (20 raw bytes)
        to_address: Binary,
        amount: Uint128,
        /// Receives any transport fee surplus
        refund_address: String,
        zro_payment_address: Option<String>,
        /// Empty unless custom adapter params are enabled
        adapter_params: Binary,
        /// Fee in the bridged token, only for transfer-to-handler fee policy
        fee_amount: Option<Uint128>,
    },

    // ========================================================================
    // Incoming Transfers
    // ========================================================================
    /// Delivery entry called by the transport endpoint
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    /// Receive body, only callable by the bridge itself through safe dispatch
    NonblockingReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    /// Replay a failed delivery with its original payload
    ///
    /// Authorization: Anyone
    RetryMessage {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    // ========================================================================
    // Escrow
    // ========================================================================
    /// Add attached native coin to escrow (escrow bridge only)
    DepositToEscrow {},

    /// Pay out of escrow (admin only, escrow bridge only)
    WithdrawFromEscrow { amount: Uint128, recipient: String },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Flip allowlist membership of a chain id
    ToggleChainId { chain_id: u16 },

    /// Enable or disable custom adapter params on sends
    SetUseCustomAdapterParams { enabled: bool },

    /// Minimum destination gas required in custom adapter params
    SetMinDstGas { chain_id: u16, min_gas: Uint256 },

    /// Add a member to the admin role
    GrantAdmin { address: String },

    /// Remove a member from the admin role (never the last one)
    RevokeAdmin { address: String },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // ========================================================================
    // Core Queries
    // ========================================================================
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns held value and cap of the bridge's ledger
    #[returns(SupplyResponse)]
    Supply {},

    // ========================================================================
    // Allowlist & Policy
    // ========================================================================
    #[returns(ChainAllowedResponse)]
    ChainAllowed { chain_id: u16 },

    /// Returns chain ids currently accepted (paginated)
    #[returns(AllowedChainsResponse)]
    AllowedChains {
        start_after: Option<u16>,
        limit: Option<u32>,
    },

    #[returns(UseCustomAdapterParamsResponse)]
    UseCustomAdapterParams {},

    #[returns(MinDstGasResponse)]
    MinDstGas { chain_id: u16 },

    // ========================================================================
    // Recovery
    // ========================================================================
    /// Returns the stored payload hash of a failed message, if any
    #[returns(FailedMessageResponse)]
    FailedMessage {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
    },

    /// Lists stored failed messages in key order
    #[returns(FailedMessagesResponse)]
    FailedMessages {
        /// Cursor: `(src_chain_id, src_address, nonce)` of the last item
        /// from the previous page
        start_after: Option<(u16, Binary, u64)>,
        limit: Option<u32>,
    },

    // ========================================================================
    // Fees
    // ========================================================================
    /// Transport fee quote for the exact message a send would publish
    #[returns(common::FeeEstimateResponse)]
    EstimateSendFee {
        dst_chain_id: u16,
        to_address: Binary,
        amount: Uint128,
        use_zro: bool,
        adapter_params: Binary,
    },

    // ========================================================================
    // Admin Role
    // ========================================================================
    #[returns(AdminsResponse)]
    Admins {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(IsAdminResponse)]
    IsAdmin { address: String },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub endpoint: Addr,
    pub native_denom: String,
    pub address_prefix: String,
    pub ledger: Ledger,
}

#[cw_serde]
pub struct SupplyResponse {
    /// "escrow" or "mirror"
    pub ledger: String,
    /// Escrow balance or mirror total supply
    pub held: Uint128,
    /// Mirror cap, none for escrow
    pub max_supply: Option<Uint128>,
}

#[cw_serde]
pub struct ChainAllowedResponse {
    pub chain_id: u16,
    pub allowed: bool,
}

#[cw_serde]
pub struct AllowedChainsResponse {
    pub chains: Vec<u16>,
}

#[cw_serde]
pub struct UseCustomAdapterParamsResponse {
    pub enabled: bool,
}

#[cw_serde]
pub struct MinDstGasResponse {
    pub chain_id: u16,
    pub min_gas: Uint256,
}

#[cw_serde]
pub struct FailedMessageResponse {
    /// keccak256 of the failed payload, none when no record exists
    pub payload_hash: Option<Binary>,
}

#[cw_serde]
pub struct FailedMessageEntry {
    pub src_chain_id: u16,
    pub src_address: Binary,
    pub nonce: u64,
    pub payload_hash: Binary,
}

#[cw_serde]
pub struct FailedMessagesResponse {
    pub messages: Vec<FailedMessageEntry>,
}

#[cw_serde]
pub struct AdminsResponse {
    pub admins: Vec<Addr>,
}

#[cw_serde]
pub struct IsAdminResponse {
    pub is_admin: bool,
}
