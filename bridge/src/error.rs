//! Error types for the subnet bridge contract
//!
//! Grouped by how the bridge treats them: everything is fatal to the call
//! that raised it, except failures inside the inbound credit step, which the
//! delivery wrapper converts into a stored failed-message record.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller is not the transport endpoint")]
    UnauthorizedEndpoint,

    #[error("Unauthorized: receive can only be dispatched by the bridge itself")]
    CallerNotBridge,

    #[error("Chain not allowed: {chain_id}")]
    ChainNotAllowed { chain_id: u16 },

    // ========================================================================
    // Admin Role Errors
    // ========================================================================

    #[error("Admin already granted")]
    AdminAlreadyGranted,

    #[error("Admin not granted")]
    AdminNotGranted,

    #[error("Cannot remove last admin")]
    CannotRemoveLastAdmin,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid address length: expected {expected} bytes, got {got}")]
    InvalidAddressLength { expected: usize, got: usize },

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    #[error("No funds sent")]
    NoFundsSent,

    #[error("Insufficient value: attached {got} must exceed amount {amount}")]
    InsufficientValue { amount: Uint128, got: Uint128 },

    #[error("Insufficient fee: expected {expected}, got {got}")]
    InsufficientFee { expected: Uint128, got: Uint128 },

    #[error("Fee payment required for this bridge")]
    FeeRequired,

    // ========================================================================
    // Adapter Params Errors
    // ========================================================================

    #[error("Invalid adapter params: {reason}")]
    InvalidAdapterParams { reason: String },

    #[error("Adapter params must be empty while custom adapter params are disabled")]
    AdapterParamsNotAllowed,

    #[error("Minimum destination gas not set for chain {chain_id}")]
    MinGasLimitNotSet { chain_id: u16 },

    #[error("Gas limit too low: minimum {min}, got {got}")]
    GasLimitTooLow { min: String, got: String },

    // ========================================================================
    // Payload Errors
    // ========================================================================

    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    // ========================================================================
    // Capacity Errors
    // ========================================================================

    #[error("Supply exhausted: minting {amount} over supply {supply} exceeds max supply {max_supply}")]
    SupplyExhausted {
        supply: Uint128,
        amount: Uint128,
        max_supply: Uint128,
    },

    #[error("Minting to the bridge contract is not allowed")]
    NoMintingToContract,

    // ========================================================================
    // Transport Errors
    // ========================================================================

    #[error("Transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Escrow operations are not available on a mirror bridge")]
    EscrowUnavailable,

    // ========================================================================
    // Recovery Errors
    // ========================================================================

    #[error("No stored message for chain {src_chain_id} nonce {nonce}")]
    NoStoredMessage { src_chain_id: u16, nonce: u64 },

    #[error("Invalid payload: hash does not match stored message")]
    PayloadHashMismatch,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
