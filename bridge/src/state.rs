//! State definitions for the subnet bridge contract
//!
//! Everything the bridge persists: configuration, the admin role set, the
//! chain allowlist, the adapter-params policy, and the failed-message table
//! used for recovery.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Storage, Uint256};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;
use crate::ledger::Ledger;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Transport endpoint allowed to deliver inbound messages
    pub endpoint: Addr,
    /// Native denom accepted as attached value (escrow coin and transport gas)
    pub native_denom: String,
    /// Bech32 prefix used to turn 20-byte payload addresses into accounts
    pub address_prefix: String,
    /// Ledger this bridge moves value on
    pub ledger: Ledger,
}

/// Context of the inbound delivery currently running under safe dispatch.
///
/// Written by `LzReceive` right before the self-call and consumed by `reply`,
/// which has no other way to learn which message it is replying for.
#[cw_serde]
pub struct PendingDelivery {
    pub src_chain_id: u16,
    pub src_address: Binary,
    pub nonce: u64,
    pub payload: Binary,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:subnet-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id of the safe-dispatch self-call
pub const DELIVERY_REPLY_ID: u64 = 1;

// ============================================================================
// State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Admin role members
/// Key: admin address, Value: whether active
pub const ADMINS: Map<&Addr, bool> = Map::new("admins");

/// Number of active admins
pub const ADMIN_COUNT: Item<u32> = Item::new("admin_count");

/// Chain allowlist
/// Key: chain id, Value: accepted
pub const ALLOWED_CHAINS: Map<u16, bool> = Map::new("allowed_chains");

/// Whether sends may carry custom adapter params
pub const USE_CUSTOM_ADAPTER_PARAMS: Item<bool> = Item::new("use_custom_adapter_params");

/// Minimum destination gas per chain, enforced on custom adapter params
pub const MIN_DST_GAS: Map<u16, Uint256> = Map::new("min_dst_gas");

/// Failed inbound messages awaiting retry
/// Key: (src_chain_id, src_address, nonce), Value: keccak256 of the payload
pub const FAILED_MESSAGES: Map<(u16, &[u8], u64), Binary> = Map::new("failed_messages");

/// Delivery in flight between `LzReceive` and its reply
pub const PENDING_DELIVERY: Item<PendingDelivery> = Item::new("pending_delivery");

// ============================================================================
// Helpers
// ============================================================================

pub fn is_admin(storage: &dyn Storage, addr: &Addr) -> Result<bool, ContractError> {
    Ok(ADMINS.may_load(storage, addr)?.unwrap_or(false))
}

/// Fail with `Unauthorized` unless `sender` holds the admin role.
pub fn ensure_admin(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if !is_admin(storage, sender)? {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn is_chain_allowed(storage: &dyn Storage, chain_id: u16) -> Result<bool, ContractError> {
    Ok(ALLOWED_CHAINS
        .may_load(storage, chain_id)?
        .unwrap_or(false))
}

/// Fail with `ChainNotAllowed` unless `chain_id` is on the allowlist.
pub fn ensure_chain_allowed(storage: &dyn Storage, chain_id: u16) -> Result<(), ContractError> {
    if !is_chain_allowed(storage, chain_id)? {
        return Err(ContractError::ChainNotAllowed { chain_id });
    }
    Ok(())
}
