//! Admin operations handlers.
//!
//! This module handles:
//! - Chain allowlist toggling
//! - Adapter-params policy and per-chain minimum destination gas
//! - Admin role membership

use cosmwasm_std::{DepsMut, Event, MessageInfo, Response, Uint256};

use crate::error::ContractError;
use crate::state::{
    ensure_admin, is_admin, is_chain_allowed, ADMINS, ADMIN_COUNT, ALLOWED_CHAINS, MIN_DST_GAS,
    USE_CUSTOM_ADAPTER_PARAMS,
};

// ============================================================================
// Chain Allowlist
// ============================================================================

/// Flip allowlist membership of `chain_id`.
///
/// There is no setter: callers reach a desired state by reading the current
/// one first. The event carries the state before the flip.
pub fn execute_toggle_chain_id(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;

    let previous = is_chain_allowed(deps.storage, chain_id)?;
    ALLOWED_CHAINS.save(deps.storage, chain_id, &!previous)?;

    let event = Event::new("chain_id_toggled")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("previous", previous.to_string())
        .add_attribute("allowed", (!previous).to_string());

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "toggle_chain_id"))
}

// ============================================================================
// Adapter Params Policy
// ============================================================================

pub fn execute_set_use_custom_adapter_params(
    deps: DepsMut,
    info: MessageInfo,
    enabled: bool,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;

    USE_CUSTOM_ADAPTER_PARAMS.save(deps.storage, &enabled)?;

    Ok(Response::new()
        .add_event(
            Event::new("set_use_custom_adapter_params")
                .add_attribute("enabled", enabled.to_string()),
        )
        .add_attribute("method", "set_use_custom_adapter_params"))
}

/// Set the minimum gas a custom adapter params blob must request for
/// `chain_id`. Zero is rejected; it would read as "not configured".
pub fn execute_set_min_dst_gas(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    min_gas: Uint256,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;

    if min_gas.is_zero() {
        return Err(ContractError::InvalidAdapterParams {
            reason: "minimum destination gas must be greater than zero".to_string(),
        });
    }
    MIN_DST_GAS.save(deps.storage, chain_id, &min_gas)?;

    Ok(Response::new()
        .add_event(
            Event::new("set_min_dst_gas")
                .add_attribute("chain_id", chain_id.to_string())
                .add_attribute("min_gas", min_gas.to_string()),
        )
        .add_attribute("method", "set_min_dst_gas"))
}

// ============================================================================
// Admin Role
// ============================================================================

/// Add an address to the admin role.
pub fn execute_grant_admin(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;

    let addr = deps.api.addr_validate(&address)?;
    if is_admin(deps.storage, &addr)? {
        return Err(ContractError::AdminAlreadyGranted);
    }

    ADMINS.save(deps.storage, &addr, &true)?;
    let count = ADMIN_COUNT.load(deps.storage)?;
    ADMIN_COUNT.save(deps.storage, &(count + 1))?;

    Ok(Response::new()
        .add_attribute("method", "grant_admin")
        .add_attribute("admin", addr))
}

/// Remove an address from the admin role.
pub fn execute_revoke_admin(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;

    let addr = deps.api.addr_validate(&address)?;
    if !is_admin(deps.storage, &addr)? {
        return Err(ContractError::AdminNotGranted);
    }

    let count = ADMIN_COUNT.load(deps.storage)?;
    if count <= 1 {
        return Err(ContractError::CannotRemoveLastAdmin);
    }

    ADMINS.remove(deps.storage, &addr);
    ADMIN_COUNT.save(deps.storage, &(count - 1))?;

    Ok(Response::new()
        .add_attribute("method", "revoke_admin")
        .add_attribute("admin", addr))
}
