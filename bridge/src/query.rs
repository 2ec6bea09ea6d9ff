//! Query handlers for the subnet bridge contract.

use cosmwasm_std::{Addr, Binary, Deps, Env, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use common::FeeEstimateResponse;

use crate::address_codec::raw_address;
use crate::envelope;
use crate::execute::quote_transport;
use crate::msg::{
    AdminsResponse, AllowedChainsResponse, ChainAllowedResponse, ConfigResponse,
    FailedMessageEntry, FailedMessageResponse, FailedMessagesResponse, IsAdminResponse,
    MinDstGasResponse, SupplyResponse, UseCustomAdapterParamsResponse,
};
use crate::state::{
    ADMINS, ALLOWED_CHAINS, CONFIG, FAILED_MESSAGES, MIN_DST_GAS, USE_CUSTOM_ADAPTER_PARAMS,
};

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        endpoint: config.endpoint,
        native_denom: config.native_denom,
        address_prefix: config.address_prefix,
        ledger: config.ledger,
    })
}

/// Query value held by the ledger.
pub fn query_supply(deps: Deps, env: Env) -> StdResult<SupplyResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(SupplyResponse {
        ledger: config.ledger.kind().to_string(),
        held: config.ledger.held(&deps.querier, &env.contract.address)?,
        max_supply: config.ledger.max_supply(),
    })
}

// ============================================================================
// Allowlist & Policy Queries
// ============================================================================

pub fn query_chain_allowed(deps: Deps, chain_id: u16) -> StdResult<ChainAllowedResponse> {
    let allowed = ALLOWED_CHAINS
        .may_load(deps.storage, chain_id)?
        .unwrap_or(false);
    Ok(ChainAllowedResponse { chain_id, allowed })
}

/// List accepted chain ids with pagination.
pub fn query_allowed_chains(
    deps: Deps,
    start_after: Option<u16>,
    limit: Option<u32>,
) -> StdResult<AllowedChainsResponse> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start = start_after.map(Bound::exclusive);

    let chains: Vec<u16> = ALLOWED_CHAINS
        .range(deps.storage, start, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((chain_id, true)) => Some(Ok(chain_id)),
            Ok((_, false)) => None,
            Err(e) => Some(Err(e)),
        })
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AllowedChainsResponse { chains })
}

pub fn query_use_custom_adapter_params(deps: Deps) -> StdResult<UseCustomAdapterParamsResponse> {
    let enabled = USE_CUSTOM_ADAPTER_PARAMS
        .may_load(deps.storage)?
        .unwrap_or(false);
    Ok(UseCustomAdapterParamsResponse { enabled })
}

pub fn query_min_dst_gas(deps: Deps, chain_id: u16) -> StdResult<MinDstGasResponse> {
    let min_gas = MIN_DST_GAS
        .may_load(deps.storage, chain_id)?
        .unwrap_or_default();
    Ok(MinDstGasResponse { chain_id, min_gas })
}

// ============================================================================
// Recovery Queries
// ============================================================================

pub fn query_failed_message(
    deps: Deps,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
) -> StdResult<FailedMessageResponse> {
    let payload_hash =
        FAILED_MESSAGES.may_load(deps.storage, (src_chain_id, src_address.as_slice(), nonce))?;
    Ok(FailedMessageResponse { payload_hash })
}

/// List stored failed messages in key order.
/// List failed messages ordered by `(src_chain_id, src_address, nonce)`.
pub fn query_failed_messages(
    deps: Deps,
    start_after: Option<(u16, Binary, u64)>,
    limit: Option<u32>,
) -> StdResult<FailedMessagesResponse> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start = start_after
        .as_ref()
        .map(|(chain_id, addr, nonce)| {
            Bound::exclusive((*chain_id, addr.as_slice(), *nonce))
        });

    let messages = FAILED_MESSAGES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let ((src_chain_id, src_address, nonce), payload_hash) = item?;
            Ok(FailedMessageEntry {
                src_chain_id,
                src_address: Binary::from(src_address),
                nonce,
                payload_hash,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(FailedMessagesResponse { messages })
}

// ============================================================================
// Fee Queries
// ============================================================================

/// Quote the transport fee for the payload a send with these arguments
/// would publish.
pub fn query_estimate_send_fee(
    deps: Deps,
    env: Env,
    dst_chain_id: u16,
    to_address: Binary,
    amount: Uint128,
    use_zro: bool,
    adapter_params: Binary,
) -> StdResult<FeeEstimateResponse> {
    let config = CONFIG.load(deps.storage)?;
    let to = raw_address(&to_address).map_err(|e| StdError::generic_err(e.to_string()))?;
    let payload = envelope::encode(&to, amount);

    quote_transport(
        &deps.querier,
        &config,
        &env.contract.address,
        dst_chain_id,
        &payload,
        use_zro,
        &adapter_params,
    )
}

// ============================================================================
// Admin Role Queries
// ============================================================================

pub fn query_admins(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AdminsResponse> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let admins: Vec<Addr> = ADMINS
        .range(deps.storage, start, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((addr, true)) => Some(Ok(addr)),
            Ok((_, false)) => None,
            Err(e) => Some(Err(e)),
        })
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AdminsResponse { admins })
}

pub fn query_is_admin(deps: Deps, address: String) -> StdResult<IsAdminResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let is_admin = ADMINS.may_load(deps.storage, &addr)?.unwrap_or(false);
    Ok(IsAdminResponse { is_admin })
}
