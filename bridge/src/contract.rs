//! Subnet Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_deposit_to_escrow, execute_grant_admin, execute_lz_receive,
    execute_nonblocking_receive, execute_retry_message, execute_revoke_admin, execute_send,
    execute_set_min_dst_gas, execute_set_use_custom_adapter_params, execute_toggle_chain_id,
    execute_withdraw_from_escrow, reply_delivery, SendRequest,
};
use crate::ledger::Ledger;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_admins, query_allowed_chains, query_chain_allowed, query_config,
    query_estimate_send_fee, query_failed_message, query_failed_messages, query_is_admin,
    query_min_dst_gas, query_supply, query_use_custom_adapter_params,
};
use crate::state::{
    Config, ADMINS, ADMIN_COUNT, ALLOWED_CHAINS, CONFIG, CONTRACT_NAME, CONTRACT_VERSION,
    DELIVERY_REPLY_ID, USE_CUSTOM_ADAPTER_PARAMS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.admins.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "At least one admin required".to_string(),
        });
    }
    if msg.native_denom.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "native_denom must not be empty".to_string(),
        });
    }
    if msg.address_prefix.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "address_prefix must not be empty".to_string(),
        });
    }

    let endpoint = deps.api.addr_validate(&msg.endpoint)?;
    let ledger = msg.ledger.validate(deps.api)?;
    if let Ledger::Escrow { denom } = &ledger {
        if *denom != msg.native_denom {
            return Err(ContractError::InvalidConfig {
                reason: format!(
                    "escrow denom {} must match native denom {}",
                    denom, msg.native_denom
                ),
            });
        }
    }

    let config = Config {
        endpoint,
        native_denom: msg.native_denom,
        address_prefix: msg.address_prefix,
        ledger,
    };
    CONFIG.save(deps.storage, &config)?;

    // Initialize admin role
    let mut admin_count = 0u32;
    for admin_str in msg.admins {
        let admin = deps.api.addr_validate(&admin_str)?;
        if ADMINS.may_load(deps.storage, &admin)?.unwrap_or(false) {
            continue;
        }
        ADMINS.save(deps.storage, &admin, &true)?;
        admin_count += 1;
    }
    ADMIN_COUNT.save(deps.storage, &admin_count)?;

    for chain_id in &msg.allowed_chains {
        ALLOWED_CHAINS.save(deps.storage, *chain_id, &true)?;
    }

    USE_CUSTOM_ADAPTER_PARAMS.save(deps.storage, &msg.use_custom_adapter_params)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("endpoint", config.endpoint)
        .add_attribute("ledger", config.ledger.kind())
        .add_attribute("admin_count", admin_count.to_string())
        .add_attribute("allowed_chains", msg.allowed_chains.len().to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outgoing transfers
        ExecuteMsg::Send {
            dst_chain_id,
            to_address,
            amount,
            refund_address,
            zro_payment_address,
            adapter_params,
            fee_amount,
        } => execute_send(
            deps,
            env,
            info,
            SendRequest {
                dst_chain_id,
                to_address,
                amount,
                refund_address,
                zro_payment_address,
                adapter_params,
                fee_amount,
            },
        ),

        // Incoming transfers
        ExecuteMsg::LzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_lz_receive(deps, env, info, src_chain_id, src_address, nonce, payload),
        ExecuteMsg::NonblockingReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_nonblocking_receive(deps, env, info, src_chain_id, src_address, nonce, payload),
        ExecuteMsg::RetryMessage {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_retry_message(deps, env, src_chain_id, src_address, nonce, payload),

        // Escrow
        ExecuteMsg::DepositToEscrow {} => execute_deposit_to_escrow(deps, info),
        ExecuteMsg::WithdrawFromEscrow { amount, recipient } => {
            execute_withdraw_from_escrow(deps, env, info, amount, recipient)
        }

        // Admin operations
        ExecuteMsg::ToggleChainId { chain_id } => execute_toggle_chain_id(deps, info, chain_id),
        ExecuteMsg::SetUseCustomAdapterParams { enabled } => {
            execute_set_use_custom_adapter_params(deps, info, enabled)
        }
        ExecuteMsg::SetMinDstGas { chain_id, min_gas } => {
            execute_set_min_dst_gas(deps, info, chain_id, min_gas)
        }
        ExecuteMsg::GrantAdmin { address } => execute_grant_admin(deps, info, address),
        ExecuteMsg::RevokeAdmin { address } => execute_revoke_admin(deps, info, address),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        DELIVERY_REPLY_ID => reply_delivery(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Core queries
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Supply {} => to_json_binary(&query_supply(deps, env)?),

        // Allowlist & policy
        QueryMsg::ChainAllowed { chain_id } => {
            to_json_binary(&query_chain_allowed(deps, chain_id)?)
        }
        QueryMsg::AllowedChains { start_after, limit } => {
            to_json_binary(&query_allowed_chains(deps, start_after, limit)?)
        }
        QueryMsg::UseCustomAdapterParams {} => {
            to_json_binary(&query_use_custom_adapter_params(deps)?)
        }
        QueryMsg::MinDstGas { chain_id } => to_json_binary(&query_min_dst_gas(deps, chain_id)?),

        // Recovery
        QueryMsg::FailedMessage {
            src_chain_id,
            src_address,
            nonce,
        } => to_json_binary(&query_failed_message(
            deps,
            src_chain_id,
            src_address,
            nonce,
        )?),
        QueryMsg::FailedMessages { start_after, limit } => {
            to_json_binary(&query_failed_messages(deps, start_after, limit)?)
        }

        // Fees
        QueryMsg::EstimateSendFee {
            dst_chain_id,
            to_address,
            amount,
            use_zro,
            adapter_params,
        } => to_json_binary(&query_estimate_send_fee(
            deps,
            env,
            dst_chain_id,
            to_address,
            amount,
            use_zro,
            adapter_params,
        )?),

        // Admin role
        QueryMsg::Admins { start_after, limit } => {
            to_json_binary(&query_admins(deps, start_after, limit)?)
        }
        QueryMsg::IsAdmin { address } => to_json_binary(&query_is_admin(deps, address)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if USE_CUSTOM_ADAPTER_PARAMS.may_load(deps.storage)?.is_none() {
        USE_CUSTOM_ADAPTER_PARAMS.save(deps.storage, &false)?;
    }

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
