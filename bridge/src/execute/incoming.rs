//! Incoming transfer handlers (safe dispatch, receive body, retry).
//!
//! Delivery runs in two layers:
//!
//! 1. `LzReceive` is called by the transport endpoint. It checks the caller
//!    and the source chain, then calls the bridge itself with
//!    `NonblockingReceive` as a `reply_always` sub-message.
//! 2. `NonblockingReceive` decodes the envelope and credits the ledger. If
//!    it fails, only its own state changes are rolled back; the reply stores a
//!    failed-message record and the transport's call still succeeds.
//!
//! `RetryMessage` replays a recorded failure by running the receive body
//! directly, so a second failure reverts the retry and keeps the record.

use cosmwasm_std::{
    to_json_binary, Binary, DepsMut, Env, Event, MessageInfo, Reply, Response, SubMsg,
    SubMsgResult, Uint128, WasmMsg,
};

use crate::address_codec::account_from_raw;
use crate::envelope::Envelope;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, bytes_to_hex, payload_hash};
use crate::msg::ExecuteMsg;
use crate::state::{
    ensure_chain_allowed, PendingDelivery, CONFIG, DELIVERY_REPLY_ID, FAILED_MESSAGES,
    PENDING_DELIVERY,
};

// ============================================================================
// Safe Dispatch
// ============================================================================

/// Transport entry: guard, then dispatch the receive body to ourselves.
pub fn execute_lz_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.endpoint {
        return Err(ContractError::UnauthorizedEndpoint);
    }

    // Unknown sources fail the whole call and leave no record
    ensure_chain_allowed(deps.storage, src_chain_id)?;

    PENDING_DELIVERY.save(
        deps.storage,
        &PendingDelivery {
            src_chain_id,
            src_address: src_address.clone(),
            nonce,
            payload: payload.clone(),
        },
    )?;

    let dispatch = WasmMsg::Execute {
        contract_addr: env.contract.address.to_string(),
        msg: to_json_binary(&ExecuteMsg::NonblockingReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(dispatch, DELIVERY_REPLY_ID))
        .add_attribute("method", "lz_receive")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("nonce", nonce.to_string()))
}

/// Receive body behind safe dispatch. Only the bridge may call it.
pub fn execute_nonblocking_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::CallerNotBridge);
    }

    let response = deliver(deps, &env, src_chain_id, &src_address, nonce, &payload)?;
    Ok(response.add_attribute("method", "nonblocking_receive"))
}

/// Reply of the safe-dispatch self-call.
pub fn reply_delivery(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_DELIVERY.load(deps.storage)?;
    PENDING_DELIVERY.remove(deps.storage);

    match msg.result {
        SubMsgResult::Ok(_) => Ok(Response::new()
            .add_attribute("method", "delivery_reply")
            .add_attribute("status", "delivered")),
        SubMsgResult::Err(reason) => {
            let hash = payload_hash(&pending.payload);
            FAILED_MESSAGES.save(
                deps.storage,
                (
                    pending.src_chain_id,
                    pending.src_address.as_slice(),
                    pending.nonce,
                ),
                &Binary::from(hash.to_vec()),
            )?;

            let event = Event::new("message_failed")
                .add_attribute("src_chain_id", pending.src_chain_id.to_string())
                .add_attribute("src_address", bytes_to_hex(&pending.src_address))
                .add_attribute("nonce", pending.nonce.to_string())
                .add_attribute("payload_hash", bytes32_to_hex(&hash))
                .add_attribute("reason", reason);

            Ok(Response::new()
                .add_event(event)
                .add_attribute("method", "delivery_reply")
                .add_attribute("status", "failed"))
        }
    }
}

// ============================================================================
// Recovery
// ============================================================================

/// Replay a failed message. Callable by anyone holding the original payload.
pub fn execute_retry_message(
    deps: DepsMut,
    env: Env,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    let key = (src_chain_id, src_address.as_slice(), nonce);
    let stored = FAILED_MESSAGES
        .may_load(deps.storage, key)?
        .ok_or(ContractError::NoStoredMessage {
            src_chain_id,
            nonce,
        })?;

    let hash = payload_hash(&payload);
    if stored.as_slice() != hash.as_slice() {
        return Err(ContractError::PayloadHashMismatch);
    }

    FAILED_MESSAGES.remove(deps.storage, key);

    let response = deliver(deps, &env, src_chain_id, &src_address, nonce, &payload)?;

    let event = Event::new("retry_message_success")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("src_address", bytes_to_hex(&src_address))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("payload_hash", bytes32_to_hex(&hash));

    Ok(response
        .add_event(event)
        .add_attribute("method", "retry_message"))
}

// ============================================================================
// Receive Body
// ============================================================================

/// Decode the envelope and credit the recipient.
fn deliver(
    deps: DepsMut,
    env: &Env,
    src_chain_id: u16,
    src_address: &Binary,
    nonce: u64,
    payload: &Binary,
) -> Result<Response, ContractError> {
    ensure_chain_allowed(deps.storage, src_chain_id)?;

    let (to, amount) = Envelope::decode_for_delivery(payload)?;
    if amount == Uint128::zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Delivered amount must be greater than zero".to_string(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let recipient = account_from_raw(deps.api, &to, &config.address_prefix)?;
    let credit =
        config
            .ledger
            .credit(&deps.querier, &env.contract.address, &recipient, amount)?;

    let event = Event::new("receive_from_chain")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("src_address", bytes_to_hex(src_address))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("to", recipient.to_string())
        .add_attribute("amount", amount.to_string());

    let mut response = Response::new().add_message(credit.message);
    if let Some(mint) = credit.event {
        response = response.add_event(mint);
    }
    Ok(response.add_event(event))
}
