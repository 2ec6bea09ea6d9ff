//! Escrow handlers (deposit and admin withdrawal).
//!
//! Withdrawals are not checked against value owed to in-flight messages; the
//! admin is trusted to keep escrow covering outstanding mirror supply.

use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::attached_native;
use crate::ledger::{escrow_payout, Ledger};
use crate::state::{ensure_admin, CONFIG};

/// Add the attached native coin to escrow. Anyone may deposit.
pub fn execute_deposit_to_escrow(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.ledger.is_escrow() {
        return Err(ContractError::EscrowUnavailable);
    }

    let amount = attached_native(&info.funds, &config.native_denom)?;
    if amount.is_zero() {
        return Err(ContractError::NoFundsSent);
    }

    Ok(Response::new()
        .add_event(
            Event::new("escrow_deposited")
                .add_attribute("from", info.sender.to_string())
                .add_attribute("amount", amount.to_string()),
        )
        .add_attribute("method", "deposit_to_escrow"))
}

/// Pay `amount` out of escrow to `recipient` (admin only).
pub fn execute_withdraw_from_escrow(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    recipient: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    let denom = match &config.ledger {
        Ledger::Escrow { denom } => denom,
        Ledger::Mirror { .. } => return Err(ContractError::EscrowUnavailable),
    };

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }
    let recipient_addr = deps.api.addr_validate(&recipient)?;

    let payout = escrow_payout(
        &deps.querier,
        &env.contract.address,
        denom,
        &recipient_addr,
        amount,
    )?;

    Ok(Response::new()
        .add_message(payout)
        .add_event(
            Event::new("escrow_withdrawn")
                .add_attribute("recipient", recipient_addr.to_string())
                .add_attribute("amount", amount.to_string()),
        )
        .add_attribute("method", "withdraw_from_escrow"))
}
