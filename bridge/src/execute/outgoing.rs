//! Outgoing transfer handler (Send).
//!
//! A send debits the ledger, wraps `(to_address, amount)` in an envelope and
//! publishes it through the transport endpoint with whatever native value is
//! left over as the transport's gas budget.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, Coin, CosmosMsg, DepsMut, Env, Event, MessageInfo,
    QuerierWrapper, Response, StdResult, Storage, Uint128, WasmMsg,
};

use common::{FeeEstimateResponse, TransportExecuteMsg, TransportQueryMsg};

use crate::adapter_params;
use crate::address_codec::raw_address;
use crate::envelope;
use crate::error::ContractError;
use crate::execute::attached_native;
use crate::hash::bytes_to_hex;
use crate::ledger::Ledger;
use crate::state::{
    ensure_chain_allowed, Config, CONFIG, MIN_DST_GAS, USE_CUSTOM_ADAPTER_PARAMS,
};

/// Arguments of an outbound send
pub struct SendRequest {
    pub dst_chain_id: u16,
    pub to_address: Binary,
    pub amount: Uint128,
    pub refund_address: String,
    pub zro_payment_address: Option<String>,
    pub adapter_params: Binary,
    pub fee_amount: Option<Uint128>,
}

/// Execute handler for sending value to another chain
pub fn execute_send(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    req: SendRequest,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    ensure_chain_allowed(deps.storage, req.dst_chain_id)?;

    if req.amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }
    let to = raw_address(&req.to_address)?;
    let refund_address = deps.api.addr_validate(&req.refund_address)?;
    let zro_payment_address = req
        .zro_payment_address
        .as_deref()
        .map(|addr| deps.api.addr_validate(addr))
        .transpose()?;

    check_adapter_params(deps.storage, req.dst_chain_id, &req.adapter_params)?;

    let attached = attached_native(&info.funds, &config.native_denom)?;
    let payload = envelope::encode(&to, req.amount);

    // Ledger debit plus the native budget left for the transport
    let mut messages: Vec<CosmosMsg> = vec![];
    let (gas_budget, fee_policy) = match &config.ledger {
        Ledger::Escrow { .. } => {
            if req.fee_amount.map_or(false, |f| !f.is_zero()) {
                return Err(ContractError::InvalidAmount {
                    reason: "fee_amount is not used by an escrow bridge".to_string(),
                });
            }
            if attached <= req.amount {
                return Err(ContractError::InsufficientValue {
                    amount: req.amount,
                    got: attached,
                });
            }
            (attached - req.amount, None)
        }
        Ledger::Mirror {
            token, fee_policy, ..
        } => {
            let fee_msg = fee_policy.collect(
                token,
                &info.sender,
                req.fee_amount,
                attached,
                || {
                    quote_transport(
                        &deps.querier,
                        &config,
                        &env.contract.address,
                        req.dst_chain_id,
                        &payload,
                        zro_payment_address.is_some(),
                        &req.adapter_params,
                    )
                    .map(|quote| quote.native_fee)
                },
            )?;
            messages.extend(fee_msg);
            (attached, Some(fee_policy.as_str()))
        }
    };
    messages.extend(config.ledger.debit(&info.sender, req.amount)?);

    let funds = if gas_budget.is_zero() {
        vec![]
    } else {
        vec![Coin {
            denom: config.native_denom.clone(),
            amount: gas_budget,
        }]
    };
    messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.endpoint.to_string(),
        msg: to_json_binary(&TransportExecuteMsg::Send {
            dst_chain_id: req.dst_chain_id,
            payload,
            refund_address: refund_address.to_string(),
            zro_payment_address: zro_payment_address.map(|a| a.to_string()),
            adapter_params: req.adapter_params.clone(),
        })?,
        funds,
    }));

    let event = Event::new("send_to_chain")
        .add_attribute("dst_chain_id", req.dst_chain_id.to_string())
        .add_attribute("from", info.sender.to_string())
        .add_attribute("to_address", bytes_to_hex(&to))
        .add_attribute("amount", req.amount.to_string())
        .add_attribute("gas_budget", gas_budget.to_string());

    let mut response = Response::new()
        .add_messages(messages)
        .add_event(event)
        .add_attribute("method", "send")
        .add_attribute("ledger", config.ledger.kind());
    if let Some(policy) = fee_policy {
        response = response.add_attribute("fee_policy", policy);
    }

    Ok(response)
}

/// Enforce the custom adapter-params policy for a destination.
///
/// Disabled: params must be empty. Enabled: params must decode and carry at
/// least the destination's configured minimum gas.
pub fn check_adapter_params(
    storage: &dyn Storage,
    dst_chain_id: u16,
    params: &[u8],
) -> Result<(), ContractError> {
    let custom = USE_CUSTOM_ADAPTER_PARAMS
        .may_load(storage)?
        .unwrap_or(false);
    if !custom {
        if !params.is_empty() {
            return Err(ContractError::AdapterParamsNotAllowed);
        }
        return Ok(());
    }

    let decoded = adapter_params::decode(params)?;
    let min_gas = MIN_DST_GAS
        .may_load(storage, dst_chain_id)?
        .unwrap_or_default();
    if min_gas.is_zero() {
        return Err(ContractError::MinGasLimitNotSet {
            chain_id: dst_chain_id,
        });
    }
    if decoded.gas_limit() < min_gas {
        return Err(ContractError::GasLimitTooLow {
            min: min_gas.to_string(),
            got: decoded.gas_limit().to_string(),
        });
    }
    Ok(())
}

/// Ask the transport what publishing `payload` would cost.
pub fn quote_transport(
    querier: &QuerierWrapper,
    config: &Config,
    user_application: &Addr,
    dst_chain_id: u16,
    payload: &Binary,
    pay_in_zro: bool,
    adapter_params: &Binary,
) -> StdResult<FeeEstimateResponse> {
    querier.query_wasm_smart(
        config.endpoint.to_string(),
        &TransportQueryMsg::EstimateFees {
            dst_chain_id,
            user_application: user_application.to_string(),
            payload: payload.clone(),
            pay_in_zro,
            adapter_params: adapter_params.clone(),
        },
    )
}
