use cosmwasm_std::{
    entry_point, to_json_binary, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, Event,
    MessageInfo, Response, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;

use common::{FeeEstimateResponse, ReceiverExecuteMsg};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, NonceResponse, QueryMsg};
use crate::state::{
    Config, Packet, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, INBOUND_NONCE, OUTBOUND_NONCE,
    PACKETS,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        chain_id: msg.chain_id,
        admin: deps.api.addr_validate(&msg.admin)?,
        relayer: deps.api.addr_validate(&msg.relayer)?,
        native_denom: msg.native_denom,
        base_fee: msg.base_fee,
        fee_per_byte: msg.fee_per_byte,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("chain_id", config.chain_id.to_string())
        .add_attribute("relayer", config.relayer))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Send {
            dst_chain_id,
            payload,
            refund_address,
            zro_payment_address: _,
            adapter_params,
        } => execute_send(deps, info, dst_chain_id, payload, refund_address, adapter_params),
        ExecuteMsg::Deliver {
            src_chain_id,
            src_address,
            nonce,
            receiver,
            payload,
        } => execute_deliver(deps, info, src_chain_id, src_address, nonce, receiver, payload),
        ExecuteMsg::SetFees {
            base_fee,
            fee_per_byte,
        } => execute_set_fees(deps, info, base_fee, fee_per_byte),
    }
}

/// Quote for publishing a payload of `len` bytes
fn quote(config: &Config, len: usize) -> StdResult<Uint128> {
    let per_byte = config.fee_per_byte.checked_mul(Uint128::from(len as u128))?;
    Ok(config.base_fee.checked_add(per_byte)?)
}

fn execute_send(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_id: u16,
    payload: Binary,
    refund_address: String,
    adapter_params: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if payload.is_empty() {
        return Err(ContractError::EmptyPayload);
    }
    let refund_address = deps.api.addr_validate(&refund_address)?;

    let mut attached = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != config.native_denom {
            return Err(ContractError::InvalidFunds {
                reason: format!("Only {} is accepted", config.native_denom),
            });
        }
        attached = attached.checked_add(coin.amount).map_err(cosmwasm_std::StdError::from)?;
    }

    let fee = quote(&config, payload.len())?;
    if attached < fee {
        return Err(ContractError::InsufficientFee {
            expected: fee,
            got: attached,
        });
    }

    let nonce = OUTBOUND_NONCE
        .may_load(deps.storage, (dst_chain_id, &info.sender))?
        .unwrap_or(0)
        + 1;
    OUTBOUND_NONCE.save(deps.storage, (dst_chain_id, &info.sender), &nonce)?;

    let packet = Packet {
        dst_chain_id,
        src_address: info.sender.clone(),
        nonce,
        payload,
        adapter_params,
        gas_budget: attached,
        fee,
    };
    PACKETS.save(deps.storage, (dst_chain_id, &info.sender, nonce), &packet)?;

    let mut messages: Vec<CosmosMsg> = vec![];
    let refund = attached - fee;
    if !refund.is_zero() {
        messages.push(CosmosMsg::Bank(BankMsg::Send {
            to_address: refund_address.to_string(),
            amount: vec![Coin {
                denom: config.native_denom.clone(),
                amount: refund,
            }],
        }));
    }

    let event = Event::new("packet_sent")
        .add_attribute("src_chain_id", config.chain_id.to_string())
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("src_address", info.sender.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("payload", packet.payload.to_base64())
        .add_attribute("gas_budget", attached.to_string())
        .add_attribute("fee", fee.to_string());

    Ok(Response::new()
        .add_messages(messages)
        .add_event(event)
        .add_attribute("action", "send")
        .add_attribute("refund", refund.to_string()))
}

fn execute_deliver(
    deps: DepsMut,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    receiver: String,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.relayer {
        return Err(ContractError::UnauthorizedRelayer);
    }

    let receiver = deps.api.addr_validate(&receiver)?;
    let path = (src_chain_id, src_address.as_slice());
    let expected = INBOUND_NONCE.may_load(deps.storage, path)?.unwrap_or(0) + 1;
    if nonce != expected {
        return Err(ContractError::InvalidNonce {
            expected,
            got: nonce,
        });
    }
    INBOUND_NONCE.save(deps.storage, path, &nonce)?;

    let receive_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: receiver.to_string(),
        msg: to_json_binary(&ReceiverExecuteMsg::LzReceive {
            src_chain_id,
            src_address: src_address.clone(),
            nonce,
            payload,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(receive_msg)
        .add_attribute("action", "deliver")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("receiver", receiver))
}

fn execute_set_fees(
    deps: DepsMut,
    info: MessageInfo,
    base_fee: Uint128,
    fee_per_byte: Uint128,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.base_fee = base_fee;
    config.fee_per_byte = fee_per_byte;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_fees")
        .add_attribute("base_fee", base_fee)
        .add_attribute("fee_per_byte", fee_per_byte))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::EstimateFees { payload, .. } => {
            to_json_binary(&query_estimate_fees(deps, payload)?)
        }
        QueryMsg::Packet {
            dst_chain_id,
            src_address,
            nonce,
        } => {
            let src = deps.api.addr_validate(&src_address)?;
            to_json_binary(&PACKETS.load(deps.storage, (dst_chain_id, &src, nonce))?)
        }
        QueryMsg::OutboundNonce {
            dst_chain_id,
            src_address,
        } => {
            let src = deps.api.addr_validate(&src_address)?;
            let nonce = OUTBOUND_NONCE
                .may_load(deps.storage, (dst_chain_id, &src))?
                .unwrap_or(0);
            to_json_binary(&NonceResponse { nonce })
        }
        QueryMsg::InboundNonce {
            src_chain_id,
            src_address,
        } => {
            let nonce = INBOUND_NONCE
                .may_load(deps.storage, (src_chain_id, src_address.as_slice()))?
                .unwrap_or(0);
            to_json_binary(&NonceResponse { nonce })
        }
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
    }
}

fn query_estimate_fees(deps: Deps, payload: Binary) -> StdResult<FeeEstimateResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(FeeEstimateResponse {
        native_fee: quote(&config, payload.len())?,
        zro_fee: Uint128::zero(),
    })
}
