//! Fee Policy
//!
//! A mirror bridge pays the transport in one of two ways, fixed at
//! instantiation:
//!
//! | Policy              | Chain role | Fee source                                  |
//! |---------------------|------------|---------------------------------------------|
//! | `TransferToHandler` | home       | CW20 fee moved from the sender to a handler |
//! | `AttachedNative`    | remote     | native coin attached to the send            |
//!
//! The escrow side never consults a policy: its attached surplus over the
//! transfer amount is the transport budget.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, Api, CosmosMsg, StdResult, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;

/// Fee payment strategy for mirror-side sends
#[cw_serde]
pub enum FeePolicy {
    /// Sender pays `fee_amount` of the bridged token to `handler`
    TransferToHandler { handler: Addr },
    /// Sender attaches native coin covering the transport quote
    AttachedNative,
}

/// Unvalidated fee policy as supplied in an instantiate message
#[cw_serde]
pub enum FeePolicyMsg {
    TransferToHandler { handler: String },
    AttachedNative {},
}

impl FeePolicyMsg {
    pub fn validate(self, api: &dyn Api) -> StdResult<FeePolicy> {
        Ok(match self {
            FeePolicyMsg::TransferToHandler { handler } => FeePolicy::TransferToHandler {
                handler: api.addr_validate(&handler)?,
            },
            FeePolicyMsg::AttachedNative {} => FeePolicy::AttachedNative,
        })
    }
}

impl FeePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeePolicy::TransferToHandler { .. } => "transfer_to_handler",
            FeePolicy::AttachedNative => "attached_native",
        }
    }

    /// Collect the fee for a send of the mirror `token`.
    ///
    /// Returns the CW20 transfer to emit, if any. `quote` is only called for
    /// `AttachedNative` and yields the transport's native fee for the exact
    /// message being sent.
    pub fn collect<F>(
        &self,
        token: &Addr,
        sender: &Addr,
        fee_amount: Option<Uint128>,
        attached_native: Uint128,
        quote: F,
    ) -> Result<Option<CosmosMsg>, ContractError>
    where
        F: FnOnce() -> StdResult<Uint128>,
    {
        match self {
            FeePolicy::TransferToHandler { handler } => {
                let fee = fee_amount
                    .filter(|f| !f.is_zero())
                    .ok_or(ContractError::FeeRequired)?;

                let msg = CosmosMsg::Wasm(WasmMsg::Execute {
                    contract_addr: token.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                        owner: sender.to_string(),
                        recipient: handler.to_string(),
                        amount: fee,
                    })?,
                    funds: vec![],
                });
                Ok(Some(msg))
            }
            FeePolicy::AttachedNative => {
                if fee_amount.map_or(false, |f| !f.is_zero()) {
                    return Err(ContractError::InvalidAmount {
                        reason: "fee_amount is not used when the fee is paid in native coin"
                            .to_string(),
                    });
                }

                let native_fee = quote()?;
                if attached_native < native_fee {
                    return Err(ContractError::InsufficientFee {
                        expected: native_fee,
                        got: attached_native,
                    });
                }
                Ok(None)
            }
        }
    }
}
