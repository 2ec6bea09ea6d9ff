//! Ledger Adapter
//!
//! The bridge moves value on exactly one ledger per deployment:
//!
//! - `Escrow` holds the chain's native coin in the contract's own bank
//!   balance. Debit is the coin attached to a send; credit pays it back out.
//! - `Mirror` drives a CW20 token whose only minter is the bridge. Debit burns
//!   from the payer (allowance required); credit mints, bounded by a cap.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Api, BankMsg, Coin, CosmosMsg, Event, QuerierWrapper, StdResult,
    Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

use crate::error::ContractError;
use crate::fee_policy::{FeePolicy, FeePolicyMsg};

/// Ledger this bridge instance moves value on
#[cw_serde]
pub enum Ledger {
    /// Native coin held in escrow by the bridge (canonical side)
    Escrow { denom: String },
    /// Mint/burn CW20 mirror (non-canonical side)
    Mirror {
        token: Addr,
        max_supply: Uint128,
        fee_policy: FeePolicy,
    },
}

/// Unvalidated ledger selection as supplied in an instantiate message
#[cw_serde]
pub enum LedgerMsg {
    Escrow {
        denom: String,
    },
    Mirror {
        token: String,
        max_supply: Uint128,
        fee_policy: FeePolicyMsg,
    },
}

impl LedgerMsg {
    pub fn validate(self, api: &dyn Api) -> Result<Ledger, ContractError> {
        match self {
            LedgerMsg::Escrow { denom } => {
                if denom.is_empty() {
                    return Err(ContractError::InvalidConfig {
                        reason: "escrow denom must not be empty".to_string(),
                    });
                }
                Ok(Ledger::Escrow { denom })
            }
            LedgerMsg::Mirror {
                token,
                max_supply,
                fee_policy,
            } => {
                if max_supply.is_zero() {
                    return Err(ContractError::InvalidConfig {
                        reason: "max_supply must be greater than zero".to_string(),
                    });
                }
                Ok(Ledger::Mirror {
                    token: api.addr_validate(&token)?,
                    max_supply,
                    fee_policy: fee_policy.validate(api)?,
                })
            }
        }
    }
}

/// Messages and events produced by crediting the ledger
#[derive(Debug)]
pub struct Credit {
    pub message: CosmosMsg,
    pub event: Option<Event>,
}

impl Ledger {
    pub fn kind(&self) -> &'static str {
        match self {
            Ledger::Escrow { .. } => "escrow",
            Ledger::Mirror { .. } => "mirror",
        }
    }

    pub fn is_escrow(&self) -> bool {
        matches!(self, Ledger::Escrow { .. })
    }

    /// Take `amount` from `payer` on behalf of an outbound send.
    ///
    /// Escrow needs no message: the coin arrived with the call and the caller
    /// has already checked it. Mirror burns from the payer's allowance.
    pub fn debit(&self, payer: &Addr, amount: Uint128) -> StdResult<Vec<CosmosMsg>> {
        match self {
            Ledger::Escrow { .. } => Ok(vec![]),
            Ledger::Mirror { token, .. } => Ok(vec![CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::BurnFrom {
                    owner: payer.to_string(),
                    amount,
                })?,
                funds: vec![],
            })]),
        }
    }

    /// Give `amount` to `recipient`.
    ///
    /// Fails with `TransferFailed` when escrow cannot cover the payout, with
    /// `NoMintingToContract` when a mint would land on the bridge, and with
    /// `SupplyExhausted` when a mint would push supply over the cap.
    pub fn credit(
        &self,
        querier: &QuerierWrapper,
        contract: &Addr,
        recipient: &Addr,
        amount: Uint128,
    ) -> Result<Credit, ContractError> {
        match self {
            Ledger::Escrow { denom } => {
                let message = escrow_payout(querier, contract, denom, recipient, amount)?;
                Ok(Credit {
                    message,
                    event: None,
                })
            }
            Ledger::Mirror {
                token, max_supply, ..
            } => {
                if recipient == contract {
                    return Err(ContractError::NoMintingToContract);
                }

                let supply = mirror_supply(querier, token)?;
                let new_supply = match supply.checked_add(amount) {
                    Ok(total) if total <= *max_supply => total,
                    _ => {
                        return Err(ContractError::SupplyExhausted {
                            supply,
                            amount,
                            max_supply: *max_supply,
                        })
                    }
                };

                let message = CosmosMsg::Wasm(WasmMsg::Execute {
                    contract_addr: token.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::Mint {
                        recipient: recipient.to_string(),
                        amount,
                    })?,
                    funds: vec![],
                });
                let event = Event::new("mint")
                    .add_attribute("token", token.to_string())
                    .add_attribute("recipient", recipient.to_string())
                    .add_attribute("amount", amount.to_string())
                    .add_attribute("total_supply", new_supply.to_string());

                Ok(Credit {
                    message,
                    event: Some(event),
                })
            }
        }
    }

    /// Value currently held by the ledger: escrow balance or mirror supply.
    pub fn held(&self, querier: &QuerierWrapper, contract: &Addr) -> StdResult<Uint128> {
        match self {
            Ledger::Escrow { denom } => Ok(querier.query_balance(contract, denom)?.amount),
            Ledger::Mirror { token, .. } => mirror_supply(querier, token),
        }
    }

    pub fn max_supply(&self) -> Option<Uint128> {
        match self {
            Ledger::Escrow { .. } => None,
            Ledger::Mirror { max_supply, .. } => Some(*max_supply),
        }
    }
}

/// Bank transfer out of escrow, checked against the contract's balance.
pub fn escrow_payout(
    querier: &QuerierWrapper,
    contract: &Addr,
    denom: &str,
    recipient: &Addr,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    let balance = querier.query_balance(contract, denom)?.amount;
    if balance < amount {
        return Err(ContractError::TransferFailed {
            reason: format!(
                "escrow holds {}{} but {}{} is owed",
                balance, denom, amount, denom
            ),
        });
    }

    Ok(CosmosMsg::Bank(BankMsg::Send {
        to_address: recipient.to_string(),
        amount: vec![Coin {
            denom: denom.to_string(),
            amount,
        }],
    }))
}

fn mirror_supply(querier: &QuerierWrapper, token: &Addr) -> StdResult<Uint128> {
    let info: TokenInfoResponse =
        querier.query_wasm_smart(token.to_string(), &Cw20QueryMsg::TokenInfo {})?;
    Ok(info.total_supply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{
        mock_dependencies, mock_dependencies_with_balance, MockApi, MockQuerier, MockStorage,
        MOCK_CONTRACT_ADDR,
    };
    use cosmwasm_std::{coins, from_json, ContractResult, OwnedDeps, SystemResult, WasmQuery};

    const CONTRACT: &str = MOCK_CONTRACT_ADDR;

    fn mirror(max_supply: u128) -> Ledger {
        Ledger::Mirror {
            token: Addr::unchecked("terra1token"),
            max_supply: Uint128::new(max_supply),
            fee_policy: FeePolicy::AttachedNative,
        }
    }

    fn mock_supply(deps: &mut OwnedDeps<MockStorage, MockApi, MockQuerier>, supply: u128) {
        deps.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { .. } => {
                let info = TokenInfoResponse {
                    name: "Mirror".to_string(),
                    symbol: "MIRR".to_string(),
                    decimals: 6,
                    total_supply: Uint128::new(supply),
                };
                SystemResult::Ok(ContractResult::Ok(to_json_binary(&info).unwrap()))
            }
            _ => panic!("unexpected query"),
        });
    }

    #[test]
    fn test_escrow_debit_has_no_messages() {
        let ledger = Ledger::Escrow {
            denom: "uluna".to_string(),
        };
        assert!(ledger
            .debit(&Addr::unchecked("terra1user"), Uint128::new(5))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_mirror_debit_burns_from_payer() {
        let msgs = mirror(1_000)
            .debit(&Addr::unchecked("terra1user"), Uint128::new(50))
            .unwrap();
        assert_eq!(msgs.len(), 1);
        match &msgs[0] {
            CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) => {
                let parsed: Cw20ExecuteMsg = from_json(msg).unwrap();
                assert_eq!(
                    parsed,
                    Cw20ExecuteMsg::BurnFrom {
                        owner: "terra1user".to_string(),
                        amount: Uint128::new(50),
                    }
                );
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_escrow_credit_requires_balance() {
        let deps = mock_dependencies_with_balance(&coins(100, "uluna"));
        let ledger = Ledger::Escrow {
            denom: "uluna".to_string(),
        };
        let contract = Addr::unchecked(CONTRACT);
        let recipient = Addr::unchecked("terra1user");
        let querier = deps.as_ref().querier;

        let credit = ledger
            .credit(&querier, &contract, &recipient, Uint128::new(100))
            .unwrap();
        assert!(credit.event.is_none());
        assert_eq!(
            credit.message,
            CosmosMsg::Bank(BankMsg::Send {
                to_address: "terra1user".to_string(),
                amount: coins(100, "uluna"),
            })
        );

        let err = ledger
            .credit(&querier, &contract, &recipient, Uint128::new(101))
            .unwrap_err();
        assert!(matches!(err, ContractError::TransferFailed { .. }));
    }

    #[test]
    fn test_mirror_credit_rejects_self() {
        let mut deps = mock_dependencies();
        mock_supply(&mut deps, 0);
        let contract = Addr::unchecked(CONTRACT);
        let err = mirror(1_000)
            .credit(&deps.as_ref().querier, &contract, &contract, Uint128::new(1))
            .unwrap_err();
        assert_eq!(err, ContractError::NoMintingToContract);
    }

    #[test]
    fn test_mirror_credit_enforces_cap() {
        let mut deps = mock_dependencies();
        mock_supply(&mut deps, 900);
        let contract = Addr::unchecked(CONTRACT);
        let recipient = Addr::unchecked("terra1user");
        let ledger = mirror(1_000);
        let querier = deps.as_ref().querier;

        // Exactly reaching the cap is allowed
        let credit = ledger
            .credit(&querier, &contract, &recipient, Uint128::new(100))
            .unwrap();
        let event = credit.event.unwrap();
        assert_eq!(event.ty, "mint");
        assert!(event
            .attributes
            .iter()
            .any(|a| a.key == "total_supply" && a.value == "1000"));

        let err = ledger
            .credit(&querier, &contract, &recipient, Uint128::new(101))
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::SupplyExhausted {
                supply: Uint128::new(900),
                amount: Uint128::new(101),
                max_supply: Uint128::new(1_000),
            }
        );
    }

    #[test]
    fn test_ledger_msg_validation() {
        let api = MockApi::default();
        let err = LedgerMsg::Escrow {
            denom: String::new(),
        }
        .validate(&api)
        .unwrap_err();
        assert!(matches!(err, ContractError::InvalidConfig { .. }));

        let err = LedgerMsg::Mirror {
            token: "terra1token".to_string(),
            max_supply: Uint128::zero(),
            fee_policy: FeePolicyMsg::AttachedNative {},
        }
        .validate(&api)
        .unwrap_err();
        assert!(matches!(err, ContractError::InvalidConfig { .. }));

        let ledger = LedgerMsg::Mirror {
            token: "terra1token".to_string(),
            max_supply: Uint128::new(10),
            fee_policy: FeePolicyMsg::AttachedNative {},
        }
        .validate(&api)
        .unwrap();
        assert_eq!(ledger.kind(), "mirror");
        assert_eq!(ledger.max_supply(), Some(Uint128::new(10)));
    }
}
