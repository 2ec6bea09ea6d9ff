//! Execute handlers for the subnet bridge contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `outgoing` - Send handler and the adapter-params policy
//! - `incoming` - Safe dispatch, receive body, delivery reply, retry
//! - `escrow` - Escrow deposit and withdrawal
//! - `admin` - Allowlist, adapter-params policy, admin role management

mod admin;
mod escrow;
mod incoming;
mod outgoing;

pub use admin::*;
pub use escrow::*;
pub use incoming::*;
pub use outgoing::*;

use cosmwasm_std::{Coin, Uint128};

use crate::error::ContractError;

/// Total of the attached coins, which must all be in `denom`.
pub(crate) fn attached_native(funds: &[Coin], denom: &str) -> Result<Uint128, ContractError> {
    funds.iter().try_fold(Uint128::zero(), |total, coin| {
        if coin.denom != denom {
            return Err(ContractError::InvalidFunds {
                reason: format!("Only {} is accepted, got {}", denom, coin.denom),
            });
        }
        total
            .checked_add(coin.amount)
            .map_err(|e| ContractError::Std(e.into()))
    })
}
