//! Adapter Params Codec
//!
//! Adapter params tell the transport how to execute a message on the
//! destination chain. The layout is bit-exact with the EVM relayer format:
//!
//! ```text
//! tag 1 (34 bytes): | tag u16 BE (2) | gas limit uint256 (32) |
//! tag 2 (98 bytes): | tag u16 BE (2) | gas limit uint256 (32) | airdrop amount uint256 (32) | airdrop address (32, left-padded) |
//! ```
//!
//! A blob is only accepted when its length is exactly 34 or strictly greater
//! than 66. Lengths in (34, 66] are rejected before the tag is looked at; the
//! range above 66 is shared by tag 2 and any later tag.

use cosmwasm_std::{Binary, Uint256};

use crate::error::ContractError;

/// Tag for params carrying only a destination gas limit
pub const TAG_DEFAULT: u16 = 1;

/// Tag for params carrying a gas limit plus a native gas airdrop
pub const TAG_AIRDROP: u16 = 2;

/// Exact encoded length of a tag 1 blob
pub const DEFAULT_PARAMS_LEN: usize = 34;

/// Any blob that is not a tag 1 blob must be longer than this
pub const EXTENDED_PARAMS_MIN_EXCLUSIVE: usize = 66;

/// Exact encoded length of a tag 2 blob
pub const AIRDROP_PARAMS_LEN: usize = 98;

const TAG_LEN: usize = 2;
const WORD: usize = 32;

/// Decoded adapter params
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterParams {
    Default {
        gas_limit: Uint256,
    },
    Airdrop {
        gas_limit: Uint256,
        airdrop_amount: Uint256,
        airdrop_address: [u8; 32],
    },
}

impl AdapterParams {
    pub fn tag(&self) -> u16 {
        match self {
            AdapterParams::Default { .. } => TAG_DEFAULT,
            AdapterParams::Airdrop { .. } => TAG_AIRDROP,
        }
    }

    pub fn gas_limit(&self) -> Uint256 {
        match self {
            AdapterParams::Default { gas_limit } | AdapterParams::Airdrop { gas_limit, .. } => {
                *gas_limit
            }
        }
    }

    pub fn airdrop_amount(&self) -> Option<Uint256> {
        match self {
            AdapterParams::Default { .. } => None,
            AdapterParams::Airdrop { airdrop_amount, .. } => Some(*airdrop_amount),
        }
    }

    pub fn airdrop_address(&self) -> Option<[u8; 32]> {
        match self {
            AdapterParams::Default { .. } => None,
            AdapterParams::Airdrop {
                airdrop_address, ..
            } => Some(*airdrop_address),
        }
    }
}

/// Encode tag 1 params: destination gas limit only.
pub fn build_default(gas_limit: Uint256) -> Binary {
    let mut data = Vec::with_capacity(DEFAULT_PARAMS_LEN);
    data.extend_from_slice(&TAG_DEFAULT.to_be_bytes());
    data.extend_from_slice(&gas_limit.to_be_bytes());
    Binary::from(data)
}

/// Encode tag 2 params: gas limit plus `airdrop_amount` of destination gas
/// delivered to `airdrop_address`.
pub fn build_airdrop(
    gas_limit: Uint256,
    airdrop_amount: Uint256,
    airdrop_address: [u8; 32],
) -> Result<Binary, ContractError> {
    if airdrop_amount.is_zero() {
        return Err(ContractError::InvalidAdapterParams {
            reason: "airdrop amount must be greater than zero".to_string(),
        });
    }
    if airdrop_address == [0u8; 32] {
        return Err(ContractError::InvalidAdapterParams {
            reason: "airdrop address must not be zero".to_string(),
        });
    }

    let mut data = Vec::with_capacity(AIRDROP_PARAMS_LEN);
    data.extend_from_slice(&TAG_AIRDROP.to_be_bytes());
    data.extend_from_slice(&gas_limit.to_be_bytes());
    data.extend_from_slice(&airdrop_amount.to_be_bytes());
    data.extend_from_slice(&airdrop_address);
    Ok(Binary::from(data))
}

/// Decode and validate an adapter params blob.
pub fn decode(bytes: &[u8]) -> Result<AdapterParams, ContractError> {
    let len = bytes.len();
    if len != DEFAULT_PARAMS_LEN && len <= EXTENDED_PARAMS_MIN_EXCLUSIVE {
        return Err(invalid(format!(
            "length must be {} or greater than {}, got {}",
            DEFAULT_PARAMS_LEN, EXTENDED_PARAMS_MIN_EXCLUSIVE, len
        )));
    }

    let tag = read_tag(bytes)?;
    let gas_limit = read_word(bytes, TAG_LEN)?;

    let params = match tag {
        TAG_DEFAULT => {
            if len != DEFAULT_PARAMS_LEN {
                return Err(invalid(format!(
                    "tag 1 params must be {} bytes, got {}",
                    DEFAULT_PARAMS_LEN, len
                )));
            }
            AdapterParams::Default { gas_limit }
        }
        TAG_AIRDROP => {
            let airdrop_amount = read_word(bytes, TAG_LEN + WORD)?;
            let airdrop_address = read_word_bytes(bytes, TAG_LEN + 2 * WORD)?;
            if len != AIRDROP_PARAMS_LEN {
                return Err(invalid(format!(
                    "tag 2 params must be {} bytes, got {}",
                    AIRDROP_PARAMS_LEN, len
                )));
            }
            AdapterParams::Airdrop {
                gas_limit,
                airdrop_amount,
                airdrop_address,
            }
        }
        other => return Err(invalid(format!("unsupported tag {}", other))),
    };

    if gas_limit.is_zero() {
        return Err(invalid("gas limit must be greater than zero".to_string()));
    }

    Ok(params)
}

/// Left-pad a raw address (at most 32 bytes) into an airdrop address word.
pub fn left_pad_address(raw: &[u8]) -> Result<[u8; 32], ContractError> {
    if raw.len() > WORD {
        return Err(invalid(format!(
            "airdrop address longer than {} bytes: {}",
            WORD,
            raw.len()
        )));
    }
    let mut word = [0u8; 32];
    word[WORD - raw.len()..].copy_from_slice(raw);
    Ok(word)
}

// ============================================================================
// Internal helpers
// ============================================================================

fn invalid(reason: String) -> ContractError {
    ContractError::InvalidAdapterParams { reason }
}

fn read_tag(bytes: &[u8]) -> Result<u16, ContractError> {
    let raw: [u8; TAG_LEN] = bytes
        .get(..TAG_LEN)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| invalid("missing tag".to_string()))?;
    Ok(u16::from_be_bytes(raw))
}

fn read_word_bytes(bytes: &[u8], offset: usize) -> Result<[u8; 32], ContractError> {
    bytes
        .get(offset..offset + WORD)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| invalid(format!("truncated field at offset {}", offset)))
}

fn read_word(bytes: &[u8], offset: usize) -> Result<Uint256, ContractError> {
    read_word_bytes(bytes, offset).map(Uint256::from_be_bytes)
}
