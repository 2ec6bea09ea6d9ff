//! Cross-chain message envelope
//!
//! The payload published for a transfer is the ABI encoding of
//! `(bytes toAddress, uint256 amount)`, so an EVM counterpart can decode it
//! with `abi.decode(payload, (bytes, uint256))`.
//!
//! # Byte Layout
//! - Bytes 0-31:   offset of the address bytes (always 0x40)
//! - Bytes 32-63:  amount (uint256, big-endian, left-padded)
//! - Bytes 64-95:  address length (uint256)
//! - Bytes 96-..:  address bytes, right-padded with zeros to a 32-byte boundary

use cosmwasm_std::{Binary, Uint128};

use crate::address_codec::raw_address;
use crate::error::ContractError;

const WORD: usize = 32;
const HEAD_LEN: usize = 3 * WORD;
const ADDRESS_OFFSET: u64 = 2 * WORD as u64;

/// A decoded transfer message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub to_address: Vec<u8>,
    pub amount: Uint128,
}

impl Envelope {
    /// Decode a payload and check the destination address width.
    ///
    /// The width check runs only after the structural decode succeeded.
    pub fn decode_for_delivery(payload: &[u8]) -> Result<([u8; 20], Uint128), ContractError> {
        let envelope = decode(payload)?;
        let to = raw_address(&envelope.to_address)?;
        Ok((to, envelope.amount))
    }
}

/// Encode `(to_address, amount)` as a transfer payload.
pub fn encode(to_address: &[u8], amount: Uint128) -> Binary {
    let padded_len = padded(to_address.len());
    let mut data = vec![0u8; HEAD_LEN + padded_len];

    data[WORD - 8..WORD].copy_from_slice(&ADDRESS_OFFSET.to_be_bytes());

    // u128 amount goes into the low 16 bytes of its word
    data[WORD + 16..2 * WORD].copy_from_slice(&amount.u128().to_be_bytes());

    data[3 * WORD - 8..HEAD_LEN].copy_from_slice(&(to_address.len() as u64).to_be_bytes());
    data[HEAD_LEN..HEAD_LEN + to_address.len()].copy_from_slice(to_address);

    Binary::from(data)
}

/// Decode a transfer payload. Fails closed on anything that is not the
/// canonical encoding produced by [`encode`].
pub fn decode(payload: &[u8]) -> Result<Envelope, ContractError> {
    if payload.len() < HEAD_LEN {
        return Err(invalid(format!(
            "payload too short: {} bytes",
            payload.len()
        )));
    }

    let offset = read_u64_word(payload, 0)?;
    if offset != ADDRESS_OFFSET {
        return Err(invalid(format!("unexpected address offset {}", offset)));
    }

    let amount_word = word(payload, WORD)?;
    if amount_word[..16].iter().any(|b| *b != 0) {
        return Err(invalid("amount exceeds 128 bits".to_string()));
    }
    let mut amount_bytes = [0u8; 16];
    amount_bytes.copy_from_slice(&amount_word[16..]);
    let amount = Uint128::new(u128::from_be_bytes(amount_bytes));

    let len = read_u64_word(payload, 2 * WORD)?;
    let len = usize::try_from(len).map_err(|_| invalid("address length overflow".to_string()))?;
    let available = payload.len() - HEAD_LEN;
    if len > available {
        return Err(invalid(format!(
            "address length {} overruns payload ({} bytes available)",
            len, available
        )));
    }
    if payload.len() != HEAD_LEN + padded(len) {
        return Err(invalid(format!(
            "payload length {} is not canonical for a {}-byte address",
            payload.len(),
            len
        )));
    }

    let (to_address, padding) = payload[HEAD_LEN..].split_at(len);
    if padding.iter().any(|b| *b != 0) {
        return Err(invalid("non-zero padding".to_string()));
    }

    Ok(Envelope {
        to_address: to_address.to_vec(),
        amount,
    })
}

fn invalid(reason: String) -> ContractError {
    ContractError::InvalidPayload { reason }
}

fn padded(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

fn word(payload: &[u8], offset: usize) -> Result<&[u8], ContractError> {
    payload
        .get(offset..offset + WORD)
        .ok_or_else(|| invalid(format!("truncated word at offset {}", offset)))
}

/// Read a uint256 word that must fit in a u64.
fn read_u64_word(payload: &[u8], offset: usize) -> Result<u64, ContractError> {
    let w = word(payload, offset)?;
    if w[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(invalid(format!("word at offset {} out of range", offset)));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&w[WORD - 8..]);
    Ok(u64::from_be_bytes(low))
}
