//! Destination Address Encoding
//!
//! Cross-chain payloads carry the recipient as raw address bytes. For the
//! accounts model this bridge credits, an address is exactly 20 bytes; on a
//! Cosmos chain the account string is the bech32 encoding of those bytes
//! under the chain's human-readable prefix.
//!
//! ```text
//! payload bytes (20) --bech32(hrp)--> "terra1..." --addr_validate--> Addr
//! ```

use cosmwasm_std::{Addr, Api, StdError, StdResult};

use crate::error::ContractError;

/// Width in bytes of a destination-ledger address.
pub const ADDRESS_WIDTH: usize = 20;

/// Check that raw address bytes have the destination ledger's width.
pub fn raw_address(bytes: &[u8]) -> Result<[u8; ADDRESS_WIDTH], ContractError> {
    bytes
        .try_into()
        .map_err(|_| ContractError::InvalidAddressLength {
            expected: ADDRESS_WIDTH,
            got: bytes.len(),
        })
}

/// Resolve raw address bytes into a validated account on this chain.
pub fn account_from_raw(
    api: &dyn Api,
    raw: &[u8; ADDRESS_WIDTH],
    hrp: &str,
) -> Result<Addr, ContractError> {
    let encoded = encode_bech32_address(raw, hrp)?;
    api.addr_validate(&encoded)
        .map_err(|e| ContractError::InvalidAddress {
            reason: e.to_string(),
        })
}

/// Encode raw 20 bytes to a bech32 address with given prefix
pub fn encode_bech32_address(bytes: &[u8; ADDRESS_WIDTH], hrp: &str) -> StdResult<String> {
    if hrp.is_empty() {
        return Err(StdError::generic_err("Bech32 prefix is empty"));
    }

    let data5 = convert_bits(bytes, 8, 5, true);
    let data_str = encode_bech32_data(&data5);

    let checksum = compute_bech32_checksum(hrp, &data5);
    let checksum_str = encode_bech32_data(&checksum);

    Ok(format!("{}1{}{}", hrp, data_str, checksum_str))
}

/// Regroup bytes into 5-bit symbols, zero-padding the last one
fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::new();
    let max_v = (1u32 << to_bits) - 1;

    for &value in data {
        acc = (acc << from_bits) | value as u32;
        bits += from_bits;

        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_v) as u8);
        }
    }

    if pad && bits > 0 {
        result.push(((acc << (to_bits - bits)) & max_v) as u8);
    }

    result
}

/// Bech32 character set
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Encode bytes to bech32 base32 string
fn encode_bech32_data(data: &[u8]) -> String {
    data.iter()
        .map(|&b| BECH32_CHARSET[b as usize] as char)
        .collect()
}

fn compute_bech32_checksum(hrp: &str, data: &[u8]) -> Vec<u8> {
    let mut values = expand_hrp(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

    let polymod = bech32_polymod(&values) ^ 1;

    (0..6)
        .map(|i| ((polymod >> (5 * (5 - i))) & 31) as u8)
        .collect()
}

/// Expand HRP for checksum calculation
fn expand_hrp(hrp: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(hrp.len() * 2 + 1);

    for c in hrp.chars() {
        result.push((c as u8) >> 5);
    }
    result.push(0);
    for c in hrp.chars() {
        result.push((c as u8) & 31);
    }

    result
}

fn bech32_polymod(values: &[u8]) -> u32 {
    const GENERATOR: [u32; 5] = [
        0x3b6a_57b2,
        0x2650_8e6d,
        0x1ea1_19fa,
        0x3d42_33dd,
        0x2a14_62b3,
    ];

    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ (v as u32);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}
