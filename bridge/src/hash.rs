//! Hashing helpers
//!
//! Failed inbound messages are stored by the keccak256 hash of their payload,
//! the same content hash an EVM deployment of the bridge records, so a record
//! can be audited against the transport's packet log on either side.

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Content hash of a cross-chain payload, as stored in a failed-message record.
pub fn payload_hash(payload: &[u8]) -> [u8; 32] {
    keccak256(payload)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    bytes_to_hex(bytes)
}

/// Convert arbitrary bytes to a 0x-prefixed hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
