//! Transport Endpoint Contract
//!
//! Moves opaque payloads between applications on different chains. Outbound,
//! an application calls `Send`; the endpoint charges its quote, assigns the
//! next nonce on the `(dst_chain_id, sender)` path and stores the packet.
//! Inbound, a relayer calls `Deliver` with the next nonce of the
//! `(src_chain_id, src_address)` path and the endpoint calls `LzReceive` on
//! the receiving application. A receiver that errors reverts the delivery,
//! so the path stays blocked until the receiver accepts it.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
