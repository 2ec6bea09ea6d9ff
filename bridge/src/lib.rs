//! Subnet Bridge Contract - Cross-Chain Transfers over a Message Transport
//!
//! One contract serves both sides of a token pair. The canonical side holds
//! native coin in escrow; the mirror side mints and burns a capped CW20.
//! Transfers travel as envelopes through a transport endpoint.
//!
//! # Outgoing Flow (Send)
//! 1. User sends value to the bridge (escrow) or approves a burn (mirror)
//! 2. Bridge debits the ledger and encodes `(to_address, amount)`
//! 3. Bridge publishes the envelope with the leftover native value as gas
//!
//! # Incoming Flow (Safe Dispatch)
//! 1. Transport endpoint calls `LzReceive`
//! 2. Bridge checks the source chain and calls itself with `NonblockingReceive`
//! 3. The envelope is decoded and the recipient credited
//! 4. A failure in step 3 is stored as a failed message instead of
//!    reverting the transport; anyone can `RetryMessage` it later
//!
//! # Security
//! - Chain allowlist gates both send destinations and receive sources
//! - Only the endpoint can deliver; only the bridge can run the receive body
//! - Mirror mints are capped at `max_supply` and never go to the bridge
//! - Admin role gates allowlist, policy and escrow withdrawal

pub mod adapter_params;
pub mod address_codec;
pub mod contract;
pub mod envelope;
pub mod error;
mod execute;
pub mod fee_policy;
pub mod hash;
pub mod ledger;
pub mod msg;
mod query;
pub mod state;

pub use crate::envelope::Envelope;
pub use crate::error::ContractError;
pub use crate::fee_policy::FeePolicy;
pub use crate::hash::keccak256;
pub use crate::ledger::Ledger;
