//! Common - Shared Types for the Subnet Bridge Contracts
//!
//! This package holds the wire types exchanged between a bridge application
//! and the message transport endpoint it publishes through.

pub mod transport;

pub use transport::{FeeEstimateResponse, ReceiverExecuteMsg, TransportExecuteMsg, TransportQueryMsg};
