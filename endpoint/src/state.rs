use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:transport-endpoint";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Chain id of the chain this endpoint runs on
    pub chain_id: u16,
    pub admin: Addr,
    /// Only address allowed to deliver inbound packets
    pub relayer: Addr,
    pub native_denom: String,
    /// Flat part of the quote
    pub base_fee: Uint128,
    /// Per payload byte part of the quote
    pub fee_per_byte: Uint128,
}

/// Outbound packet as published by an application
#[cw_serde]
pub struct Packet {
    pub dst_chain_id: u16,
    pub src_address: Addr,
    pub nonce: u64,
    pub payload: Binary,
    pub adapter_params: Binary,
    /// Native value attached by the application
    pub gas_budget: Uint128,
    /// Part of the budget kept as the fee
    pub fee: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// (dst_chain_id, sender) => last outbound nonce
pub const OUTBOUND_NONCE: Map<(u16, &Addr), u64> = Map::new("outbound_nonce");

/// (src_chain_id, src_address) => last delivered nonce
pub const INBOUND_NONCE: Map<(u16, &[u8]), u64> = Map::new("inbound_nonce");

/// (dst_chain_id, sender, nonce) => packet
pub const PACKETS: Map<(u16, &Addr, u64), Packet> = Map::new("packets");
