//! Stats provider adapter (ESPN site API layout).

mod client;
mod dto;

pub use client::StatsClient;
