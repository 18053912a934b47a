//! Domain types and rules of the simulated gateway: pricing, the channel
//! catalog, transaction records, statistics and the storage port.

pub mod behavior;
pub mod channel;
pub mod fee;
pub mod ledger;
pub mod ports;
pub mod stats;
pub mod transaction;
