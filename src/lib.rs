//! Mock payment gateway.
//!
//! Accepts transaction-creation requests, settles them automatically after a
//! delay, answers status queries and reports usage statistics, while injecting
//! latency and failures the way a real third-party gateway would.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::engine::PaymentGateway;
pub use config::SimulationConfig;
pub use error::{GatewayError, Result};
