//! Application layer containing the gateway orchestration.
//!
//! This module defines the `PaymentGateway` facade, the single entry point for
//! every gateway operation, together with the `AutoPayScheduler` that settles
//! transactions in the background through a `tokio` channel and task set.

pub mod engine;
pub mod response;
pub mod scheduler;
