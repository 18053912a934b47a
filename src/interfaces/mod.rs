//! Outer adapters exposing the gateway to clients.

pub mod http;
