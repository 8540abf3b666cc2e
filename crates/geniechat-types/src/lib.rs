//! Shared domain types for the Genie chat sample app.
//!
//! This crate contains the chat message model, the columnar table
//! representation for query results (including the Arrow IPC + base64
//! storage encoding), the Genie attachment model, and all error types.
//!
//! No IO or HTTP dependencies -- adapters live in `geniechat-infra`.

pub mod error;
pub mod genie;
pub mod ipc;
pub mod message;
pub mod table;
