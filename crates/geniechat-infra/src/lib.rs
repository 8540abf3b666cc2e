//! Infrastructure adapters for the Genie chat sample app.
//!
//! Implements the ports defined in `geniechat-core`: environment
//! configuration, the in-memory session store, and the Databricks
//! REST client for Genie conversations and SQL statement execution.

pub mod config;
pub mod databricks;
pub mod session;
