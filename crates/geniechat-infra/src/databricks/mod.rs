//! Databricks REST adapters: Genie conversation API and SQL statement
//! execution API.

mod client;
mod types;

pub use client::DatabricksClient;
