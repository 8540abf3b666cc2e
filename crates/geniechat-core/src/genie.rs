//! Workspace client trait definitions.
//!
//! These are the ports the Databricks adapter in `geniechat-infra`
//! implements. Uses native async fn in traits (RPITIT, Rust 2024
//! edition), same pattern as the session store.

use geniechat_types::error::RemoteError;
use geniechat_types::genie::{GenieReply, StatementOutcome};

/// Conversational-query client for a Genie space.
pub trait GenieClient: Send + Sync {
    /// Begin a new multi-turn conversation and wait for the reply.
    fn start_conversation(
        &self,
        space_id: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<GenieReply, RemoteError>> + Send;

    /// Post a follow-up turn on an open conversation and wait for the reply.
    fn continue_conversation(
        &self,
        space_id: &str,
        conversation_id: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<GenieReply, RemoteError>> + Send;
}

/// SQL statement execution client.
pub trait StatementExecutor: Send + Sync {
    /// Fetch the result set of a previously issued statement.
    ///
    /// Missing result data or schema comes back as `None` fields in
    /// [`StatementOutcome`] -- that is "no data", not an error.
    fn get_statement_result(
        &self,
        statement_id: &str,
    ) -> impl std::future::Future<Output = Result<StatementOutcome, RemoteError>> + Send;

    /// Execute a SQL statement and wait for its result set.
    fn execute_query(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = Result<StatementOutcome, RemoteError>> + Send;
}
