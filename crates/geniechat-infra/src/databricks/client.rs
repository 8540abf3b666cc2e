//! DatabricksClient -- concrete [`GenieClient`] and [`StatementExecutor`]
//! implementation over the workspace REST API.
//!
//! Genie messages and statements complete asynchronously on the
//! service side; both paths poll at a fixed interval until a terminal
//! status, capped at the same 20-minute wait the official SDK's
//! `*_and_wait` helpers use. The access token is wrapped in
//! [`secrecy::SecretString`] and never logged.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::time::Instant;

use geniechat_core::genie::{GenieClient, StatementExecutor};
use geniechat_types::error::{ConfigError, RemoteError};
use geniechat_types::genie::{Attachment, ColumnInfo, GenieReply, StatementOutcome};

use crate::config::AppConfig;

use super::types::{
    CreateMessageResponse, GenieMessage, StartConversationResponse, StatementResponse,
};

/// Workspace REST client for Genie conversations and SQL statements.
pub struct DatabricksClient {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
    warehouse_id: String,
}

impl DatabricksClient {
    /// Delay between completion polls.
    const POLL_INTERVAL: Duration = Duration::from_secs(2);
    /// Longest total wait for a Genie message or statement, matching
    /// the SDK's *_and_wait default.
    const MAX_WAIT: Duration = Duration::from_secs(20 * 60);

    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let warehouse_id = config.warehouse_id()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Ok(Self {
            http,
            base_url: config.host.clone(),
            token: config.token.clone(),
            warehouse_id,
        })
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(self.token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        read_json(response).await
    }

    /// Poll one Genie message until it reaches a terminal status and
    /// return its attachments, decided into the closed enum.
    async fn wait_for_message(
        &self,
        space_id: &str,
        conversation_id: &str,
        message_id: &str,
    ) -> Result<Vec<Attachment>, RemoteError> {
        let path = format!(
            "/api/2.0/genie/spaces/{space_id}/conversations/{conversation_id}/messages/{message_id}"
        );
        let deadline = Instant::now() + Self::MAX_WAIT;

        loop {
            let message: GenieMessage = self.get_json(&path).await?;
            match message.status.as_deref() {
                Some("COMPLETED") => {
                    return Ok(message
                        .attachments
                        .unwrap_or_default()
                        .into_iter()
                        .map(Attachment::from)
                        .collect());
                }
                Some(terminal @ ("FAILED" | "CANCELLED" | "QUERY_RESULT_EXPIRED")) => {
                    return Err(RemoteError::Failed(format!(
                        "Genie message ended in status {terminal}"
                    )));
                }
                other => {
                    tracing::debug!(status = ?other, "waiting for Genie message {message_id}");
                }
            }
            if Instant::now() >= deadline {
                return Err(RemoteError::Timeout(format!("Genie message {message_id}")));
            }
            tokio::time::sleep(Self::POLL_INTERVAL).await;
        }
    }
}

impl GenieClient for DatabricksClient {
    async fn start_conversation(
        &self,
        space_id: &str,
        prompt: &str,
    ) -> Result<GenieReply, RemoteError> {
        let started: StartConversationResponse = self
            .post_json(
                &format!("/api/2.0/genie/spaces/{space_id}/start-conversation"),
                &json!({ "content": prompt }),
            )
            .await?;

        let attachments = self
            .wait_for_message(space_id, &started.conversation_id, &started.message_id)
            .await?;
        Ok(GenieReply {
            conversation_id: started.conversation_id,
            attachments,
        })
    }

    async fn continue_conversation(
        &self,
        space_id: &str,
        conversation_id: &str,
        prompt: &str,
    ) -> Result<GenieReply, RemoteError> {
        let created: CreateMessageResponse = self
            .post_json(
                &format!(
                    "/api/2.0/genie/spaces/{space_id}/conversations/{conversation_id}/messages"
                ),
                &json!({ "content": prompt }),
            )
            .await?;

        let attachments = self
            .wait_for_message(space_id, conversation_id, &created.id)
            .await?;
        Ok(GenieReply {
            conversation_id: conversation_id.to_string(),
            attachments,
        })
    }
}

impl StatementExecutor for DatabricksClient {
    async fn get_statement_result(
        &self,
        statement_id: &str,
    ) -> Result<StatementOutcome, RemoteError> {
        let response: StatementResponse = self
            .get_json(&format!("/api/2.0/sql/statements/{statement_id}"))
            .await?;
        statement_outcome(response)
    }

    async fn execute_query(&self, sql: &str) -> Result<StatementOutcome, RemoteError> {
        tracing::info!("executing query: {sql}");
        let body = json!({
            "statement": sql,
            "warehouse_id": self.warehouse_id,
            "wait_timeout": "30s",
            "on_wait_timeout": "CONTINUE",
        });
        let mut response: StatementResponse =
            self.post_json("/api/2.0/sql/statements", &body).await?;

        let deadline = Instant::now() + Self::MAX_WAIT;
        loop {
            match response.status.as_ref().and_then(|s| s.state.as_deref()) {
                Some("PENDING" | "RUNNING") => {
                    let statement_id = response.statement_id.clone().ok_or_else(|| {
                        RemoteError::MalformedResponse(
                            "running statement response carries no statement_id".to_string(),
                        )
                    })?;
                    if Instant::now() >= deadline {
                        return Err(RemoteError::Timeout(format!("statement {statement_id}")));
                    }
                    tokio::time::sleep(Self::POLL_INTERVAL).await;
                    response = self
                        .get_json(&format!("/api/2.0/sql/statements/{statement_id}"))
                        .await?;
                }
                _ => return statement_outcome(response),
            }
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| RemoteError::MalformedResponse(err.to_string()))
}

/// Map a terminal statement response to the domain outcome.
///
/// Missing manifest/schema/result become `None` fields ("no data");
/// only a FAILED/CANCELED/CLOSED state is an error.
fn statement_outcome(response: StatementResponse) -> Result<StatementOutcome, RemoteError> {
    if let Some(status) = &response.status
        && let Some(state @ ("FAILED" | "CANCELED" | "CLOSED")) = status.state.as_deref()
    {
        let message = status
            .error
            .as_ref()
            .and_then(|err| err.message.clone())
            .unwrap_or_else(|| format!("statement ended in state {state}"));
        return Err(RemoteError::Failed(message));
    }

    let schema = response
        .manifest
        .and_then(|manifest| manifest.schema)
        .and_then(|schema| schema.columns)
        .map(|columns| {
            columns
                .into_iter()
                .map(|col| ColumnInfo {
                    name: col.name,
                    type_name: col.type_name.unwrap_or_else(|| "STRING".to_string()),
                })
                .collect()
        });
    let rows = response.result.and_then(|result| result.data_array);

    Ok(StatementOutcome { schema, rows })
}
