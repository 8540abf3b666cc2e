//! Wire types for the Databricks REST APIs.
//!
//! The wire shape probes optional fields (`text` vs `query`); the
//! conversion into [`Attachment`] happens exactly once here, so the
//! rest of the app only ever sees the closed enum.

use serde::Deserialize;

use geniechat_types::genie::Attachment;

#[derive(Debug, Deserialize)]
pub(crate) struct StartConversationResponse {
    pub conversation_id: String,
    pub message_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateMessageResponse {
    #[serde(alias = "message_id")]
    pub id: String,
}

/// One Genie message as returned while polling for completion.
#[derive(Debug, Deserialize)]
pub(crate) struct GenieMessage {
    pub status: Option<String>,
    pub attachments: Option<Vec<GenieAttachment>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenieAttachment {
    pub text: Option<TextAttachment>,
    pub query: Option<QueryAttachment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextAttachment {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryAttachment {
    /// The generated SQL.
    pub query: Option<String>,
    pub description: Option<String>,
    pub statement_id: Option<String>,
}

impl From<GenieAttachment> for Attachment {
    fn from(wire: GenieAttachment) -> Self {
        if let Some(text) = wire.text {
            Attachment::Text {
                content: text.content.unwrap_or_default(),
            }
        } else if let Some(query) = wire.query {
            Attachment::Query {
                statement_id: query.statement_id,
                description: query.description,
                query_text: query.query,
            }
        } else {
            Attachment::Unknown
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementResponse {
    pub statement_id: Option<String>,
    pub status: Option<StatementStatus>,
    pub manifest: Option<StatementManifest>,
    pub result: Option<StatementResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementStatus {
    pub state: Option<String>,
    pub error: Option<StatementError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementError {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementManifest {
    pub schema: Option<StatementSchema>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementSchema {
    pub columns: Option<Vec<WireColumn>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireColumn {
    pub name: String,
    pub type_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementResult {
    pub data_array: Option<Vec<Vec<Option<String>>>>,
}
