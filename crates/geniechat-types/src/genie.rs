//! Genie conversation and statement-result domain types.
//!
//! Attachments are a closed tagged enum, decided once when the wire
//! response is ingested -- downstream code matches on the variant
//! instead of probing optional fields.

use serde::{Deserialize, Serialize};

/// One unit of a Genie response: a natural-language explanation, a
/// reference to an executed query, or something this app does not
/// understand.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    /// Plain-text explanation from Genie.
    Text { content: String },
    /// Reference to a SQL query Genie issued on the user's behalf.
    Query {
        /// Handle used to fetch the result set. Genie may omit it.
        statement_id: Option<String>,
        /// Natural-language description of what the query answers.
        description: Option<String>,
        /// The generated SQL text.
        query_text: Option<String>,
    },
    /// Attachment kind this app does not recognize. Skipped with a warning.
    Unknown,
}

/// A completed Genie conversation turn.
#[derive(Debug, Clone, PartialEq)]
pub struct GenieReply {
    /// Handle for the multi-turn conversation on the Genie service.
    pub conversation_id: String,
    /// Attachments in the order the service returned them.
    pub attachments: Vec<Attachment>,
}

/// Column metadata from a statement result manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Databricks SQL type name (e.g. "INT", "STRING", "DECIMAL(10,2)").
    pub type_name: String,
}

/// Raw outcome of a statement execution fetch.
///
/// A missing result or schema means "no data", not an error -- the
/// caller degrades to an empty table with a warning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementOutcome {
    pub schema: Option<Vec<ColumnInfo>>,
    /// Row-major cell values as returned by the statement API.
    pub rows: Option<Vec<Vec<Option<String>>>>,
}
