//! Chat message model for the Genie chat page.
//!
//! A [`Message`] is one conversational turn: a user prompt or an
//! assistant reply, optionally carrying a tabular query result and the
//! SQL that produced it. Messages are immutable after construction and
//! convert to/from [`StoredMessage`], the storage-safe record kept in
//! the session store.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::MessageError;
use crate::ipc::{decode_table, encode_table};
use crate::table::TableData;

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// One conversational turn.
///
/// Invariants (enforced by [`Message::new`] and on deserialization):
/// an assistant message carries at least one of content/table, and
/// `code` only appears alongside a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    /// Natural-language prompt or explanation, treated as literal markdown.
    pub content: Option<String>,
    /// Tabular query result attached to this turn.
    pub table: Option<TableData>,
    /// SQL that produced `table`.
    pub code: Option<String>,
}

impl Message {
    /// Build a message, validating the role invariants.
    pub fn new(
        role: MessageRole,
        content: Option<String>,
        table: Option<TableData>,
        code: Option<String>,
    ) -> Result<Self, MessageError> {
        if role == MessageRole::Assistant && content.is_none() && table.is_none() {
            return Err(MessageError::EmptyAssistantMessage);
        }
        if code.is_some() && table.is_none() {
            return Err(MessageError::CodeWithoutTable);
        }
        Ok(Self {
            role,
            content,
            table,
            code,
        })
    }

    /// A user prompt.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: Some(content.into()),
            table: None,
            code: None,
        }
    }

    /// An assistant reply carrying only text.
    pub fn assistant_text(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: Some(content.into()),
            table: None,
            code: None,
        }
    }

    /// An assistant reply carrying a query result, its description, and
    /// the SQL that produced it.
    pub fn assistant_result(
        description: Option<String>,
        table: TableData,
        code: Option<String>,
    ) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: description,
            table: Some(table),
            code,
        }
    }

    /// Produce the storage-safe record for the session store.
    ///
    /// The table, when present, is encoded as a base64-wrapped Arrow
    /// IPC buffer; the field is omitted entirely when absent.
    pub fn to_stored(&self) -> Result<StoredMessage, MessageError> {
        let data = match &self.table {
            Some(table) => Some(encode_table(table)?),
            None => None,
        };
        Ok(StoredMessage {
            role: self.role,
            content: self.content.clone(),
            data,
            code: self.code.clone(),
        })
    }

    /// Rebuild a message from its stored record.
    ///
    /// Fails when the table payload is not valid base64 or not a valid
    /// Arrow buffer, or when the record violates the message invariants.
    pub fn from_stored(stored: &StoredMessage) -> Result<Self, MessageError> {
        let table = match &stored.data {
            Some(encoded) => Some(decode_table(encoded)?),
            None => None,
        };
        Self::new(stored.role, stored.content.clone(), table, stored.code.clone())
    }
}

/// The serialized form of a [`Message`], safe for a session store that
/// only holds JSON-like scalars. A missing `role` fails deserialization
/// at the serde layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub role: MessageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Base64 text of the Arrow IPC encoding of the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnValues};

    fn sample_table() -> TableData {
        TableData::new(vec![
            Column {
                name: "pickup_zip".to_string(),
                values: ColumnValues::Integer(vec![Some(10001)]),
            },
            Column {
                name: "total".to_string(),
                values: ColumnValues::Integer(vec![Some(42)]),
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let parsed: MessageRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("genie".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_user_message_roundtrip() {
        let message = Message::user("Hello");
        let stored = message.to_stored().unwrap();
        let restored = Message::from_stored(&stored).unwrap();
        assert_eq!(restored.role, MessageRole::User);
        assert_eq!(restored.content.as_deref(), Some("Hello"));
        assert!(restored.table.is_none());
        assert!(restored.code.is_none());
    }

    #[test]
    fn test_result_message_roundtrip_exact_cells() {
        let message = Message::assistant_result(
            Some("Trips by pickup ZIP".to_string()),
            sample_table(),
            Some("select pickup_zip, count(*) as total from samples.nyctaxi.trips".to_string()),
        );
        let stored = message.to_stored().unwrap();
        let restored = Message::from_stored(&stored).unwrap();
        assert_eq!(restored, message);

        let table = restored.table.unwrap();
        assert_eq!(table.column_names(), vec!["pickup_zip", "total"]);
        assert_eq!(
            table.columns()[0].values,
            ColumnValues::Integer(vec![Some(10001)])
        );
        assert_eq!(
            table.columns()[1].values,
            ColumnValues::Integer(vec![Some(42)])
        );
    }

    #[test]
    fn test_stored_record_omits_absent_fields() {
        let stored = Message::assistant_text("done").to_stored().unwrap();
        let json = serde_json::to_string(&stored).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"done"}"#);
    }

    #[test]
    fn test_stored_record_missing_role_fails() {
        let err = serde_json::from_str::<StoredMessage>(r#"{"content":"hi"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_from_stored_rejects_corrupt_payload() {
        let stored = StoredMessage {
            role: MessageRole::Assistant,
            content: None,
            data: Some("###not-base64###".to_string()),
            code: None,
        };
        let err = Message::from_stored(&stored).unwrap_err();
        assert!(matches!(err, MessageError::Base64(_)));
    }

    #[test]
    fn test_empty_assistant_message_rejected() {
        let err = Message::new(MessageRole::Assistant, None, None, None).unwrap_err();
        assert!(matches!(err, MessageError::EmptyAssistantMessage));
    }

    #[test]
    fn test_code_without_table_rejected() {
        let err = Message::new(
            MessageRole::Assistant,
            Some("see query".to_string()),
            None,
            Some("select 1".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, MessageError::CodeWithoutTable));
    }

    #[test]
    fn test_empty_table_message_roundtrip() {
        let table = TableData::new(vec![Column {
            name: "pickup_zip".to_string(),
            values: ColumnValues::Integer(Vec::new()),
        }])
        .unwrap();
        let message = Message::assistant_result(None, table, None);
        let restored = Message::from_stored(&message.to_stored().unwrap()).unwrap();
        assert_eq!(restored, message);
        assert_eq!(restored.table.unwrap().num_rows(), 0);
    }
}
