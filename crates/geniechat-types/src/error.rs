use thiserror::Error;

/// Errors raised while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingEnv(String),

    #[error("SQL endpoint path '{0}' has no warehouse id segment")]
    InvalidHttpPath(String),
}

/// Errors raised while encoding or decoding a stored chat message.
///
/// A message that fails to decode is skipped during history replay;
/// it never aborts replay of the surrounding messages.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("invalid base64 table payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid columnar table payload: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("unsupported column type '{0}' in table payload")]
    UnsupportedColumnType(String),

    #[error("column '{name}' has {actual} rows, expected {expected}")]
    RowCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("timestamp value {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error("assistant message carries neither content nor a table")]
    EmptyAssistantMessage,

    #[error("message carries code without an accompanying table")]
    CodeWithoutTable,
}

/// Errors from the Databricks workspace (Genie conversation API and
/// SQL statement execution API).
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("remote operation failed: {0}")]
    Failed(String),

    #[error("timed out waiting for {0}")]
    Timeout(String),
}

/// Non-fatal problems with a single Genie attachment.
///
/// These never propagate: the attachment is skipped and the problem is
/// surfaced as a warning on the chat sink.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("no statement ID found for the query")]
    MissingStatementId,

    #[error("unknown attachment type from Genie")]
    UnknownKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnv("GENIECHAT_GENIE_SPACE_ID".to_string());
        assert_eq!(
            err.to_string(),
            "required environment variable GENIECHAT_GENIE_SPACE_ID is not set"
        );
    }

    #[test]
    fn test_message_error_display() {
        let err = MessageError::RowCountMismatch {
            name: "total".to_string(),
            expected: 3,
            actual: 2,
        };
        assert!(err.to_string().contains("total"));
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::Api {
            status: 403,
            message: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "api error (status 403): permission denied");
    }

    #[test]
    fn test_attachment_error_display() {
        assert_eq!(
            AttachmentError::MissingStatementId.to_string(),
            "no statement ID found for the query"
        );
    }
}
