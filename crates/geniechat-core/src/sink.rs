//! Chat sink abstraction.
//!
//! Rendering is the only operation allowed to touch a display surface,
//! and it always goes through [`ChatSink`]. The app crate provides a
//! terminal implementation; tests use a recording implementation.

use geniechat_types::message::{Message, MessageRole};
use geniechat_types::table::TableData;

/// Display surface for chat output.
pub trait ChatSink {
    /// Open a new chat bubble for `role`. Subsequent content calls
    /// belong to this message until the next `begin_message`.
    fn begin_message(&mut self, role: MessageRole);

    /// Emit prose. The text is literal markdown, never executed.
    fn markdown(&mut self, text: &str);

    /// Emit a tabular query result.
    fn data_table(&mut self, table: &TableData);

    /// Emit generated SQL in a code block.
    fn sql_code(&mut self, code: &str);

    /// Surface a non-fatal notice.
    fn warning(&mut self, text: &str);
}

/// Render one message onto a sink: content as markdown, then the
/// table, then the SQL code block, each only when present.
pub fn render_message<S: ChatSink + ?Sized>(message: &Message, sink: &mut S) {
    sink.begin_message(message.role);
    if let Some(content) = &message.content {
        sink.markdown(content);
    }
    if let Some(table) = &message.table {
        sink.data_table(table);
    }
    if let Some(code) = &message.code {
        sink.sql_code(code);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingSink, SinkEvent};
    use super::*;

    #[test]
    fn test_render_text_only_message() {
        let mut sink = RecordingSink::new();
        render_message(&Message::user("Hello, Genie!"), &mut sink);
        assert_eq!(
            sink.events,
            vec![
                SinkEvent::Begin(MessageRole::User),
                SinkEvent::Markdown("Hello, Genie!".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_full_message_order() {
        use geniechat_types::table::{Column, ColumnValues};

        let table = TableData::new(vec![Column {
            name: "total".to_string(),
            values: ColumnValues::Integer(vec![Some(42)]),
        }])
        .unwrap();
        let message = Message::assistant_result(
            Some("Here you go".to_string()),
            table.clone(),
            Some("select 42 as total".to_string()),
        );

        let mut sink = RecordingSink::new();
        render_message(&message, &mut sink);
        assert_eq!(
            sink.events,
            vec![
                SinkEvent::Begin(MessageRole::Assistant),
                SinkEvent::Markdown("Here you go".to_string()),
                SinkEvent::Table(table),
                SinkEvent::Code("select 42 as total".to_string()),
            ]
        );
    }
}
