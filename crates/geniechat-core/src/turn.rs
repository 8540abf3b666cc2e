//! Genie turn orchestration: attachment translation and the chat turn
//! driver.
//!
//! Error handling follows the source behavior deliberately: a failing
//! statement-result fetch aborts the turn (messages produced earlier
//! in the turn stay in history), while per-attachment problems --
//! unknown kind, missing statement id, missing result data -- are
//! surfaced as sink warnings and skipped.

use geniechat_types::error::{AttachmentError, RemoteError};
use geniechat_types::genie::{Attachment, GenieReply, StatementOutcome};
use geniechat_types::message::Message;
use geniechat_types::table::TableData;

use crate::genie::{GenieClient, StatementExecutor};
use crate::history::ConversationHistory;
use crate::sink::{ChatSink, render_message};
use crate::store::SessionStore;

/// Build a table from a raw statement outcome.
///
/// A missing result or schema degrades to an empty table with a
/// warning rather than an error.
pub fn table_from_outcome<K: ChatSink>(outcome: StatementOutcome, sink: &mut K) -> TableData {
    let Some(rows) = outcome.rows else {
        sink.warning("No result found for the query.");
        return TableData::empty();
    };
    let Some(schema) = outcome.schema else {
        sink.warning("No manifest or schema found for the query result.");
        return TableData::empty();
    };
    TableData::from_statement(&schema, &rows)
}

async fn fetch_query_table<E, K>(
    executor: &E,
    sink: &mut K,
    statement_id: &str,
) -> Result<TableData, RemoteError>
where
    E: StatementExecutor,
    K: ChatSink,
{
    // The fetch itself is fatal for the turn; only missing data degrades.
    let outcome = executor.get_statement_result(statement_id).await?;
    Ok(table_from_outcome(outcome, sink))
}

fn append_or_warn<S: SessionStore, K: ChatSink>(
    history: &ConversationHistory<'_, S>,
    sink: &mut K,
    message: &Message,
) {
    if let Err(err) = history.append(message) {
        tracing::error!("failed to persist chat message: {err}");
        sink.warning(&format!("Could not persist a chat message: {err}"));
    }
}

/// Translate one Genie reply into assistant messages, rendering and
/// appending each in attachment order.
pub async fn process_reply<E, S, K>(
    executor: &E,
    history: &ConversationHistory<'_, S>,
    sink: &mut K,
    reply: &GenieReply,
) -> Result<(), RemoteError>
where
    E: StatementExecutor,
    S: SessionStore,
    K: ChatSink,
{
    if reply.attachments.is_empty() {
        sink.warning("No response from Genie.");
        return Ok(());
    }

    for attachment in &reply.attachments {
        let message = match attachment {
            Attachment::Text { content } => Message::assistant_text(content.clone()),
            Attachment::Query {
                statement_id,
                description,
                query_text,
            } => {
                let Some(statement_id) = statement_id.as_deref().filter(|id| !id.is_empty())
                else {
                    sink.warning(&AttachmentError::MissingStatementId.to_string());
                    continue;
                };
                let table = fetch_query_table(executor, sink, statement_id).await?;
                Message::assistant_result(description.clone(), table, query_text.clone())
            }
            Attachment::Unknown => {
                sink.warning(&AttachmentError::UnknownKind.to_string());
                continue;
            }
        };

        render_message(&message, sink);
        append_or_warn(history, sink, &message);
    }

    Ok(())
}

/// Run one complete chat turn: record the user prompt, start or
/// continue the Genie conversation, then translate the reply.
///
/// The conversation id is recorded on the first turn and reused for
/// every later turn of the session.
pub async fn run_turn<G, E, S, K>(
    genie: &G,
    executor: &E,
    history: &ConversationHistory<'_, S>,
    sink: &mut K,
    space_id: &str,
    prompt: &str,
) -> Result<(), RemoteError>
where
    G: GenieClient,
    E: StatementExecutor,
    S: SessionStore,
    K: ChatSink,
{
    let user = Message::user(prompt);
    render_message(&user, sink);
    append_or_warn(history, sink, &user);

    let reply = match history.conversation_id() {
        Some(conversation_id) => {
            genie
                .continue_conversation(space_id, &conversation_id, prompt)
                .await?
        }
        None => genie.start_conversation(space_id, prompt).await?,
    };

    if history.conversation_id().is_none() {
        history.set_conversation_id(&reply.conversation_id);
    }

    process_reply(executor, history, sink, &reply).await
}
