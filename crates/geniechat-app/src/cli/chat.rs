//! Interactive Genie chat loop.
//!
//! One prompt per turn; the turn renders the user message, waits on
//! Genie behind a spinner, then renders every attachment Genie sent
//! back. A failed turn shows an error banner and leaves the session
//! usable for the next prompt.

use anyhow::Context;
use console::style;
use dialoguer::Input;
use uuid::Uuid;

use geniechat_core::history::ConversationHistory;
use geniechat_core::turn::run_turn;
use geniechat_infra::config::AppConfig;
use geniechat_infra::databricks::DatabricksClient;
use geniechat_infra::session::InMemorySessionStore;

use crate::render::{TerminalSink, thinking_spinner};

pub async fn run_chat() -> anyhow::Result<()> {
    let config = AppConfig::from_env()
        .context("failed to load configuration; check your environment variables or .env file")?;
    let client = DatabricksClient::new(&config)?;

    let store = InMemorySessionStore::new();
    let history = ConversationHistory::new(&store, Uuid::now_v7());
    let mut sink = TerminalSink::new();

    println!("{}", style("Genie Chat").bold());
    println!(
        "Ask questions about your data; Genie answers with explanations and SQL query results."
    );
    println!("{}", style("Type 'exit' to quit.").dim());

    loop {
        let prompt: String = Input::new()
            .with_prompt("Ask your question")
            .allow_empty(true)
            .interact_text()?;
        let prompt = prompt.trim().to_string();
        if prompt.is_empty() {
            continue;
        }
        if prompt.eq_ignore_ascii_case("exit") || prompt.eq_ignore_ascii_case("quit") {
            break;
        }

        let spinner = thinking_spinner("Processing Genie response...");
        let result = run_turn(
            &client,
            &client,
            &history,
            &mut sink,
            &config.genie_space_id,
            &prompt,
        )
        .await;
        spinner.finish_and_clear();

        if let Err(err) = result {
            // Turn aborted; history keeps the messages produced before
            // the failure and the session stays usable.
            eprintln!("{} {err}", style("error:").red().bold());
        }
    }

    Ok(())
}
