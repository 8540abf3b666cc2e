//! One-shot SQL query command.

use anyhow::Context;

use geniechat_core::genie::StatementExecutor;
use geniechat_core::sink::ChatSink;
use geniechat_core::turn::table_from_outcome;
use geniechat_infra::config::AppConfig;
use geniechat_infra::databricks::DatabricksClient;

use crate::render::{TerminalSink, thinking_spinner};

/// Total trips by pickup ZIP code from the NYC taxi sample dataset.
const SAMPLE_QUERY: &str = "select pickup_zip, count(*) as total
from samples.nyctaxi.trips
where pickup_zip is not null
group by pickup_zip
order by total desc";

pub async fn run_query(sql: Option<String>) -> anyhow::Result<()> {
    let config = AppConfig::from_env()
        .context("failed to load configuration; check your environment variables or .env file")?;
    let client = DatabricksClient::new(&config)?;
    let sql = sql.unwrap_or_else(|| SAMPLE_QUERY.to_string());

    let spinner = thinking_spinner("Executing query...");
    let outcome = client.execute_query(&sql).await;
    spinner.finish_and_clear();

    let outcome = outcome.context("error executing query")?;
    let mut sink = TerminalSink::new();
    let table = table_from_outcome(outcome, &mut sink);
    sink.data_table(&table);

    Ok(())
}
