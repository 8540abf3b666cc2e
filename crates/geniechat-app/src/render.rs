//! Terminal chat sink: markdown prose via termimad, query results via
//! comfy-table, SQL and notices via console styling.

use comfy_table::{ContentArrangement, Table, presets};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use termimad::MadSkin;

use geniechat_core::sink::ChatSink;
use geniechat_types::message::MessageRole;
use geniechat_types::table::TableData;

use std::time::Duration;

/// Renders chat output to stdout.
pub struct TerminalSink {
    skin: MadSkin,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            skin: MadSkin::default_dark(),
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSink for TerminalSink {
    fn begin_message(&mut self, role: MessageRole) {
        let label = match role {
            MessageRole::User => style("you").bold().cyan(),
            MessageRole::Assistant => style("genie").bold().green(),
        };
        println!("\n{label}");
    }

    fn markdown(&mut self, text: &str) {
        print!("{}", self.skin.term_text(text));
    }

    fn data_table(&mut self, table: &TableData) {
        if table.num_columns() == 0 {
            println!("{}", style("(no data)").dim());
            return;
        }

        let mut out = Table::new();
        out.load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(table.column_names());
        for row in 0..table.num_rows() {
            out.add_row(table.row_text(row, "null"));
        }
        println!("{out}");
    }

    fn sql_code(&mut self, code: &str) {
        println!("{}", style("generated sql").dim().underlined());
        for line in code.lines() {
            println!("  {}", style(line).yellow());
        }
    }

    fn warning(&mut self, text: &str) {
        println!("{} {text}", style("warning:").yellow().bold());
    }
}

/// Spinner with elapsed time, shown while waiting on the workspace.
pub fn thinking_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} ({elapsed})")
            .expect("valid spinner template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
