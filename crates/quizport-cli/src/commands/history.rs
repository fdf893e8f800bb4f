//! The `quizport history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizport_report::{history_rows, NO_HISTORY};

pub async fn execute(json: bool, config_path: Option<PathBuf>) -> Result<()> {
    let (config, api) = super::connect(config_path.as_deref())?;
    let credential = super::require_credential(&config)?;

    let attempts = api.history(&credential).await?;
    let rows = history_rows(&attempts);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("{NO_HISTORY}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Score", "Date", "Id"]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(&row.subject),
            Cell::new(&row.score),
            Cell::new(&row.date),
            Cell::new(&row.id),
        ]);
    }
    println!("{table}");
    println!("\nReview an attempt with: quizport detail --id <ID>");

    Ok(())
}
