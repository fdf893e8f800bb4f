//! The `quizport admin-results` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizport_report::{admin_rows, write_admin_csv};

pub async fn execute(
    subject: String,
    csv: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_config, api) = super::connect(config_path.as_deref())?;

    let results = api.subject_results(&subject).await?;
    let rows = admin_rows(&results);

    println!("{subject} Quiz Results");
    if rows.is_empty() {
        println!("No submissions yet.");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Roll No", "Name", "Score"]);
        for row in &rows {
            table.add_row(vec![
                Cell::new(&row.roll_no),
                Cell::new(&row.name),
                Cell::new(row.score),
            ]);
        }
        println!("{table}");
    }

    if let Some(path) = csv {
        write_admin_csv(&rows, &path)?;
        eprintln!("CSV export: {}", path.display());
    }

    Ok(())
}
