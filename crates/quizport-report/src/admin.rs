//! Per-subject results for administrators.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use quizport_core::model::SubjectResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminRow {
    pub roll_no: String,
    pub name: String,
    pub score: usize,
}

pub fn admin_rows(results: &[SubjectResult]) -> Vec<AdminRow> {
    results
        .iter()
        .map(|r| AdminRow {
            roll_no: r.user.roll_no.clone(),
            name: r.user.name.clone(),
            score: r.score(),
        })
        .collect()
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub fn render_admin_csv(rows: &[AdminRow]) -> String {
    let mut out = String::from("Roll No,Name,Score\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&row.roll_no),
            csv_field(&row.name),
            row.score
        ));
    }
    out
}

/// Write the results listing as CSV, creating parent directories.
pub fn write_admin_csv(rows: &[AdminRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_admin_csv(rows))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
