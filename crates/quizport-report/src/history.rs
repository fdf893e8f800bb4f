//! Past attempt listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use quizport_core::model::AttemptRecord;

/// Shown in place of the table when the student has no attempts.
pub const NO_HISTORY: &str = "No quizzes taken yet.";

/// One line of the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub subject: String,
    /// `correct / total`
    pub score: String,
    pub date: String,
    /// Attempt id, used with `quizport detail --id`.
    pub id: String,
}

/// Newest attempts first, in the order shown to the student.
pub fn history_rows(attempts: &[AttemptRecord]) -> Vec<HistoryRow> {
    let mut sorted: Vec<&AttemptRecord> = attempts.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
        .into_iter()
        .map(|attempt| HistoryRow {
            subject: attempt.subject.clone(),
            score: format!("{} / {}", attempt.correct_count(), attempt.results.len()),
            date: format_date(&attempt.date),
            id: attempt.id.clone(),
        })
        .collect()
}

pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M UTC").to_string()
}
