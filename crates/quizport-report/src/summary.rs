//! Post-submission summary.

use quizport_core::model::Aggregate;

/// Render the summary shown right after a successful submission.
pub fn render_summary(subject: &str, aggregate: &Aggregate) -> String {
    let mut out = String::new();
    out.push_str(&format!("Quiz Summary: {subject}\n"));
    out.push_str(&format!("  Total Questions: {}\n", aggregate.total_questions()));
    out.push_str(&format!("  Correct Answers: {}\n", aggregate.correct_count));
    out.push_str(&format!("  Wrong Answers:   {}\n", aggregate.wrong_count));
    out.push_str(&format!("  Total Marks:     {}\n", aggregate.total_marks));
    out
}

/// Format remaining seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
