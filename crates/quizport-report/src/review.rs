//! Per-question review of a past attempt.

use quizport_core::model::{AttemptDetail, ReviewedResult};

use crate::history::format_date;

/// How an option is marked in the review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// The canonical answer.
    Correct,
    /// The student's choice when it was not the canonical answer.
    Wrong,
    Plain,
}

impl OptionMark {
    fn badge(self) -> &'static str {
        match self {
            OptionMark::Correct => "  [Correct]",
            OptionMark::Wrong => "  [Wrong]",
            OptionMark::Plain => "",
        }
    }
}

/// Pair each option of `result` with its mark.
pub fn mark_options(result: &ReviewedResult) -> Vec<(&str, OptionMark)> {
    result
        .question
        .options
        .iter()
        .map(|option| {
            let mark = if *option == result.correct_answer {
                OptionMark::Correct
            } else if result.user_answer.as_deref() == Some(option.as_str()) {
                OptionMark::Wrong
            } else {
                OptionMark::Plain
            };
            (option.as_str(), mark)
        })
        .collect()
}

/// Render a plain-text review of one attempt.
pub fn render_review(detail: &AttemptDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("Quiz Details for {}\n", detail.subject));
    out.push_str(&format!("Date:  {}\n", format_date(&detail.date)));
    out.push_str(&format!(
        "Score: {} / {}\n",
        detail.correct_count(),
        detail.results.len()
    ));

    for (index, result) in detail.results.iter().enumerate() {
        out.push_str(&format!("\nQ{}: {}\n", index + 1, result.question.prompt));
        for (option, mark) in mark_options(result) {
            out.push_str(&format!("  - {option}{}\n", mark.badge()));
        }
        if result.user_answer.is_none() {
            out.push_str("  (not answered)\n");
        }
    }
    out
}
