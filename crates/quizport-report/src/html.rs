//! HTML review generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use quizport_core::model::AttemptDetail;

use crate::history::format_date;
use crate::review::{mark_options, OptionMark};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML review page for one attempt.
pub fn generate_review_html(detail: &AttemptDetail) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Quiz Details for {}</title>\n",
        html_escape(&detail.subject)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!(
        "<h1>Quiz Details for {}</h1>\n",
        html_escape(&detail.subject)
    ));
    html.push_str(&format!(
        "<p class=\"meta\">Date: {} | Score: <strong>{} / {}</strong></p>\n",
        format_date(&detail.date),
        detail.correct_count(),
        detail.results.len()
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"review\">\n");
    for (index, result) in detail.results.iter().enumerate() {
        html.push_str("<div class=\"question\">\n");
        html.push_str(&format!(
            "<h3><strong>Q{}:</strong> {}</h3>\n<ul>\n",
            index + 1,
            html_escape(&result.question.prompt)
        ));
        for (option, mark) in mark_options(result) {
            let (class, badge) = match mark {
                OptionMark::Correct => ("correct", "<span class=\"badge correct\">Correct</span>"),
                OptionMark::Wrong => ("wrong", "<span class=\"badge wrong\">Wrong</span>"),
                OptionMark::Plain => ("plain", ""),
            };
            html.push_str(&format!(
                "<li class=\"{}\">{}{}</li>\n",
                class,
                html_escape(option),
                badge
            ));
        }
        html.push_str("</ul>\n");
        if result.user_answer.is_none() {
            html.push_str("<p class=\"unanswered\">Not answered</p>\n");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML review to a file.
pub fn write_html_review(detail: &AttemptDetail, path: &Path) -> Result<()> {
    let html = generate_review_html(detail);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --correct: #d4edda; --wrong: #f8d7da; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --correct: #064e3b; --wrong: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); max-width: 800px; }
.meta { color: #6b7280; }
.question { margin-bottom: 1.5rem; }
ul { list-style: none; padding: 0; }
li { border: 1px solid var(--border); border-radius: 5px; padding: 0.75rem 1.25rem; margin-bottom: 0.5rem; display: flex; justify-content: space-between; }
li.correct { background: var(--correct); }
li.wrong { background: var(--wrong); }
.badge { color: #fff; padding: 0.2em 0.6em; border-radius: 5px; font-weight: bold; font-size: 0.85rem; }
.badge.correct { background: #28a745; }
.badge.wrong { background: #dc3545; }
.unanswered { color: #6b7280; font-style: italic; }
"#;
