//! quizport-report: presenting quiz outcomes.
//!
//! Everything here renders data the content API already holds: the
//! aggregate returned by a submission, the attempt history, one attempt's
//! per-question review and the per-subject admin listing.

pub mod admin;
pub mod history;
pub mod html;
pub mod review;
pub mod summary;

pub use admin::{admin_rows, render_admin_csv, write_admin_csv, AdminRow};
pub use history::{history_rows, HistoryRow, NO_HISTORY};
pub use html::{generate_review_html, write_html_review};
pub use review::{mark_options, render_review, OptionMark};
pub use summary::{format_clock, render_summary};
