//! Builds the scored payload for a session and posts it exactly once.

use std::sync::Arc;

use crate::error::SubmissionError;
use crate::model::{Aggregate, Credential, Submission};
use crate::session::SubmissionTicket;
use crate::traits::ContentApi;

/// Sends a session's results to the content API.
#[derive(Clone)]
pub struct Submitter {
    api: Arc<dyn ContentApi>,
    credential: Credential,
}

impl Submitter {
    pub fn new(api: Arc<dyn ContentApi>, credential: Credential) -> Self {
        Self { api, credential }
    }

    /// Score the ticket and build the request body.
    pub fn build_submission(ticket: &SubmissionTicket) -> (Submission, Aggregate) {
        let scored = ticket.score();
        let submission = Submission {
            subject: ticket.subject().to_string(),
            results: scored.results,
        };
        (submission, scored.aggregate)
    }

    /// Perform the single submission attempt. Failures are not retried.
    pub async fn submit(&self, ticket: SubmissionTicket) -> Result<Aggregate, SubmissionError> {
        let (submission, aggregate) = Self::build_submission(&ticket);
        tracing::info!(
            backend = self.api.name(),
            session = %ticket.session_id(),
            subject = %submission.subject,
            trigger = ?ticket.trigger(),
            results = submission.results.len(),
            "submitting quiz results"
        );

        match self.api.submit_results(&self.credential, &submission).await {
            Ok(()) => Ok(aggregate),
            Err(source) => {
                tracing::error!(subject = %submission.subject, "submission failed: {source}");
                Err(SubmissionError {
                    subject: submission.subject,
                    source,
                })
            }
        }
    }
}
