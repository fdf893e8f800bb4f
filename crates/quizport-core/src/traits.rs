//! The content API contract consumed by the session engine.
//!
//! Implemented by `quizport-api` over HTTP and by its in-memory mock.

use async_trait::async_trait;

use crate::error::ContentError;
use crate::model::{AttemptDetail, AttemptRecord, Credential, Question, Submission, SubjectResult};

/// Remote service that stores questions and attempt results.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// `GET /quiz/questions/{subject}`. An empty list is a valid response.
    async fn fetch_questions(&self, subject: &str) -> Result<Vec<Question>, ContentError>;

    /// `POST /quiz/submit`.
    async fn submit_results(
        &self,
        credential: &Credential,
        submission: &Submission,
    ) -> Result<(), ContentError>;

    /// `GET /quiz/history`.
    async fn history(&self, credential: &Credential) -> Result<Vec<AttemptRecord>, ContentError>;

    /// `GET /quiz/details/{id}`.
    async fn attempt_detail(
        &self,
        credential: &Credential,
        attempt_id: &str,
    ) -> Result<AttemptDetail, ContentError>;

    /// `GET /admin/results/{subject}`.
    async fn subject_results(&self, subject: &str) -> Result<Vec<SubjectResult>, ContentError>;
}
