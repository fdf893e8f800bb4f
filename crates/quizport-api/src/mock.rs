//! Mock content API for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use quizport_core::error::ContentError;
use quizport_core::model::{
    AttemptDetail, AttemptRecord, Credential, Question, Submission, SubjectResult,
};
use quizport_core::traits::ContentApi;

/// An in-memory content API for exercising sessions without a server.
///
/// Subjects not registered with [`MockContentApi::with_subject`] return an
/// empty question set.
#[derive(Default)]
pub struct MockContentApi {
    subjects: HashMap<String, Vec<Question>>,
    history: Vec<AttemptRecord>,
    details: HashMap<String, AttemptDetail>,
    subject_results: HashMap<String, Vec<SubjectResult>>,
    submit_latency: Option<Duration>,
    reject_submissions: bool,
    /// Number of submit calls made.
    submit_calls: AtomicU32,
    /// Submissions received, in order.
    submissions: Mutex<Vec<Submission>>,
}

impl MockContentApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: &str, questions: Vec<Question>) -> Self {
        self.subjects.insert(subject.to_string(), questions);
        self
    }

    pub fn with_history(mut self, history: Vec<AttemptRecord>) -> Self {
        self.history = history;
        self
    }

    pub fn with_detail(mut self, detail: AttemptDetail) -> Self {
        self.details.insert(detail.id.clone(), detail);
        self
    }

    pub fn with_subject_results(mut self, subject: &str, results: Vec<SubjectResult>) -> Self {
        self.subject_results.insert(subject.to_string(), results);
        self
    }

    /// Delay each submission, to hold a session in `Submitting`.
    pub fn with_submit_latency(mut self, latency: Duration) -> Self {
        self.submit_latency = Some(latency);
        self
    }

    /// Fail every submission with a server error.
    pub fn rejecting_submissions(mut self) -> Self {
        self.reject_submissions = true;
        self
    }

    /// Get the number of submit calls made to this API.
    pub fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::Relaxed)
    }

    /// Get the last submission received.
    pub fn last_submission(&self) -> Option<Submission> {
        self.submissions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

#[async_trait]
impl ContentApi for MockContentApi {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_questions(&self, subject: &str) -> Result<Vec<Question>, ContentError> {
        Ok(self.subjects.get(subject).cloned().unwrap_or_default())
    }

    async fn submit_results(
        &self,
        credential: &Credential,
        submission: &Submission,
    ) -> Result<(), ContentError> {
        self.submit_calls.fetch_add(1, Ordering::Relaxed);
        if credential.is_empty() {
            return Err(ContentError::Unauthorized("missing token".into()));
        }
        self.submissions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(submission.clone());
        if let Some(latency) = self.submit_latency {
            tokio::time::sleep(latency).await;
        }
        if self.reject_submissions {
            return Err(ContentError::ApiError {
                status: 500,
                message: "Error submitting quiz".into(),
            });
        }
        Ok(())
    }

    async fn history(&self, credential: &Credential) -> Result<Vec<AttemptRecord>, ContentError> {
        if credential.is_empty() {
            return Err(ContentError::Unauthorized("missing token".into()));
        }
        Ok(self.history.clone())
    }

    async fn attempt_detail(
        &self,
        credential: &Credential,
        attempt_id: &str,
    ) -> Result<AttemptDetail, ContentError> {
        if credential.is_empty() {
            return Err(ContentError::Unauthorized("missing token".into()));
        }
        self.details
            .get(attempt_id)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(attempt_id.to_string()))
    }

    async fn subject_results(&self, subject: &str) -> Result<Vec<SubjectResult>, ContentError> {
        Ok(self.subject_results.get(subject).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_subject_is_empty() {
        let api = MockContentApi::new();
        assert!(api.fetch_questions("anything").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_submissions() {
        let api = MockContentApi::new();
        let submission = Submission {
            subject: "OS".into(),
            results: vec![],
        };
        api.submit_results(&Credential::new("t"), &submission)
            .await
            .unwrap();
        assert_eq!(api.submit_calls(), 1);
        assert_eq!(api.last_submission(), Some(submission));
    }

    fn fixtures() -> MockContentApi {
        let attempt: AttemptRecord = serde_json::from_value(serde_json::json!({
            "_id": "attempt-1",
            "subject": "OS",
            "date": "2024-05-01T09:00:00Z",
            "results": [
                {"questionId": "q1", "userAnswer": "FIFO", "correctAnswer": "FIFO", "isCorrect": true}
            ]
        }))
        .unwrap();
        let detail: AttemptDetail = serde_json::from_value(serde_json::json!({
            "_id": "attempt-1",
            "subject": "OS",
            "date": "2024-05-01T09:00:00Z",
            "results": [{
                "questionId": {"_id": "q1", "question": "Simplest scheduler?", "options": ["FIFO", "SJF"]},
                "userAnswer": "FIFO",
                "correctAnswer": "FIFO",
                "isCorrect": true
            }]
        }))
        .unwrap();
        let row: SubjectResult = serde_json::from_value(serde_json::json!({
            "user": {"name": "Ravi", "rollNo": "CS-07"},
            "results": [
                {"questionId": "q1", "userAnswer": "SJF", "correctAnswer": "FIFO", "isCorrect": false}
            ]
        }))
        .unwrap();

        MockContentApi::new()
            .with_history(vec![attempt])
            .with_detail(detail)
            .with_subject_results("OS", vec![row])
    }

    #[tokio::test]
    async fn serves_registered_read_models() {
        let api = fixtures();
        let token = Credential::new("t");

        let history = api.history(&token).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].correct_count(), 1);

        let detail = api.attempt_detail(&token, "attempt-1").await.unwrap();
        assert_eq!(detail.results[0].question.prompt, "Simplest scheduler?");

        let rows = api.subject_results("OS").await.unwrap();
        assert_eq!(rows[0].user.roll_no, "CS-07");
        assert_eq!(rows[0].score(), 0);
        assert!(api.subject_results("DBMS").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_attempt_is_not_found() {
        let api = fixtures();
        let err = api
            .attempt_detail(&Credential::new("t"), "attempt-9")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(id) if id == "attempt-9"));
    }

    #[tokio::test]
    async fn rejected_submission_is_still_counted() {
        let api = MockContentApi::new().rejecting_submissions();
        let submission = Submission {
            subject: "OS".into(),
            results: vec![],
        };
        let err = api
            .submit_results(&Credential::new("t"), &submission)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::ApiError { status: 500, .. }));
        assert_eq!(api.submit_calls(), 1);
    }

    #[tokio::test]
    async fn empty_credential_is_unauthorized() {
        let api = MockContentApi::new();
        let err = api.history(&Credential::new("")).await.unwrap_err();
        assert!(matches!(err, ContentError::Unauthorized(_)));
    }
}
