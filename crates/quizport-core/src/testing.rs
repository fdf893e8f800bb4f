//! In-crate fake content API for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ContentError;
use crate::model::{AttemptDetail, AttemptRecord, Credential, Question, Submission, SubjectResult};
use crate::traits::ContentApi;

#[derive(Default)]
pub(crate) struct FakeApi {
    questions: HashMap<String, Vec<Question>>,
    fetch_delay: Option<Duration>,
    submit_delay: Option<Duration>,
    fail_submissions: bool,
    fetches: AtomicUsize,
    submissions: Mutex<Vec<Submission>>,
}

impl FakeApi {
    pub(crate) fn with_questions(mut self, subject: &str, questions: Vec<Question>) -> Self {
        self.questions.insert(subject.to_string(), questions);
        self
    }

    pub(crate) fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub(crate) fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = Some(delay);
        self
    }

    pub(crate) fn failing_submissions(mut self) -> Self {
        self.fail_submissions = true;
        self
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub(crate) fn last_submission(&self) -> Option<Submission> {
        self.submissions.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ContentApi for FakeApi {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_questions(&self, subject: &str) -> Result<Vec<Question>, ContentError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        match self.questions.get(subject) {
            Some(questions) => Ok(questions.clone()),
            None if subject == "offline" => Err(ContentError::NetworkError("connection refused".into())),
            None => Ok(Vec::new()),
        }
    }

    async fn submit_results(
        &self,
        _credential: &Credential,
        submission: &Submission,
    ) -> Result<(), ContentError> {
        self.submissions.lock().unwrap().push(submission.clone());
        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_submissions {
            return Err(ContentError::ApiError {
                status: 500,
                message: "internal error".into(),
            });
        }
        Ok(())
    }

    async fn history(&self, _credential: &Credential) -> Result<Vec<AttemptRecord>, ContentError> {
        Ok(Vec::new())
    }

    async fn attempt_detail(
        &self,
        _credential: &Credential,
        attempt_id: &str,
    ) -> Result<AttemptDetail, ContentError> {
        Err(ContentError::NotFound(attempt_id.to_string()))
    }

    async fn subject_results(&self, _subject: &str) -> Result<Vec<SubjectResult>, ContentError> {
        Ok(Vec::new())
    }
}
