//! Question loading and session construction.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tokio::task::JoinHandle;

use crate::error::LoadError;
use crate::model::Question;
use crate::randomizer::shuffle_all;
use crate::session::{QuizSession, DEFAULT_DURATION_SECS};
use crate::traits::ContentApi;

/// Fetches a subject's question set. One attempt, no retry.
#[derive(Clone)]
pub struct QuestionSource {
    api: Arc<dyn ContentApi>,
}

impl QuestionSource {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    /// Fetch the questions for `subject`, unmodified.
    pub async fn fetch(&self, subject: &str) -> Result<Vec<Question>, LoadError> {
        let questions = self
            .api
            .fetch_questions(subject)
            .await
            .map_err(|source| LoadError::Fetch {
                subject: subject.to_string(),
                source,
            })?;
        if questions.is_empty() {
            return Err(LoadError::EmptyResult(subject.to_string()));
        }
        tracing::debug!(subject, count = questions.len(), "questions fetched");
        Ok(questions)
    }
}

/// Builds shuffled, active sessions.
#[derive(Clone)]
pub struct SessionLoader {
    source: QuestionSource,
    duration_secs: u32,
}

impl SessionLoader {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            source: QuestionSource::new(api),
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }

    pub fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Fetch, shuffle with the thread RNG, and build a session.
    pub async fn load(&self, subject: &str) -> Result<QuizSession, LoadError> {
        let questions = self.source.fetch(subject).await?;
        QuizSession::new(
            subject,
            shuffle_all(questions, &mut rand::rng()),
            self.duration_secs,
        )
    }

    /// Like [`SessionLoader::load`] with a caller-supplied RNG.
    pub async fn load_with_rng<R: Rng + ?Sized>(
        &self,
        subject: &str,
        rng: &mut R,
    ) -> Result<QuizSession, LoadError> {
        let questions = self.source.fetch(subject).await?;
        QuizSession::new(subject, shuffle_all(questions, rng), self.duration_secs)
    }

    /// Start loading in the background. The result of an abandoned load is
    /// discarded when it arrives.
    pub fn spawn(&self, subject: &str) -> PendingLoad {
        let alive = Arc::new(AtomicBool::new(true));
        let loader = self.clone();
        let owned_subject = subject.to_string();
        let flag = Arc::clone(&alive);

        let task = tokio::spawn(async move {
            let questions = loader.source.fetch(&owned_subject).await;
            if !flag.load(Ordering::Acquire) {
                tracing::warn!(subject = %owned_subject, "load abandoned, discarding fetched questions");
                return Err(LoadError::Abandoned(owned_subject));
            }
            QuizSession::new(
                owned_subject.as_str(),
                shuffle_all(questions?, &mut rand::rng()),
                loader.duration_secs,
            )
        });

        PendingLoad {
            subject: subject.to_string(),
            alive,
            task,
        }
    }
}

/// A question fetch in flight.
pub struct PendingLoad {
    subject: String,
    alive: Arc<AtomicBool>,
    task: JoinHandle<Result<QuizSession, LoadError>>,
}

impl PendingLoad {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Mark the load as no longer wanted. The request itself is not cancelled.
    pub fn abandon(&self) {
        self.alive.store(false, Ordering::Release);
    }

    /// Wait for the session. Cancel-safe.
    pub async fn wait(&mut self) -> Result<QuizSession, LoadError> {
        match (&mut self.task).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(subject = %self.subject, "load task failed: {e}");
                Err(LoadError::Abandoned(self.subject.clone()))
            }
        }
    }
}
