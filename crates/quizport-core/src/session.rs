//! The quiz session state machine.
//!
//! `QuizSession` is a plain value: every transition is a synchronous method
//! call, so the actor in [`crate::engine`] can serialize user commands and
//! countdown ticks through the same functions. The only way out of
//! `Active` is a [`SubmissionTicket`], and a session hands out at most one.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{LoadError, SessionError, SubmissionError};
use crate::model::{Aggregate, Question};
use crate::scoring::{score_answers, ScoredAttempt};

/// Countdown length used by the portal's quizzes (30 minutes).
pub const DEFAULT_DURATION_SECS: u32 = 1800;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum SessionPhase {
    Active,
    Submitting,
    Succeeded(Aggregate),
    Failed(String),
}

impl SessionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Active => "active",
            SessionPhase::Submitting => "submitting",
            SessionPhase::Succeeded(_) => "succeeded",
            SessionPhase::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Succeeded(_) | SessionPhase::Failed(_))
    }
}

/// Result of a navigation request. Anything but `Moved` left the index alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(usize),
    /// Next was refused because the current question has no answer.
    Unanswered,
    AtLastQuestion,
    AtFirstQuestion,
}

/// What started the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitTrigger {
    Manual,
    Expired,
}

/// Result of one countdown tick.
#[derive(Debug)]
pub enum TickOutcome {
    /// Still running with this many seconds left.
    Running(u32),
    /// The countdown hit zero and forced submission.
    Expired(SubmissionTicket),
    /// The session is no longer active; the tick was ignored.
    Stopped,
}

/// Authorization for the single submission of a session.
///
/// Not `Clone`: it is produced once by [`QuizSession`] and consumed by
/// value by the submitter.
#[must_use = "a ticket that is dropped leaves the session stuck in Submitting"]
#[derive(Debug)]
pub struct SubmissionTicket {
    session_id: Uuid,
    subject: String,
    questions: Arc<[Question]>,
    answers: BTreeMap<usize, String>,
    trigger: SubmitTrigger,
    remaining_seconds: u32,
}

impl SubmissionTicket {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn trigger(&self) -> SubmitTrigger {
        self.trigger
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Score the frozen answers.
    pub fn score(&self) -> ScoredAttempt {
        score_answers(&self.questions, &self.answers)
    }
}

/// Read-only view of a session for presenters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub subject: String,
    pub current_index: usize,
    pub question_count: usize,
    pub question: Question,
    pub selected: Option<String>,
    pub answered: usize,
    pub remaining_seconds: u32,
    pub phase: SessionPhase,
}

impl SessionSnapshot {
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.question_count
    }
}

/// One attempt at a subject's quiz.
#[derive(Debug)]
pub struct QuizSession {
    id: Uuid,
    subject: String,
    questions: Arc<[Question]>,
    current_index: usize,
    answers: BTreeMap<usize, String>,
    remaining_seconds: u32,
    submitted: bool,
    phase: SessionPhase,
}

impl QuizSession {
    /// Build an active session from an already shuffled question set.
    pub fn new(
        subject: impl Into<String>,
        questions: Vec<Question>,
        duration_secs: u32,
    ) -> Result<Self, LoadError> {
        let subject = subject.into();
        if questions.is_empty() {
            return Err(LoadError::EmptyResult(subject));
        }

        for (index, question) in questions.iter().enumerate() {
            if !question.is_scorable() {
                tracing::warn!(
                    subject = %subject,
                    question_id = %question.id,
                    index,
                    "canonical answer is not among the options, question can only score wrong"
                );
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            subject,
            questions: questions.into(),
            current_index: 0,
            answers: BTreeMap::new(),
            remaining_seconds: duration_secs,
            submitted: false,
            phase: SessionPhase::Active,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Active => Ok(()),
            ref other => Err(SessionError::InputDisabled(other.label())),
        }
    }

    /// Record `option` as the answer to the current question.
    pub fn select(&mut self, option: &str) -> Result<(), SessionError> {
        self.ensure_active()?;
        if !self.current_question().has_option(option) {
            return Err(SessionError::UnknownOption(option.to_string()));
        }
        self.answers.insert(self.current_index, option.to_string());
        tracing::debug!(index = self.current_index, "option selected");
        Ok(())
    }

    /// Select by zero-based display position on the current question.
    pub fn select_position(&mut self, position: usize) -> Result<(), SessionError> {
        self.ensure_active()?;
        let question = self.current_question();
        let Some(option) = question.options.get(position).cloned() else {
            return Err(SessionError::OptionOutOfRange {
                position,
                available: question.options.len(),
            });
        };
        self.select(&option)
    }

    /// Advance to the next question if the current one is answered.
    pub fn next(&mut self) -> Result<Navigation, SessionError> {
        self.ensure_active()?;
        if !self.answers.contains_key(&self.current_index) {
            return Ok(Navigation::Unanswered);
        }
        if self.current_index + 1 >= self.questions.len() {
            return Ok(Navigation::AtLastQuestion);
        }
        self.current_index += 1;
        Ok(Navigation::Moved(self.current_index))
    }

    /// Go back one question. Never requires an answer.
    pub fn previous(&mut self) -> Result<Navigation, SessionError> {
        self.ensure_active()?;
        if self.current_index == 0 {
            return Ok(Navigation::AtFirstQuestion);
        }
        self.current_index -= 1;
        Ok(Navigation::Moved(self.current_index))
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != SessionPhase::Active {
            return TickOutcome::Stopped;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            tracing::info!(session = %self.id, answered = self.answers.len(), "countdown expired");
            return TickOutcome::Expired(self.begin_submission(SubmitTrigger::Expired));
        }
        TickOutcome::Running(self.remaining_seconds)
    }

    /// Manual submission from the last question.
    pub fn submit(&mut self) -> Result<SubmissionTicket, SessionError> {
        self.ensure_active()?;
        if self.current_index + 1 != self.questions.len() {
            return Err(SessionError::NotLastQuestion);
        }
        if !self.answers.contains_key(&self.current_index) {
            return Err(SessionError::Unanswered(self.current_index));
        }
        Ok(self.begin_submission(SubmitTrigger::Manual))
    }

    fn begin_submission(&mut self, trigger: SubmitTrigger) -> SubmissionTicket {
        debug_assert!(!self.submitted, "a session submits at most once");
        self.submitted = true;
        self.phase = SessionPhase::Submitting;
        tracing::debug!(session = %self.id, ?trigger, "entering submitting");
        SubmissionTicket {
            session_id: self.id,
            subject: self.subject.clone(),
            questions: Arc::clone(&self.questions),
            answers: self.answers.clone(),
            trigger,
            remaining_seconds: self.remaining_seconds,
        }
    }

    /// Record the outcome of the submission attempt.
    pub fn complete(&mut self, outcome: &Result<Aggregate, SubmissionError>) {
        if self.phase != SessionPhase::Submitting {
            tracing::warn!(session = %self.id, phase = self.phase.label(), "ignoring stray submission outcome");
            return;
        }
        self.phase = match outcome {
            Ok(aggregate) => SessionPhase::Succeeded(*aggregate),
            Err(e) => SessionPhase::Failed(e.to_string()),
        };
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            subject: self.subject.clone(),
            current_index: self.current_index,
            question_count: self.questions.len(),
            question: self.current_question().clone(),
            selected: self.answers.get(&self.current_index).cloned(),
            answered: self.answers.len(),
            remaining_seconds: self.remaining_seconds,
            phase: self.phase.clone(),
        }
    }
}
