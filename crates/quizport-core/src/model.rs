//! Core data model types for quizport.
//!
//! These mirror the content API's JSON shapes (`_id`, camelCase fields) so
//! the same values flow from the wire into a session and back out in the
//! submission payload.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A multiple-choice question as served by the content API.
///
/// After a session is built, `options` holds the shuffled display order and
/// is never reordered again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// The prompt text.
    #[serde(rename = "question")]
    pub prompt: String,
    /// Answer choices in display order.
    pub options: Vec<String>,
    /// The canonical correct option string.
    #[serde(rename = "answer")]
    pub correct_answer: String,
}

impl Question {
    /// Whether `option` is one of this question's choices.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Whether the canonical answer is present among the options.
    ///
    /// A question that is not scorable is still shown, but every answer
    /// to it counts as wrong.
    pub fn is_scorable(&self) -> bool {
        self.has_option(&self.correct_answer)
    }
}

/// The caller's session credential, sent as a bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"***").finish()
    }
}

/// One scored answer, as posted to and returned by the content API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub question_id: String,
    /// `None` when the question was left unanswered (serialized as `null`).
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Body of `POST /quiz/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub subject: String,
    pub results: Vec<ResultRecord>,
}

/// Post-submission summary handed to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub correct_count: usize,
    pub wrong_count: usize,
    pub total_marks: usize,
}

impl Aggregate {
    /// Number of questions in the attempt.
    pub fn total_questions(&self) -> usize {
        self.correct_count + self.wrong_count
    }
}

/// One past attempt from `GET /quiz/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub results: Vec<ResultRecord>,
}

impl AttemptRecord {
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }
}

/// Question text and options populated into a detailed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedQuestion {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A result whose `questionId` has been replaced by the question itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedResult {
    #[serde(rename = "questionId")]
    pub question: PopulatedQuestion,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// One past attempt from `GET /quiz/details/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub results: Vec<ReviewedResult>,
}

impl AttemptDetail {
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }
}

/// The student an administrator-facing result belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub name: String,
    #[serde(default)]
    pub roll_no: String,
}

/// One row of `GET /admin/results/{subject}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectResult {
    pub user: Student,
    #[serde(default)]
    pub results: Vec<ResultRecord>,
}

impl SubjectResult {
    pub fn score(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }
}
