//! quizport-core: Quiz session engine, scoring, and the content API contract.
//!
//! A session is loaded by [`loader::SessionLoader`], driven as a plain state
//! machine ([`session::QuizSession`]) inside the actor in [`engine`], and
//! submitted exactly once by [`submitter::Submitter`].

pub mod countdown;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod randomizer;
pub mod scoring;
pub mod session;
pub mod submitter;
pub mod traits;

#[cfg(test)]
mod testing;

pub use engine::{spawn_session, EngineConfig, SessionHandle};
pub use error::{ContentError, LoadError, SessionError, SubmissionError};
pub use loader::{PendingLoad, QuestionSource, SessionLoader};
pub use session::{QuizSession, SessionPhase, SessionSnapshot, DEFAULT_DURATION_SECS};
pub use submitter::Submitter;
pub use traits::ContentApi;
