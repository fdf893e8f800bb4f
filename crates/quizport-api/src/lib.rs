//! quizport-api: content API client integrations.
//!
//! Implements the `ContentApi` trait over HTTP, plus an in-memory mock,
//! and loads the workspace configuration.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{
    create_content_api, load_config_from, parse_config, ApiConfig, QuizConfig,
    QuizportConfig,
};
pub use http::HttpContentApi;
pub use mock::MockContentApi;
pub use quizport_core::error::ContentError;
