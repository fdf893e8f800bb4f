pub mod admin_results;
pub mod detail;
pub mod history;
pub mod init;
pub mod instructions;
pub mod take;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use quizport_api::{create_content_api, load_config_from, QuizportConfig};
use quizport_core::model::Credential;
use quizport_core::ContentApi;

/// Load configuration and build the content API client.
pub(crate) fn connect(config_path: Option<&Path>) -> Result<(QuizportConfig, Arc<dyn ContentApi>)> {
    let config = load_config_from(config_path)?;
    let api = create_content_api(&config.api)?;
    Ok((config, api))
}

pub(crate) fn require_credential(config: &QuizportConfig) -> Result<Credential> {
    config
        .credential()
        .context("no session token configured; set QUIZPORT_TOKEN or [api] token in quizport.toml")
}
