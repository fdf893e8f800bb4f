//! Configuration loading and content API factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizport_core::engine::EngineConfig;
use quizport_core::model::Credential;
use quizport_core::session::DEFAULT_DURATION_SECS;
use quizport_core::traits::ContentApi;

use crate::http::{HttpContentApi, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Where the content API lives and how to authenticate to it.
///
/// Note: Custom Debug impl masks the token to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Session credential issued at login.
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            token: None,
        }
    }
}

/// Quiz timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Countdown length in seconds.
    #[serde(default = "default_duration")]
    pub duration_secs: u32,
    /// Milliseconds per countdown second.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration(),
            tick_millis: default_tick_millis(),
        }
    }
}

/// Top-level quizport configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizportConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_duration() -> u32 {
    DEFAULT_DURATION_SECS
}
fn default_tick_millis() -> u64 {
    1000
}

impl QuizportConfig {
    /// The configured credential, if a non-empty token is set.
    pub fn credential(&self) -> Option<Credential> {
        self.api
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(Credential::new)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            tick: Duration::from_millis(self.quiz.tick_millis.max(1)),
            ..EngineConfig::default()
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order:
/// 1. `quizport.toml` in the current directory
/// 2. `~/.config/quizport/config.toml`
///
/// Environment variable overrides: `QUIZPORT_BASE_URL`, `QUIZPORT_TOKEN`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizportConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizport.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizportConfig::default(),
    };

    if let Ok(url) = std::env::var("QUIZPORT_BASE_URL") {
        config.api.base_url = url;
    }
    if let Ok(token) = std::env::var("QUIZPORT_TOKEN") {
        config.api.token = Some(token);
    }

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Parse a TOML string and expand `${VAR}` references.
pub fn parse_config(content: &str) -> Result<QuizportConfig> {
    let mut config: QuizportConfig = toml::from_str(content)?;
    config.api.base_url = resolve_env_vars(&config.api.base_url);
    config.api.token = config.api.token.as_deref().map(resolve_env_vars);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizport"))
}

/// Create the content API client described by `config`.
pub fn create_content_api(config: &ApiConfig) -> Result<Arc<dyn ContentApi>> {
    let api = HttpContentApi::new(&config.base_url, config.timeout_secs)
        .with_context(|| format!("invalid content API configuration: {}", config.base_url))?;
    Ok(Arc::new(api))
}
