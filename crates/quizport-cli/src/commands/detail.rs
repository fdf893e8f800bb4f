//! The `quizport detail` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizport_report::{render_review, write_html_review};

pub async fn execute(
    id: String,
    html: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, api) = super::connect(config_path.as_deref())?;
    let credential = super::require_credential(&config)?;

    let detail = api
        .attempt_detail(&credential, &id)
        .await
        .with_context(|| format!("could not load attempt '{id}'"))?;

    print!("{}", render_review(&detail));

    if let Some(path) = html {
        write_html_review(&detail, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("HTML review: {}", path.display());
    }

    Ok(())
}
