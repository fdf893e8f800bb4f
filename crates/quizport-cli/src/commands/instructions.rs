//! The `quizport instructions` command.

use std::path::PathBuf;

use anyhow::Result;

use quizport_core::QuestionSource;
use quizport_report::format_clock;

pub async fn execute(subject: String, config_path: Option<PathBuf>) -> Result<()> {
    let (config, api) = super::connect(config_path.as_deref())?;
    let questions = QuestionSource::new(api).fetch(&subject).await?;

    println!("{subject} Quiz Instructions");
    println!("  Number of questions:   {}", questions.len());
    println!(
        "  Time allowed:          {}",
        format_clock(config.quiz.duration_secs)
    );
    println!("  Each question carries: 1 mark");
    println!("  Negative marking:      No");
    println!();
    println!("Answer every question before moving to the next one.");
    println!("When the time runs out, your answers so far are submitted automatically.");
    println!("Start with: quizport take --subject \"{subject}\"");

    Ok(())
}
