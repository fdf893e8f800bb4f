//! The `quizport init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizport.toml").exists() {
        println!("quizport.toml already exists, skipping.");
    } else {
        std::fs::write("quizport.toml", SAMPLE_CONFIG)?;
        println!("Created quizport.toml");
    }

    println!("\nNext steps:");
    println!("  1. Set base_url to your portal's API and export QUIZPORT_TOKEN");
    println!("  2. Run: quizport instructions --subject DBMS");
    println!("  3. Run: quizport take --subject DBMS");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizport configuration

[api]
base_url = "http://localhost:5000/api"
timeout_secs = 30
token = "${QUIZPORT_TOKEN}"

[quiz]
duration_secs = 1800
tick_millis = 1000
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config = quizport_api::parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.quiz.duration_secs, 1800);
        assert_eq!(config.api.timeout_secs, 30);
    }
}
