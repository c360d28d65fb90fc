use anyhow::{Context, Result, bail};
use nba_api::client::DEFAULT_PAUSE;
use std::path::PathBuf;
use std::time::Duration;

/// Run configuration from the environment. Flags that change behavior per
/// invocation live on the CLI; secrets and machine-specific paths live
/// here.
#[derive(Debug, Clone)]
pub struct Config {
    /// RapidAPI key, shared by both providers.
    pub api_key: String,
    pub output_dir: PathBuf,
    pub playoff_table: PathBuf,
    /// Pause after every provider call.
    pub pause: Duration,
    /// Only needed with --publish.
    pub x_bearer_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("NBA_API_KEY")
            .context("NBA_API_KEY must be set (RapidAPI key for both providers)")?;
        if api_key.trim().is_empty() {
            bail!("NBA_API_KEY is set but empty");
        }

        let output_dir = std::env::var("HOOPRANK_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./scoring"));
        let playoff_table = std::env::var("HOOPRANK_PLAYOFF_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| output_dir.join("playoff.csv"));

        let pause = match std::env::var("HOOPRANK_PAUSE_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("HOOPRANK_PAUSE_SECS is not a number: {raw}"))?,
            ),
            Err(_) => DEFAULT_PAUSE,
        };

        let x_bearer_token = std::env::var("X_BEARER_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self { api_key, output_dir, playoff_table, pause, x_bearer_token })
    }
}
