mod config;
mod pipeline;
mod playoff;
mod publish;
mod record;
mod report;
mod scoring;

use crate::config::Config;
use crate::pipeline::{assemble, collect_games};
use crate::playoff::PlayoffTable;
use crate::publish::{XPublisher, compose_post};
use anyhow::{Context, bail};
use chrono::{Days, NaiveDate, Utc};
use chrono_tz::America::New_York;
use clap::Parser;
use log::{error, info};
use nba_api::client::{BasketApi, NbaApi, Pacer};
use std::fs::File;

const ENV_HELP: &str = "Environment:
  NBA_API_KEY           RapidAPI key for both game data providers (required)
  HOOPRANK_OUTPUT_DIR   Directory for scoring files (default ./scoring)
  HOOPRANK_PLAYOFF_CSV  Playoff bonus table (default <output dir>/playoff.csv)
  HOOPRANK_PAUSE_SECS   Pause after each provider call (default 8)
  X_BEARER_TOKEN        X API token, required with --publish";

/// Ranks a day's NBA games by a 0-100 entertainment score, without
/// revealing any results. Meant to run nightly from cron.
#[derive(Debug, Parser)]
#[command(name = "hooprank", version, about, after_help = ENV_HELP)]
struct Cli {
    /// Target date in ET (YYYY-MM-DD); defaults to yesterday, Eastern time
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Apply the playoff series bonus table
    #[arg(long)]
    playoff: bool,

    /// Also write a JSON-lines variant of the ranking
    #[arg(long)]
    json: bool,

    /// Also write an HTML table of the ranking
    #[arg(long)]
    html: bool,

    /// Post the top games to X after writing the files
    #[arg(long)]
    publish: bool,

    /// Log at debug level instead of info
    #[arg(short, long)]
    verbose: bool,
}

// Strictly sequential by design: every provider call is awaited in order
// and paced, so a multi-threaded runtime would have nothing to do.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .init();

    let config = Config::from_env()?;
    if cli.publish && config.x_bearer_token.is_none() {
        bail!("--publish requires X_BEARER_TOKEN");
    }

    // Games are scheduled in ET, so "yesterday" is an ET question too.
    let target = cli
        .date
        .unwrap_or_else(|| Utc::now().with_timezone(&New_York).date_naive() - Days::new(1));

    let playoff_table = if cli.playoff {
        let table = PlayoffTable::load(&config.playoff_table)?;
        info!("playoff mode: {} series bonuses loaded", table.len());
        table
    } else {
        PlayoffTable::empty()
    };

    let pacer = Pacer::new(config.pause);
    let nba = NbaApi::new(&config.api_key, pacer);
    let basket = BasketApi::new(&config.api_key, pacer);

    // The provider buckets games by UTC date while games run on ET
    // evenings, so a late tip-off lands in the next UTC bucket. Fetch the
    // target date and the day after, then filter back to the target.
    let day_after = target + Days::new(1);
    let mut batches = Vec::new();
    for date in [target, day_after] {
        batches.push(collect_games(&nba, &basket, date, &playoff_table, cli.playoff).await?);
    }

    let ranked = assemble(batches, target);
    if ranked.is_empty() {
        info!("no games to evaluate on {target}");
        return Ok(());
    }
    info!("{} games ranked for {target}", ranked.len());

    let rows = report::ranked_rows(&ranked);
    let (stamped, canonical) =
        report::write_csv_files(&rows, &config.output_dir, target, cli.playoff, Utc::now())?;
    info!("wrote {} and {}", stamped.display(), canonical.display());

    if cli.json {
        let path = config.output_dir.join(format!("scoring-{target}.json"));
        let file = File::create(&path).with_context(|| format!("writing {}", path.display()))?;
        report::write_json_lines(&rows, file)?;
        info!("wrote {}", path.display());
    }
    if cli.html {
        let path = config.output_dir.join(format!("scoring-{target}.html"));
        let file = File::create(&path).with_context(|| format!("writing {}", path.display()))?;
        report::write_html(&rows, file, target)?;
        info!("wrote {}", path.display());
    }

    if cli.publish {
        // Token presence checked above.
        let token = config.x_bearer_token.as_deref().unwrap_or_default();
        let Some(post) = compose_post(&rows, target) else {
            info!("nothing to publish");
            return Ok(());
        };
        if let Err(e) = XPublisher::new(token).post(&post).await {
            // No retry: next cron run supersedes this ranking anyway.
            error!("publish failed, files were still written: {e:#}");
        }
    }

    Ok(())
}
