//! Civil-time normalization for provider timestamps.
//!
//! The primary provider reports everything in UTC while games are scheduled
//! in US Eastern time, so "which day did this game belong to" is an ET
//! question. CET renderings exist purely for display.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Europe::Warsaw;

const FMT: &str = "%Y-%m-%d %H:%M";
const DATE_FMT: &str = "%Y-%m-%d";

/// One provider timestamp rendered in every zone the pipeline cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameTimes {
    pub utc: String,
    pub league_local: String,
    /// ET calendar date — the civil date the run filters on.
    pub league_date: NaiveDate,
    pub display: String,
}

/// Parse a raw provider timestamp and render it in UTC, ET and CET.
///
/// Payloads usually carry `2019-12-04T02:09:00.000Z` but occasionally a bare
/// `2019-12-04`; anything else is malformed and yields `None`, which the
/// pipeline treats as a record to skip.
pub fn format_game_times(raw: &str) -> Option<GameTimes> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.3fZ")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FMT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    let utc: DateTime<Utc> = naive.and_utc();
    let eastern = utc.with_timezone(&New_York);
    let warsaw = utc.with_timezone(&Warsaw);

    Some(GameTimes {
        utc: utc.format(FMT).to_string(),
        league_local: eastern.format(FMT).to_string(),
        league_date: eastern.date_naive(),
        display: warsaw.format(FMT).to_string(),
    })
}
