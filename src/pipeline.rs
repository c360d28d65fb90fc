//! Data assembly: fetch, reconcile, enrich, score, filter.
//!
//! Everything here runs strictly sequentially. Each remote call is paced by
//! the clients themselves, so a run's wall-clock time is dominated by the
//! quota pause, not by the work.

use crate::playoff::PlayoffTable;
use crate::record::GameRecord;
use crate::scoring::entertainment_score;
use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info, warn};
use nba_api::client::{BasketApi, NbaApi};
use nba_api::{GameStatus, GameSummary, OvertimeFlag};

/// Fetch and score every finished game the primary provider buckets under
/// `date`. Primary-provider failure is fatal; everything downstream
/// degrades per game.
pub async fn collect_games(
    nba: &NbaApi,
    basket: &BasketApi,
    date: NaiveDate,
    playoff: &PlayoffTable,
    playoff_mode: bool,
) -> Result<Vec<GameRecord>> {
    let games = nba.fetch_games(date).await?;
    info!("{date}: {} raw entries from the primary provider", games.len());

    // The cross-check feed only contributes overtime flags; without it
    // every game simply keeps the primary provider's count.
    let flags = match basket.fetch_overtime_flags(date).await {
        Ok(flags) => flags,
        Err(e) => {
            warn!("{date}: overtime cross-check unavailable, continuing without it: {e}");
            Vec::new()
        }
    };

    let survivors = reconcile(games, &flags);
    info!("{date}: {} finished games after reconciliation", survivors.len());

    let mut records = Vec::with_capacity(survivors.len());
    for (game, overtime_secondary) in survivors {
        let label = format!("{}-{}", game.visitor.short_name, game.host.short_name);

        // Two standings calls per game, per the provider contract. A game
        // whose standings cannot be resolved is excluded, not guessed at.
        let visitor_standing = match nba.fetch_standing(&game.visitor.id).await {
            Ok(s) => s,
            Err(e) => {
                warn!("{label}: visitor standings unavailable, excluding game: {e}");
                continue;
            }
        };
        let host_standing = match nba.fetch_standing(&game.host.id).await {
            Ok(s) => s,
            Err(e) => {
                warn!("{label}: host standings unavailable, excluding game: {e}");
                continue;
            }
        };

        // Best effort: a failed stat fetch costs this game its individual
        // performance bonus, never the batch.
        let highest_player_points = match nba.fetch_highest_points(&game.game_id).await {
            Ok(points) => points,
            Err(e) => {
                warn!("{label}: box score unavailable, assuming no standout scorer: {e}");
                0
            }
        };

        let playoff_bonus = if playoff_mode {
            playoff.bonus(&game.visitor.short_name)
        } else {
            0
        };

        let mut record = GameRecord {
            game,
            visitor_standing,
            host_standing,
            overtime_secondary,
            highest_player_points,
            playoff_bonus,
            score: None,
        };
        record.score = Some(entertainment_score(&record, playoff_mode));
        debug!("{label}: score {}", record.score.unwrap_or(0));
        records.push(record);
    }

    Ok(records)
}

/// The reconciliation filter: drop everything that is not a scoreable
/// finished game, and pair each survivor with the secondary provider's
/// overtime verdict.
///
/// Rescheduling leaves "Scheduled" ghost entries next to the real
/// "Finished" row for the same matchup; dropping every non-finished status
/// removes the duplicates along with games genuinely still to come.
pub fn reconcile(
    games: Vec<GameSummary>,
    flags: &[OvertimeFlag],
) -> Vec<(GameSummary, u32)> {
    games
        .into_iter()
        .filter(|g| {
            if g.status != GameStatus::Finished {
                return false;
            }
            if g.visitor.id.is_empty() || g.host.id.is_empty() {
                debug!("dropping malformed entry {:?}: missing team id", g.game_id);
                return false;
            }
            if g.start.is_none() {
                debug!("dropping entry {:?}: unparseable start time", g.game_id);
                return false;
            }
            true
        })
        .map(|g| {
            // Fail open: no match in the cross-check feed means no extra
            // overtime evidence, not an error.
            let overtime_secondary = flags
                .iter()
                .find(|f| f.host_full_name == g.host.full_name)
                .map(|f| u32::from(f.went_to_overtime))
                .unwrap_or(0);
            (g, overtime_secondary)
        })
        .collect()
}

/// The result assembler: concatenate the per-date batches, keep only rows
/// whose ET calendar date is the target date, and order by score
/// descending.
pub fn assemble(batches: Vec<Vec<GameRecord>>, target: NaiveDate) -> Vec<GameRecord> {
    let mut rows: Vec<GameRecord> = batches
        .into_iter()
        .flatten()
        .filter(|r| r.league_date() == Some(target))
        .collect();
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows
}
