//! The entertainment-score engine.
//!
//! Additive point bands over a game's reconciled statistics, normalized to
//! 0-100. Every band is an ordered table evaluated top to bottom, first
//! match wins; the tables are the rule set, the functions just walk them.

use crate::record::GameRecord;
use nba_api::GameStatus;
use std::ops::RangeInclusive;

/// Sum of the best band in every category outside playoff mode.
pub const MAX_POINTS: u32 = 65;
/// Playoff mode reserves four more points for the series bonus.
pub const MAX_POINTS_PLAYOFF: u32 = 69;

/// Overtime count thresholds, descending; value >= threshold wins.
const OVERTIME_BANDS: &[(u32, u32)] = &[(3, 30), (2, 29), (1, 27)];

/// Final-margin brackets; only consulted for regulation finishes.
const MARGIN_BANDS: &[(RangeInclusive<u32>, u32)] =
    &[(1..=1, 27), (2..=3, 25), (4..=6, 19), (7..=10, 8), (11..=15, 1)];

/// Combined conference rank, ascending upper bounds; value <= bound wins.
const COMBINED_RANK_BANDS: &[(u32, u32)] = &[(5, 10), (10, 8), (16, 4)];

/// Win-percentage gap between the teams, ascending upper bounds.
const PARITY_BANDS: &[(f64, u32)] = &[(0.02, 7), (0.04, 5), (0.1, 4), (0.2, 2), (0.3, 1)];

/// Highest individual point total, descending thresholds.
const HIGH_SCORER_BANDS: &[(u32, u32)] = &[(55, 15), (48, 10), (45, 5), (40, 3)];

/// Score a game 0-100. Total over every status: anything not Finished
/// scores 0, so callers that forgot to filter still get a safe answer.
pub fn entertainment_score(rec: &GameRecord, playoff_mode: bool) -> u8 {
    if rec.game.status != GameStatus::Finished {
        return 0;
    }

    let mut total = 0u32;

    // Closeness: an overtime band preempts the margin brackets entirely.
    let overtime = rec.overtime();
    total += if overtime > 0 {
        at_least(overtime, OVERTIME_BANDS)
    } else {
        margin_points(rec.points_diff())
    };

    // Upset potential. Any positive gap qualifies, however small; the
    // reference rule has no magnitude threshold and that is reproduced
    // as-is rather than tuned.
    if rec.visitor_standing.win_pct > rec.host_standing.win_pct {
        total += 3;
    }

    let combined_rank =
        rec.visitor_standing.conference_rank + rec.host_standing.conference_rank;
    total += at_most(combined_rank, COMBINED_RANK_BANDS);

    let pct_gap = (rec.visitor_standing.win_pct - rec.host_standing.win_pct).abs();
    total += parity_points(pct_gap);

    if playoff_mode {
        total += rec.playoff_bonus;
    }

    total += at_least(rec.highest_player_points, HIGH_SCORER_BANDS);

    let max = if playoff_mode { MAX_POINTS_PLAYOFF } else { MAX_POINTS };
    (f64::from(total) / f64::from(max) * 100.0).round() as u8
}

fn margin_points(diff: u32) -> u32 {
    MARGIN_BANDS
        .iter()
        .find(|(range, _)| range.contains(&diff))
        .map(|&(_, points)| points)
        .unwrap_or(0)
}

fn parity_points(gap: f64) -> u32 {
    PARITY_BANDS
        .iter()
        .find(|&&(bound, _)| gap <= bound)
        .map(|&(_, points)| points)
        .unwrap_or(0)
}

fn at_least(value: u32, bands: &[(u32, u32)]) -> u32 {
    bands
        .iter()
        .find(|&&(threshold, _)| value >= threshold)
        .map(|&(_, points)| points)
        .unwrap_or(0)
}

fn at_most(value: u32, bands: &[(u32, u32)]) -> u32 {
    bands
        .iter()
        .find(|&&(bound, _)| value <= bound)
        .map(|&(_, points)| points)
        .unwrap_or(0)
}
