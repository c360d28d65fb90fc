pub mod apinba;
pub mod basketapi;
pub mod client;
pub mod times;

use crate::times::GameTimes;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of either provider's wire format
// ---------------------------------------------------------------------------

/// One game as the primary provider reports it, before any enrichment.
///
/// Standings, box-score highs and playoff bonuses are fetched per game by
/// the pipeline; this carries only what a single games-by-date call knows.
#[derive(Debug, Clone, Default)]
pub struct GameSummary {
    pub game_id: String,
    pub status: GameStatus,
    pub visitor: TeamRef,
    pub host: TeamRef,
    pub visitor_points: u32,
    pub host_points: u32,
    /// Periods above regulation per the primary provider. Occasionally wrong;
    /// reconciled against the secondary provider's overtime flag downstream.
    pub overtime_primary: u32,
    pub start: Option<GameTimes>,
    pub end: Option<GameTimes>,
}

impl GameSummary {
    /// Absolute final margin. Always recomputed from the two point totals,
    /// never taken from a provider field.
    pub fn points_diff(&self) -> u32 {
        self.visitor_points.abs_diff(self.host_points)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamRef {
    pub id: String,
    pub short_name: String, // "LAL"
    pub full_name: String,  // "Los Angeles Lakers"
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    Finished,
    /// Anything else the provider invents (postponed, cancelled, in play).
    Other,
}

/// Conference position and win percentage for one team, as of the call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamStanding {
    pub conference_rank: u32,
    pub win_pct: f64,
}

/// Secondary-provider verdict on whether a game went to overtime,
/// matched to primary games by host-team full name.
#[derive(Debug, Clone, Default)]
pub struct OvertimeFlag {
    pub host_full_name: String,
    pub went_to_overtime: bool,
}
