use chrono::NaiveDate;
use nba_api::{GameSummary, TeamStanding};

/// A fully reconciled, scoreable game: the primary-provider summary plus
/// everything the per-game enrichment calls resolved. Construction implies
/// both standings lookups succeeded; a game they failed for never becomes
/// a record.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub game: GameSummary,
    pub visitor_standing: TeamStanding,
    pub host_standing: TeamStanding,
    /// 1 when the cross-check provider saw overtime scoring, else 0.
    pub overtime_secondary: u32,
    pub highest_player_points: u32,
    pub playoff_bonus: u32,
    pub score: Option<u8>,
}

impl GameRecord {
    /// The overtime count used downstream: a defensive merge of what both
    /// providers claim. Neither source is trusted over the larger value.
    pub fn overtime(&self) -> u32 {
        reconcile_max([self.game.overtime_primary, self.overtime_secondary])
    }

    pub fn points_diff(&self) -> u32 {
        self.game.points_diff()
    }

    /// ET calendar date the game belongs to, for the target-date filter.
    pub fn league_date(&self) -> Option<NaiveDate> {
        self.game.start.as_ref().map(|t| t.league_date)
    }
}

/// Merge N candidate readings of the same count from unreliable sources by
/// taking the maximum. Adding a third provider is a one-element change at
/// the call site.
pub fn reconcile_max<I: IntoIterator<Item = u32>>(candidates: I) -> u32 {
    candidates.into_iter().max().unwrap_or(0)
}
