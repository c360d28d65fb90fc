/// Wire types for the api-basketball cross-check provider.
/// Endpoint: https://api-basketball.p.rapidapi.com/games?season&league&date
///
/// Only consulted for its per-side overtime scoring column; the primary
/// provider's period count is sometimes stale and this is the tiebreaker.
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct BasketGamesResponse {
    #[serde(default)]
    pub response: Vec<BasketGame>,
}

#[derive(Deserialize, Default, Debug)]
pub struct BasketGame {
    pub teams: Option<BasketTeams>,
    pub scores: Option<BasketScores>,
}

#[derive(Deserialize, Default, Debug)]
pub struct BasketTeams {
    pub home: Option<BasketTeam>,
    pub away: Option<BasketTeam>,
}

#[derive(Deserialize, Default, Debug)]
pub struct BasketTeam {
    /// Full name ("Denver Nuggets"), the join key against the primary feed.
    pub name: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
pub struct BasketScores {
    pub home: Option<BasketSideScore>,
    pub away: Option<BasketSideScore>,
}

#[derive(Deserialize, Default, Debug)]
pub struct BasketSideScore {
    /// Null when the game ended in regulation.
    pub over_time: Option<u32>,
    pub total: Option<u32>,
}
