/// api-nba raw wire types — serde shapes for deserializing RapidAPI responses.
/// These map to our clean domain types via the helpers in client.rs.
///
/// The provider sends nearly every number as a string ("points": "110"),
/// so the wire layer keeps strings and the mapping layer parses.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Games by date  (/games/date/{date})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GamesResponse {
    pub api: Option<GamesBody>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GamesBody {
    pub results: Option<u32>,
    pub games: Option<Vec<NbaGame>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NbaGame {
    #[serde(rename = "gameId")]
    pub game_id: Option<String>,
    #[serde(rename = "statusGame")]
    pub status_game: Option<String>, // "Scheduled" | "Finished" | ...
    /// "4/4" for regulation, "5/5" for one overtime, and so on.
    #[serde(rename = "currentPeriod")]
    pub current_period: Option<String>,
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: Option<String>,
    #[serde(rename = "endTimeUTC")]
    pub end_time_utc: Option<String>,
    #[serde(rename = "vTeam")]
    pub v_team: Option<NbaTeamSide>,
    #[serde(rename = "hTeam")]
    pub h_team: Option<NbaTeamSide>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NbaTeamSide {
    #[serde(rename = "teamId")]
    pub team_id: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub logo: Option<String>,
    pub score: Option<NbaScore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NbaScore {
    pub points: Option<String>,
}

// ---------------------------------------------------------------------------
// Standings  (/standings/standard/{season}/teamId/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsResponse {
    pub api: Option<StandingsBody>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsBody {
    pub standings: Option<Vec<NbaStanding>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NbaStanding {
    pub conference: Option<NbaConference>,
    #[serde(rename = "winPercentage")]
    pub win_percentage: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NbaConference {
    pub rank: Option<String>,
}

// ---------------------------------------------------------------------------
// Player statistics  (/statistics/players/gameId/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayerStatsResponse {
    pub api: Option<PlayerStatsBody>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayerStatsBody {
    pub statistics: Option<Vec<NbaPlayerLine>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NbaPlayerLine {
    pub points: Option<String>,
}
