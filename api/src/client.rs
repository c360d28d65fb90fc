use crate::apinba::{GamesResponse, NbaGame, NbaTeamSide, PlayerStatsResponse, StandingsResponse};
use crate::basketapi::BasketGamesResponse;
use crate::times::format_game_times;
use crate::{GameStatus, GameSummary, OvertimeFlag, TeamRef, TeamStanding};
use chrono::NaiveDate;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const API_NBA_BASE: &str = "https://api-nba-v1.p.rapidapi.com";
const API_NBA_HOST: &str = "api-nba-v1.p.rapidapi.com";
const API_BASKETBALL_BASE: &str = "https://api-basketball.p.rapidapi.com";
const API_BASKETBALL_HOST: &str = "api-basketball.p.rapidapi.com";

/// Standings season segment of the primary provider's URL.
const SEASON: &str = "2025";
/// Season / league query values the secondary provider expects (12 = NBA).
const BASKET_SEASON: &str = "2025-2026";
const BASKET_LEAGUE: &str = "12";

/// Both RapidAPI tiers allow roughly ten calls per minute.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(8);

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Fixed pause inserted after every remote call to stay inside the
/// per-minute quota. One thread of control, one blocking wait; a run's
/// latency is games x calls x interval by design.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// No pacing — for tests and local fixture replays.
    pub fn none() -> Self {
        Self { interval: Duration::ZERO }
    }

    pub async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self { interval: DEFAULT_PAUSE }
    }
}

/// Client for the primary provider (api-nba via RapidAPI): games by date,
/// per-team standings, per-game player statistics.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    base: String,
    api_key: String,
    pacer: Pacer,
    timeout: Duration,
}

impl NbaApi {
    pub fn new(api_key: impl Into<String>, pacer: Pacer) -> Self {
        Self::with_base(API_NBA_BASE, api_key, pacer)
    }

    pub fn with_base(base: impl Into<String>, api_key: impl Into<String>, pacer: Pacer) -> Self {
        Self {
            client: Client::builder()
                .user_agent("hooprank/0.3 (daily game ranker)")
                .build()
                .unwrap_or_default(),
            base: base.into(),
            api_key: api_key.into(),
            pacer,
            timeout: Duration::from_secs(10),
        }
    }

    /// Fetch every game the provider buckets under the given UTC date.
    ///
    /// All entries come back mapped, including scheduled ghosts and rows
    /// with missing team ids — the reconciliation filter owns those drops.
    pub async fn fetch_games(&self, date: NaiveDate) -> ApiResult<Vec<GameSummary>> {
        let url = format!("{}/games/date/{date}", self.base);
        let raw: GamesResponse = self.get(&url).await?;
        let games = raw
            .api
            .unwrap_or_default()
            .games
            .unwrap_or_default()
            .iter()
            .map(map_game)
            .collect();
        Ok(games)
    }

    /// Fetch a team's conference rank and win percentage as of now.
    ///
    /// A missing or unparseable standings entry is an error: a game whose
    /// standings cannot be resolved is excluded from scoring, never guessed.
    pub async fn fetch_standing(&self, team_id: &str) -> ApiResult<TeamStanding> {
        let url = format!("{}/standings/standard/{SEASON}/teamId/{team_id}", self.base);
        let raw: StandingsResponse = self.get(&url).await?;
        map_standing(&raw)
            .ok_or_else(|| ApiError::NotFound(format!("no usable standings for team {team_id}")))
    }

    /// Fetch the highest single-player point total in a finished game's
    /// box score. Callers degrade failures to 0; one game's stat fetch must
    /// never block scoring of the rest of the batch.
    pub async fn fetch_highest_points(&self, game_id: &str) -> ApiResult<u32> {
        let url = format!("{}/statistics/players/gameId/{game_id}", self.base);
        let raw: PlayerStatsResponse = self.get(&url).await?;
        Ok(highest_points(&raw))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let builder = self
            .client
            .get(url)
            .header("x-rapidapi-host", API_NBA_HOST)
            .header("x-rapidapi-key", &self.api_key)
            .timeout(self.timeout);
        let result = send_json(builder, url).await;
        self.pacer.pause().await;
        result
    }
}

/// Client for the secondary cross-check provider (api-basketball via
/// RapidAPI). Consulted only for overtime flags.
#[derive(Debug, Clone)]
pub struct BasketApi {
    client: Client,
    base: String,
    api_key: String,
    pacer: Pacer,
    timeout: Duration,
}

impl BasketApi {
    pub fn new(api_key: impl Into<String>, pacer: Pacer) -> Self {
        Self::with_base(API_BASKETBALL_BASE, api_key, pacer)
    }

    pub fn with_base(base: impl Into<String>, api_key: impl Into<String>, pacer: Pacer) -> Self {
        Self {
            client: Client::builder()
                .user_agent("hooprank/0.3 (daily game ranker)")
                .build()
                .unwrap_or_default(),
            base: base.into(),
            api_key: api_key.into(),
            pacer,
            timeout: Duration::from_secs(10),
        }
    }

    /// Fetch per-game overtime flags for a date, keyed by host full name.
    pub async fn fetch_overtime_flags(&self, date: NaiveDate) -> ApiResult<Vec<OvertimeFlag>> {
        let url = format!("{}/games", self.base);
        let date = date.to_string();
        let builder = self
            .client
            .get(&url)
            .header("X-RapidAPI-Host", API_BASKETBALL_HOST)
            .header("X-RapidAPI-Key", &self.api_key)
            .query(&[
                ("season", BASKET_SEASON),
                ("league", BASKET_LEAGUE),
                ("date", date.as_str()),
            ])
            .timeout(self.timeout);
        let result = send_json::<BasketGamesResponse>(builder, &url).await;
        self.pacer.pause().await;
        Ok(map_overtime_flags(&result?))
    }
}

async fn send_json<T: serde::de::DeserializeOwned>(
    builder: reqwest::RequestBuilder,
    url: &str,
) -> ApiResult<T> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Network(e, url.to_owned()))?;

    match response.error_for_status() {
        Ok(res) => res
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned())),
        Err(e) => Err(ApiError::Api(e, url.to_owned())),
    }
}

// ---------------------------------------------------------------------------
// Mapping: api-nba wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_game(g: &NbaGame) -> GameSummary {
    GameSummary {
        game_id: g.game_id.clone().unwrap_or_default(),
        status: parse_status(g.status_game.as_deref().unwrap_or_default()),
        visitor: map_team(g.v_team.as_ref()),
        host: map_team(g.h_team.as_ref()),
        visitor_points: side_points(g.v_team.as_ref()),
        host_points: side_points(g.h_team.as_ref()),
        overtime_primary: g
            .current_period
            .as_deref()
            .map(overtime_periods)
            .unwrap_or(0),
        start: g.start_time_utc.as_deref().and_then(format_game_times),
        end: g.end_time_utc.as_deref().and_then(format_game_times),
    }
}

fn map_team(side: Option<&NbaTeamSide>) -> TeamRef {
    let Some(side) = side else {
        return TeamRef::default();
    };
    TeamRef {
        id: side.team_id.clone().unwrap_or_default(),
        short_name: side.short_name.clone().unwrap_or_default(),
        full_name: side.full_name.clone().unwrap_or_default(),
        logo: side.logo.clone(),
    }
}

fn side_points(side: Option<&NbaTeamSide>) -> u32 {
    side.and_then(|s| s.score.as_ref())
        .and_then(|s| s.points.as_deref())
        .and_then(|p| p.parse().ok())
        .unwrap_or(0)
}

fn parse_status(s: &str) -> GameStatus {
    match s {
        "Finished" => GameStatus::Finished,
        "Scheduled" => GameStatus::Scheduled,
        _ => GameStatus::Other,
    }
}

/// Overtime count from a "5/5"-style period field: periods played past the
/// regulation four, floored at zero for in-progress payloads.
fn overtime_periods(current_period: &str) -> u32 {
    current_period
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map(|played| played.saturating_sub(4))
        .unwrap_or(0)
}

fn map_standing(raw: &StandingsResponse) -> Option<TeamStanding> {
    let entry = raw.api.as_ref()?.standings.as_ref()?.first()?;
    let rank = entry
        .conference
        .as_ref()?
        .rank
        .as_deref()?
        .parse::<u32>()
        .ok()?;
    let win_pct = entry.win_percentage.as_deref()?.parse::<f64>().ok()?;
    Some(TeamStanding { conference_rank: rank, win_pct })
}

fn highest_points(raw: &PlayerStatsResponse) -> u32 {
    raw.api
        .as_ref()
        .and_then(|b| b.statistics.as_ref())
        .map(|lines| {
            lines
                .iter()
                .filter_map(|l| l.points.as_deref())
                .filter_map(|p| p.parse::<u32>().ok())
                .max()
                .unwrap_or(0)
        })
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Mapping: api-basketball wire types → overtime flags
// ---------------------------------------------------------------------------

fn map_overtime_flags(raw: &BasketGamesResponse) -> Vec<OvertimeFlag> {
    raw.response
        .iter()
        .filter_map(|g| {
            let host = g
                .teams
                .as_ref()?
                .home
                .as_ref()?
                .name
                .clone()?;
            // A non-null home over_time column means the game went past
            // regulation; the exact count is not reported.
            let went_to_overtime = g
                .scores
                .as_ref()
                .and_then(|s| s.home.as_ref())
                .and_then(|h| h.over_time)
                .is_some();
            Some(OvertimeFlag { host_full_name: host, went_to_overtime })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMES_JSON: &str = r#"{
        "api": {
            "results": 2,
            "games": [
                {
                    "gameId": "7015",
                    "statusGame": "Finished",
                    "currentPeriod": "5/5",
                    "startTimeUTC": "2019-12-04T02:09:00.000Z",
                    "endTimeUTC": "2019-12-04T04:25:00.000Z",
                    "vTeam": {
                        "teamId": "8",
                        "shortName": "DAL",
                        "fullName": "Dallas Mavericks",
                        "logo": "https://example.org/dal.png",
                        "score": { "points": "110" }
                    },
                    "hTeam": {
                        "teamId": "27",
                        "shortName": "SAS",
                        "fullName": "San Antonio Spurs",
                        "logo": "https://example.org/sas.png",
                        "score": { "points": "107" }
                    }
                },
                {
                    "gameId": "7016",
                    "statusGame": "Scheduled",
                    "currentPeriod": "0/4",
                    "startTimeUTC": "2019-12-05T00:00:00.000Z",
                    "endTimeUTC": "",
                    "vTeam": { "teamId": "", "shortName": "", "fullName": "", "score": { "points": "0" } },
                    "hTeam": { "teamId": "27", "shortName": "SAS", "fullName": "San Antonio Spurs", "score": { "points": "0" } }
                }
            ]
        }
    }"#;

    const STANDINGS_JSON: &str = r#"{
        "api": {
            "standings": [
                {
                    "conference": { "rank": "5" },
                    "winPercentage": "0.667"
                }
            ]
        }
    }"#;

    const STATS_JSON: &str = r#"{
        "api": {
            "statistics": [
                { "points": "22" },
                { "points": "41" },
                { "points": "7" },
                { "points": "" }
            ]
        }
    }"#;

    const BASKET_JSON: &str = r#"{
        "response": [
            {
                "teams": { "home": { "name": "San Antonio Spurs" }, "away": { "name": "Dallas Mavericks" } },
                "scores": { "home": { "over_time": 12, "total": 107 }, "away": { "over_time": 15, "total": 110 } }
            },
            {
                "teams": { "home": { "name": "Miami Heat" }, "away": { "name": "Boston Celtics" } },
                "scores": { "home": { "over_time": null, "total": 98 }, "away": { "over_time": null, "total": 94 } }
            }
        ]
    }"#;

    #[test]
    fn games_payload_maps_to_summaries() {
        let raw: GamesResponse = serde_json::from_str(GAMES_JSON).unwrap();
        let games: Vec<GameSummary> =
            raw.api.unwrap().games.unwrap().iter().map(map_game).collect();
        assert_eq!(games.len(), 2);

        let g = &games[0];
        assert_eq!(g.game_id, "7015");
        assert_eq!(g.status, GameStatus::Finished);
        assert_eq!(g.visitor_points, 110);
        assert_eq!(g.host_points, 107);
        assert_eq!(g.points_diff(), 3);
        assert_eq!(g.overtime_primary, 1);
        assert_eq!(g.host.full_name, "San Antonio Spurs");
        assert_eq!(g.visitor.short_name, "DAL");
        assert!(g.start.is_some());

        // Scheduled ghost survives mapping; the reconciliation filter drops it.
        assert_eq!(games[1].status, GameStatus::Scheduled);
        assert!(games[1].visitor.id.is_empty());
    }

    #[test]
    fn overtime_periods_floor_at_regulation() {
        assert_eq!(overtime_periods("4/4"), 0);
        assert_eq!(overtime_periods("5/5"), 1);
        assert_eq!(overtime_periods("7/7"), 3);
        assert_eq!(overtime_periods("2/4"), 0);
        assert_eq!(overtime_periods(""), 0);
    }

    #[test]
    fn standings_payload_maps_rank_and_pct() {
        let raw: StandingsResponse = serde_json::from_str(STANDINGS_JSON).unwrap();
        let s = map_standing(&raw).unwrap();
        assert_eq!(s.conference_rank, 5);
        assert!((s.win_pct - 0.667).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_standings_are_not_guessed() {
        let raw: StandingsResponse = serde_json::from_str(r#"{"api":{"standings":[]}}"#).unwrap();
        assert!(map_standing(&raw).is_none());
        let raw: StandingsResponse =
            serde_json::from_str(r#"{"api":{"standings":[{"winPercentage":"0.5"}]}}"#).unwrap();
        assert!(map_standing(&raw).is_none());
    }

    #[test]
    fn highest_points_is_the_max_over_players() {
        let raw: PlayerStatsResponse = serde_json::from_str(STATS_JSON).unwrap();
        assert_eq!(highest_points(&raw), 41);
    }

    #[test]
    fn highest_points_defaults_to_zero_on_empty_payload() {
        let raw: PlayerStatsResponse = serde_json::from_str(r#"{"api":{}}"#).unwrap();
        assert_eq!(highest_points(&raw), 0);
    }

    #[test]
    fn overtime_flags_come_from_the_home_overtime_column() {
        let raw: BasketGamesResponse = serde_json::from_str(BASKET_JSON).unwrap();
        let flags = map_overtime_flags(&raw);
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].host_full_name, "San Antonio Spurs");
        assert!(flags[0].went_to_overtime);
        assert_eq!(flags[1].host_full_name, "Miami Heat");
        assert!(!flags[1].went_to_overtime);
    }

    // -----------------------------------------------------------------------
    // HTTP round trips against a local mock server
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn fetch_games_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/games/date/2019-12-04")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GAMES_JSON)
            .create_async()
            .await;

        let api = NbaApi::with_base(server.url(), "test-key", Pacer::none());
        let date = NaiveDate::from_ymd_opt(2019, 12, 4).unwrap();
        let games = api.fetch_games(date).await.unwrap();

        mock.assert_async().await;
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_id, "7015");
    }

    #[tokio::test]
    async fn fetch_standing_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/standings/standard/2025/teamId/8")
            .with_status(200)
            .with_body(STANDINGS_JSON)
            .create_async()
            .await;

        let api = NbaApi::with_base(server.url(), "test-key", Pacer::none());
        let s = api.fetch_standing("8").await.unwrap();
        assert_eq!(s.conference_rank, 5);
    }

    #[tokio::test]
    async fn server_error_surfaces_as_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/standings/standard/2025/teamId/8")
            .with_status(500)
            .create_async()
            .await;

        let api = NbaApi::with_base(server.url(), "test-key", Pacer::none());
        let err = api.fetch_standing("8").await.unwrap_err();
        assert!(matches!(err, ApiError::Api(..)), "got: {err}");
    }

    #[tokio::test]
    async fn garbage_body_surfaces_as_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/statistics/players/gameId/7015")
            .with_status(200)
            .with_body("<html>rate limited</html>")
            .create_async()
            .await;

        let api = NbaApi::with_base(server.url(), "test-key", Pacer::none());
        let err = api.fetch_highest_points("7015").await.unwrap_err();
        assert!(matches!(err, ApiError::Parsing(..)), "got: {err}");
    }
}
