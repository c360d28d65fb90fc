//! Ranking summary post and the X publisher.

use crate::report::RankedRow;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use log::info;
use reqwest::Client;
use std::time::Duration;

const X_API_TWEETS: &str = "https://api.x.com/2/tweets";

/// Posts stay readable by capping the list at the top games.
pub const POST_GAME_LIMIT: usize = 8;

/// Score bands → star rating, ascending upper bounds, first match wins.
const STAR_BANDS: &[(u8, usize)] = &[(15, 1), (27, 2), (40, 3), (56, 4)];

pub fn stars(score: u8) -> usize {
    STAR_BANDS
        .iter()
        .find(|&&(bound, _)| score <= bound)
        .map(|&(_, count)| count)
        .unwrap_or(5)
}

/// Render the ranking as a short post: up to [`POST_GAME_LIMIT`] games,
/// each with its star rating and score. `None` when there is nothing to
/// say — an empty ranking is never posted.
pub fn compose_post(rows: &[RankedRow], date: NaiveDate) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut post = format!("Games for {}\n\n", date.format("%d, %b %Y"));
    for row in rows.iter().take(POST_GAME_LIMIT) {
        post.push_str(&format!(
            "{}-{}: {} ({})\n",
            row.visitor,
            row.host,
            "\u{2B50}".repeat(stars(row.score)),
            row.score
        ));
    }
    post.push_str("#nba");
    Some(post)
}

/// Minimal X API v2 client: one authenticated POST per run.
#[derive(Debug, Clone)]
pub struct XPublisher {
    client: Client,
    endpoint: String,
    bearer_token: String,
}

impl XPublisher {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self::with_endpoint(X_API_TWEETS, bearer_token)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("hooprank/0.3 (daily game ranker)")
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            bearer_token: bearer_token.into(),
        }
    }

    pub async fn post(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.bearer_token)
            .json(&serde_json::json!({ "text": text }))
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .context("sending post to X")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("X API rejected the post ({status}): {body}"));
        }
        info!("posted ranking, {} characters", text.chars().count());
        Ok(())
    }
}
