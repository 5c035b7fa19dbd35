//! Stats provider REST client.
//!
//! Fetches scoreboards, rosters, and team summaries from the site API.
//! One site API serves every supported league; the league picks the
//! `{sport}/{league}` path segment.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::{League, PlayerRef, RecentForm, TeamRef};
use crate::error::SourceError;
use crate::source::{GameStub, StatsSource};

use super::dto::{RosterDto, ScoreboardDto, TeamDetailDto};
use super::dto::{convert_event, convert_roster};

const PROVIDER: &str = "stats-api";

/// HTTP client for the stats provider.
pub struct StatsClient {
    client: Client,
    base_url: String,
}

impl StatsClient {
    /// Create a client against a base URL such as
    /// `https://site.api.espn.com/apis/site/v2/sports`.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        debug!(url = %url, "stats request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::transport(PROVIDER, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| SourceError::Malformed {
            provider: PROVIDER,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn fetch_schedule(
        &self,
        league: League,
        date: NaiveDate,
    ) -> Result<Vec<GameStub>, SourceError> {
        let url = format!(
            "{}/{}/scoreboard?dates={}",
            self.base_url,
            league.stats_path(),
            date.format("%Y%m%d")
        );

        let scoreboard: ScoreboardDto = self.get_json(&url).await?;

        let mut stubs = Vec::with_capacity(scoreboard.events.len());
        for event in &scoreboard.events {
            match convert_event(PROVIDER, league, event) {
                Ok(stub) => stubs.push(stub),
                // Skip the one bad event, keep the rest of the slate.
                Err(e) => warn!(event_id = %event.id, error = %e, "skipping malformed event"),
            }
        }

        debug!(league = %league, games = stubs.len(), "fetched schedule");
        Ok(stubs)
    }

    async fn fetch_roster(
        &self,
        league: League,
        team: &TeamRef,
    ) -> Result<Vec<PlayerRef>, SourceError> {
        let url = format!(
            "{}/{}/teams/{}/roster",
            self.base_url,
            league.stats_path(),
            team.team_id()
        );

        let roster: RosterDto = self.get_json(&url).await?;
        let players = convert_roster(&roster, team.team_id());
        debug!(team = %team.abbreviation(), players = players.len(), "fetched roster");
        Ok(players)
    }

    async fn fetch_recent_form(
        &self,
        league: League,
        team: &TeamRef,
    ) -> Result<RecentForm, SourceError> {
        let url = format!(
            "{}/{}/teams/{}",
            self.base_url,
            league.stats_path(),
            team.team_id()
        );

        let detail: TeamDetailDto = self.get_json(&url).await?;
        Ok(serde_json::json!({
            "record": detail.team.record,
            "standing": detail.team.standing_summary,
        }))
    }

    fn source_name(&self) -> &'static str {
        PROVIDER
    }
}
