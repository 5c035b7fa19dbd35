//! Odds provider REST client.
//!
//! Rate-limit aware: reads `x-requests-remaining` and `x-requests-used`
//! headers from every response and keeps the latest values for the `quota`
//! command. Featured markets come from the per-sport odds endpoint; player
//! props require one additional request per event and degrade per event.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::NetworkConfig;
use crate::domain::League;
use crate::error::{ConfigError, SourceError};
use crate::source::{GameOdds, OddsSource};

use super::dto::{convert_event, merge_quotes, EventDto};

const PROVIDER: &str = "odds-api";

/// API quota as of the most recent response.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotaInfo {
    /// Requests remaining this period (from `x-requests-remaining`).
    pub remaining: Option<u32>,
    /// Requests used this period (from `x-requests-used`).
    pub used: Option<u32>,
}

/// HTTP client for the odds provider.
pub struct OddsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    regions: String,
    markets: String,
    prop_markets: String,
    quota: Mutex<QuotaInfo>,
}

impl OddsApiClient {
    /// Build a client from network configuration.
    ///
    /// # Errors
    ///
    /// Fails when `ODDS_API_KEY` was not present in the environment.
    pub fn from_config(network: &NetworkConfig) -> Result<Self, ConfigError> {
        let api_key = network
            .odds_api_key
            .clone()
            .ok_or(ConfigError::MissingField {
                field: "ODDS_API_KEY",
            })?;

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: network.odds_base_url.clone(),
            api_key,
            regions: network.regions.clone(),
            markets: network.markets.clone(),
            prop_markets: network.prop_markets.clone(),
            quota: Mutex::new(QuotaInfo::default()),
        })
    }

    /// Latest quota reported by the provider.
    pub fn quota(&self) -> QuotaInfo {
        *self.quota.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Refresh quota via the cheap sports-list endpoint.
    pub async fn refresh_quota(&self) -> Result<QuotaInfo, SourceError> {
        let url = format!("{}/sports?apiKey={}", self.base_url, self.api_key);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::transport(PROVIDER, &e))?;
        self.record_quota(&response);

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }
        Ok(self.quota())
    }

    fn record_quota(&self, response: &reqwest::Response) {
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u32>().ok())
        };

        let mut quota = self.quota.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(remaining) = header("x-requests-remaining") {
            quota.remaining = Some(remaining);
        }
        if let Some(used) = header("x-requests-used") {
            quota.used = Some(used);
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        debug!(url = %url, "odds request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::transport(PROVIDER, &e))?;
        self.record_quota(&response);

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

    async fn fetch_event_props(&self, league: League, event_id: &str) -> Result<GameOdds, SourceError> {
        let url = format!(
            "{}/sports/{}/events/{}/odds?apiKey={}&regions={}&markets={}&oddsFormat=american&dateFormat=iso",
            self.base_url,
            league.odds_key(),
            event_id,
            self.api_key,
            self.regions,
            self.prop_markets,
        );
        let event: EventDto = self.get_json(&url).await?;
        Ok(convert_event(&event))
    }
}

#[async_trait]
impl OddsSource for OddsApiClient {
    async fn fetch_odds(
        &self,
        league: League,
        date: NaiveDate,
    ) -> Result<Vec<GameOdds>, SourceError> {
        // Evening US games land on the next UTC day, so the window spans two
        // days; events with no scheduled counterpart surface as orphans.
        let from = date.and_time(NaiveTime::MIN).and_utc();
        let to = from + TimeDelta::days(2);
        let url = format!(
            "{}/sports/{}/odds?apiKey={}&regions={}&markets={}&oddsFormat=american&dateFormat=iso&commenceTimeFrom={}&commenceTimeTo={}",
            self.base_url,
            league.odds_key(),
            self.api_key,
            self.regions,
            self.markets,
            from.format("%Y-%m-%dT%H:%M:%SZ"),
            to.format("%Y-%m-%dT%H:%M:%SZ"),
        );

        let events: Vec<EventDto> = self.get_json(&url).await?;
        let mut all: Vec<GameOdds> = events.iter().map(convert_event).collect();

        if !self.prop_markets.is_empty() {
            for odds in &mut all {
                match self.fetch_event_props(league, &odds.event_id).await {
                    Ok(props) => merge_quotes(odds, props),
                    // One event's props failing doesn't spoil its lines.
                    Err(e) => warn!(event_id = %odds.event_id, error = %e, "props fetch failed"),
                }
            }
        }

        debug!(
            league = %league,
            events = all.len(),
            quota_remaining = ?self.quota().remaining,
            "fetched odds"
        );
        Ok(all)
    }

    fn source_name(&self) -> &'static str {
        PROVIDER
    }
}
