//! Source trait definitions.
//!
//! These traits define the interface that stats and odds provider
//! implementations must fulfill. The record builder only ever sees these
//! seams, so provider quirks stay inside the adapters.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    AmericanOdds, GameId, League, MarketKind, PlayerRef, RecentForm, TeamRef,
};
use crate::error::SourceError;

/// A scheduled game as the stats source sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameStub {
    pub game_id: GameId,
    pub home: TeamRef,
    pub away: TeamRef,
    pub start_time: DateTime<Utc>,
}

/// Which entity a raw quote prices, before name resolution.
///
/// Team names and prop player names arrive as free text; the builder
/// resolves them against the schedule and rosters.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSide {
    /// A moneyline or spread outcome, named after a team.
    Team { name: String },
    /// Over on a game total.
    Over,
    /// Under on a game total.
    Under,
    /// Over on a player prop line.
    PlayerOver { player: String },
    /// Under on a player prop line.
    PlayerUnder { player: String },
}

/// One sportsbook's price as delivered by the odds provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuote {
    pub book: String,
    pub market: MarketKind,
    pub side: RawSide,
    pub line: Option<Decimal>,
    pub price: AmericanOdds,
}

/// All quotes for one odds-provider event, teams still free text.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOdds {
    pub event_id: String,
    pub home_name: String,
    pub away_name: String,
    pub commence_time: DateTime<Utc>,
    pub quotes: Vec<RawQuote>,
}

/// Provider of schedules, rosters, and recent form.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch all games scheduled for a league and date.
    async fn fetch_schedule(
        &self,
        league: League,
        date: NaiveDate,
    ) -> Result<Vec<GameStub>, SourceError>;

    /// Fetch the current roster for a team.
    async fn fetch_roster(
        &self,
        league: League,
        team: &TeamRef,
    ) -> Result<Vec<PlayerRef>, SourceError>;

    /// Fetch the recent-performance blob for a team.
    async fn fetch_recent_form(
        &self,
        league: League,
        team: &TeamRef,
    ) -> Result<RecentForm, SourceError>;

    /// Provider name for logging and error context.
    fn source_name(&self) -> &'static str;
}

/// Provider of sportsbook odds.
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Fetch all odds events for a league and date window.
    async fn fetch_odds(
        &self,
        league: League,
        date: NaiveDate,
    ) -> Result<Vec<GameOdds>, SourceError>;

    /// Provider name for logging and error context.
    fn source_name(&self) -> &'static str;
}
