//! The terminal joined artifact: per-game records and the daily slate.
//!
//! Everything here is plain serializable data. Renderers and the LLM
//! commentary path both consume the same shapes via JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::ids::{GameId, TeamId};
use super::league::League;
use super::odds::{AmericanOdds, MarketKind, QuoteSide};
use super::refs::{PlayerRef, TeamRef};
use super::resolver::Unresolved;

/// Free-form recent-performance blob, passed through from the stats source.
pub type RecentForm = serde_json::Value;

/// The best available price for one side of one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketBest {
    pub market: MarketKind,
    pub side: QuoteSide,
    /// Line value for spreads, totals, and props; `None` for moneylines.
    pub line: Option<Decimal>,
    pub price: AmericanOdds,
    /// The book offering this price.
    pub book: String,
}

/// Best prop prices for one resolved player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProps {
    pub player: PlayerRef,
    pub markets: Vec<MarketBest>,
}

/// Health of the odds feed for one slate build.
///
/// Keeps "no odds because the feed was down" distinguishable from "no odds
/// because no book quoted the game".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FeedStatus {
    Healthy,
    Unavailable { reason: String },
}

impl FeedStatus {
    /// Whether the feed answered at all.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self, FeedStatus::Healthy)
    }
}

/// One fully joined game: teams, start time, best lines, resolved props,
/// and recent form.
///
/// Built fresh per request and never persisted. `partial` flags records with
/// unresolved names; the resolved portions remain usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub game_id: GameId,
    pub league: League,
    pub home: TeamRef,
    pub away: TeamRef,
    pub start_time: DateTime<Utc>,
    /// Best price per (market, side, line); empty when no odds matched.
    pub markets: Vec<MarketBest>,
    /// Best prop prices per resolved player, sorted by player name.
    pub player_props: Vec<PlayerProps>,
    pub recent_form: BTreeMap<TeamId, RecentForm>,
    /// Names the resolver could not confidently place, surfaced as-is.
    pub unresolved: Vec<Unresolved>,
    /// True when no odds event could be tied to this game.
    pub missing_odds: bool,
    /// True when any name in this record failed to resolve.
    pub partial: bool,
}

impl GameRecord {
    /// "Away @ Home" label used by reports and logs.
    #[must_use]
    pub fn matchup(&self) -> String {
        format!(
            "{} @ {}",
            self.away.canonical_name(),
            self.home.canonical_name()
        )
    }

    /// Look up the best price for a market side, if any book quoted it.
    #[must_use]
    pub fn best_for(&self, market: &MarketKind, side: QuoteSide) -> Option<&MarketBest> {
        self.markets
            .iter()
            .find(|m| &m.market == market && m.side == side)
    }
}

/// An odds event that could not be tied to any scheduled game.
///
/// Either a team name failed to resolve (the failures ride along) or both
/// names resolved but no scheduled game pairs them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrphanEvent {
    pub home_name: String,
    pub away_name: String,
    pub unresolved: Vec<Unresolved>,
}

/// All records for one league/date, in schedule order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slate {
    pub league: League,
    pub date: NaiveDate,
    pub odds_feed: FeedStatus,
    pub games: Vec<GameRecord>,
    /// Odds events left over after matching; visible rather than dropped.
    pub orphan_events: Vec<OrphanEvent>,
}

impl Slate {
    /// Number of games with any unresolved name.
    #[must_use]
    pub fn partial_count(&self) -> usize {
        self.games.iter().filter(|g| g.partial).count()
    }

    /// Number of games with no matched odds.
    #[must_use]
    pub fn missing_odds_count(&self) -> usize {
        self.games.iter().filter(|g| g.missing_odds).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::TeamId;

    fn record() -> GameRecord {
        let home = TeamRef::new(TeamId::new("nyy"), "New York Yankees", "NYY", League::Mlb);
        let away = TeamRef::new(TeamId::new("bos"), "Boston Red Sox", "BOS", League::Mlb);
        GameRecord {
            game_id: GameId::new("401472100"),
            league: League::Mlb,
            home,
            away,
            start_time: "2026-08-06T23:05:00Z".parse().unwrap(),
            markets: vec![MarketBest {
                market: MarketKind::Moneyline,
                side: QuoteSide::Away,
                line: None,
                price: AmericanOdds::try_new(142).unwrap(),
                book: "fanduel".into(),
            }],
            player_props: vec![],
            recent_form: BTreeMap::new(),
            unresolved: vec![],
            missing_odds: false,
            partial: false,
        }
    }

    #[test]
    fn matchup_reads_away_at_home() {
        assert_eq!(record().matchup(), "Boston Red Sox @ New York Yankees");
    }

    #[test]
    fn best_for_finds_quoted_side() {
        let rec = record();
        let best = rec.best_for(&MarketKind::Moneyline, QuoteSide::Away).unwrap();
        assert_eq!(best.price.value(), 142);
        assert!(rec.best_for(&MarketKind::Moneyline, QuoteSide::Home).is_none());
    }

    #[test]
    fn slate_counts_flags() {
        let mut partial = record();
        partial.partial = true;
        let mut missing = record();
        missing.missing_odds = true;

        let slate = Slate {
            league: League::Mlb,
            date: "2026-08-06".parse().unwrap(),
            odds_feed: FeedStatus::Healthy,
            games: vec![record(), partial, missing],
            orphan_events: vec![],
        };

        assert_eq!(slate.partial_count(), 1);
        assert_eq!(slate.missing_odds_count(), 1);
    }

    #[test]
    fn record_serializes_to_json() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["game_id"], "401472100");
        assert_eq!(json["markets"][0]["price"], 142);
        assert_eq!(json["markets"][0]["side"], "away");
        assert_eq!(json["missing_odds"], false);
    }
}
