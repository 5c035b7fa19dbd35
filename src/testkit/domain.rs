//! Builders for domain primitives used across tests.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    AmericanOdds, FeedStatus, GameId, GameRecord, League, MarketBest, MarketKind, PlayerId,
    PlayerRef, QuoteSide, Slate, TeamId, TeamRef,
};
use crate::source::{GameOdds, GameStub, RawQuote, RawSide};

/// A team in the given league.
pub fn team(league: League, id: &str, name: &str, abbr: &str) -> TeamRef {
    TeamRef::new(TeamId::new(id), name, abbr, league)
}

/// A rostered player.
pub fn player(id: &str, name: &str, team_id: &str, position: &str) -> PlayerRef {
    PlayerRef::new(PlayerId::new(id), name, TeamId::new(team_id), position)
}

/// A scheduled game stub.
pub fn stub(id: &str, home: TeamRef, away: TeamRef, start: &str) -> GameStub {
    GameStub {
        game_id: GameId::new(id),
        home,
        away,
        start_time: start.parse::<DateTime<Utc>>().expect("valid RFC 3339 time"),
    }
}

/// A raw team-sided quote (moneyline or spread).
pub fn team_quote(
    book: &str,
    market: MarketKind,
    name: &str,
    line: Option<Decimal>,
    price: i32,
) -> RawQuote {
    RawQuote {
        book: book.to_string(),
        market,
        side: RawSide::Team {
            name: name.to_string(),
        },
        line,
        price: AmericanOdds::try_new(price).expect("valid test price"),
    }
}

/// A raw game-total quote.
pub fn total_quote(book: &str, over: bool, line: Decimal, price: i32) -> RawQuote {
    RawQuote {
        book: book.to_string(),
        market: MarketKind::Total,
        side: if over { RawSide::Over } else { RawSide::Under },
        line: Some(line),
        price: AmericanOdds::try_new(price).expect("valid test price"),
    }
}

/// A raw player-prop quote.
pub fn prop_quote(
    book: &str,
    stat: &str,
    player: &str,
    over: bool,
    line: Decimal,
    price: i32,
) -> RawQuote {
    RawQuote {
        book: book.to_string(),
        market: MarketKind::Prop {
            stat: stat.to_string(),
        },
        side: if over {
            RawSide::PlayerOver {
                player: player.to_string(),
            }
        } else {
            RawSide::PlayerUnder {
                player: player.to_string(),
            }
        },
        line: Some(line),
        price: AmericanOdds::try_new(price).expect("valid test price"),
    }
}

/// An odds event wrapping quotes under free-text team names.
pub fn game_odds(
    event_id: &str,
    home: &str,
    away: &str,
    start: &str,
    quotes: Vec<RawQuote>,
) -> GameOdds {
    GameOdds {
        event_id: event_id.to_string(),
        home_name: home.to_string(),
        away_name: away.to_string(),
        commence_time: start.parse::<DateTime<Utc>>().expect("valid RFC 3339 time"),
        quotes,
    }
}

/// The canonical Red Sox @ Yankees record with a two-sided moneyline.
pub fn record_with_moneyline() -> GameRecord {
    GameRecord {
        game_id: GameId::new("401472100"),
        league: League::Mlb,
        home: team(League::Mlb, "10", "New York Yankees", "NYY"),
        away: team(League::Mlb, "2", "Boston Red Sox", "BOS"),
        start_time: "2026-08-06T23:05:00Z".parse().expect("valid time"),
        markets: vec![
            MarketBest {
                market: MarketKind::Moneyline,
                side: QuoteSide::Home,
                line: None,
                price: AmericanOdds::try_new(-162).expect("valid price"),
                book: "betmgm".into(),
            },
            MarketBest {
                market: MarketKind::Moneyline,
                side: QuoteSide::Away,
                line: None,
                price: AmericanOdds::try_new(142).expect("valid price"),
                book: "fanduel".into(),
            },
        ],
        player_props: vec![],
        recent_form: BTreeMap::new(),
        unresolved: vec![],
        missing_odds: false,
        partial: false,
    }
}

/// A healthy MLB slate wrapping the given records.
pub fn slate_with(games: Vec<GameRecord>) -> Slate {
    Slate {
        league: League::Mlb,
        date: "2026-08-06".parse().expect("valid date"),
        odds_feed: FeedStatus::Healthy,
        games,
        orphan_events: vec![],
    }
}
