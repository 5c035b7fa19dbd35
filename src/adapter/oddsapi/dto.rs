//! Wire types for the odds provider.
//!
//! An event carries `bookmakers -> markets -> outcomes`. Market keys map to
//! domain market kinds: `h2h` is the moneyline, `spreads`/`totals` carry a
//! `point`, and `player_*` keys are props whose outcomes name Over/Under
//! with the player in `description`. Unknown market keys and invalid prices
//! are skipped at quote granularity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{AmericanOdds, MarketKind};
use crate::source::{GameOdds, RawQuote, RawSide};

#[derive(Debug, Deserialize)]
pub struct EventDto {
    pub id: String,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<BookmakerDto>,
}

#[derive(Debug, Deserialize)]
pub struct BookmakerDto {
    pub key: String,
    #[serde(default)]
    pub markets: Vec<MarketDto>,
}

#[derive(Debug, Deserialize)]
pub struct MarketDto {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<OutcomeDto>,
}

#[derive(Debug, Deserialize)]
pub struct OutcomeDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub point: Option<f64>,
}

/// Convert one event payload into [`GameOdds`].
pub fn convert_event(event: &EventDto) -> GameOdds {
    let mut quotes = Vec::new();
    for bookmaker in &event.bookmakers {
        for market in &bookmaker.markets {
            convert_market(&bookmaker.key, market, &mut quotes);
        }
    }

    GameOdds {
        event_id: event.id.clone(),
        home_name: event.home_team.clone(),
        away_name: event.away_team.clone(),
        commence_time: event.commence_time,
        quotes,
    }
}

/// Append quotes already converted for another payload of the same event.
///
/// Used to merge per-event prop responses into the featured-market event.
pub fn merge_quotes(into: &mut GameOdds, from: GameOdds) {
    into.quotes.extend(from.quotes);
}

fn convert_market(book: &str, market: &MarketDto, quotes: &mut Vec<RawQuote>) {
    for outcome in &market.outcomes {
        let price = match american_price(outcome.price) {
            Some(price) => price,
            None => {
                warn!(
                    book,
                    market = %market.key,
                    outcome = %outcome.name,
                    price = outcome.price,
                    "skipping quote with invalid American price"
                );
                continue;
            }
        };
        let line = outcome.point.and_then(|p| Decimal::try_from(p).ok());

        let converted = match market.key.as_str() {
            "h2h" => Some(RawQuote {
                book: book.to_string(),
                market: MarketKind::Moneyline,
                side: RawSide::Team {
                    name: outcome.name.clone(),
                },
                line: None,
                price,
            }),
            "spreads" => line.map(|line| RawQuote {
                book: book.to_string(),
                market: MarketKind::Spread,
                side: RawSide::Team {
                    name: outcome.name.clone(),
                },
                line: Some(line),
                price,
            }),
            "totals" => match over_under(&outcome.name) {
                Some(over) => line.map(|line| RawQuote {
                    book: book.to_string(),
                    market: MarketKind::Total,
                    side: if over { RawSide::Over } else { RawSide::Under },
                    line: Some(line),
                    price,
                }),
                None => None,
            },
            key => match key.strip_prefix("player_") {
                Some(stat) => convert_prop(book, stat, outcome, line, price),
                None => {
                    debug!(book, market = %market.key, "skipping unknown market key");
                    None
                }
            },
        };

        match converted {
            Some(quote) => quotes.push(quote),
            None => debug!(
                book,
                market = %market.key,
                outcome = %outcome.name,
                "skipping incomplete outcome"
            ),
        }
    }
}

fn convert_prop(
    book: &str,
    stat: &str,
    outcome: &OutcomeDto,
    line: Option<Decimal>,
    price: AmericanOdds,
) -> Option<RawQuote> {
    let player = outcome.description.clone()?;
    let over = over_under(&outcome.name)?;
    let line = line?;

    Some(RawQuote {
        book: book.to_string(),
        market: MarketKind::Prop {
            stat: stat.to_string(),
        },
        side: if over {
            RawSide::PlayerOver { player }
        } else {
            RawSide::PlayerUnder { player }
        },
        line: Some(line),
        price,
    })
}

fn over_under(name: &str) -> Option<bool> {
    if name.eq_ignore_ascii_case("over") {
        Some(true)
    } else if name.eq_ignore_ascii_case("under") {
        Some(false)
    } else {
        None
    }
}

/// Prices arrive as JSON numbers; anything with magnitude under 100 after
/// rounding is not a valid American price.
fn american_price(raw: f64) -> Option<AmericanOdds> {
    if !raw.is_finite() {
        return None;
    }
    AmericanOdds::try_new(raw.round() as i32).ok()
}
