//! Quote types: American odds prices, market kinds, and sportsbook quotes.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;

/// A price in American odds format.
///
/// Negative prices mark the favorite (stake required to win 100), positive
/// prices the underdog (winnings on a 100 stake). Magnitudes below 100 do
/// not exist in this format, so [`AmericanOdds::try_new`] rejects them.
///
/// The derived ordering is the bettor-favorable ordering: any positive price
/// beats any negative one, larger positives beat smaller positives, and
/// -105 beats -130 because it is numerically larger. That makes "best price
/// in a bucket" a plain `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// Create a validated American odds price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOddsPrice` for prices in (-100, 100).
    pub fn try_new(price: i32) -> Result<Self, DomainError> {
        if price.abs() < 100 {
            return Err(DomainError::InvalidOddsPrice { price });
        }
        Ok(Self(price))
    }

    /// The raw signed price.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Whether this price marks the favorite side.
    #[must_use]
    pub const fn is_favorite(&self) -> bool {
        self.0 < 0
    }

    /// Whether this price pays a bettor better than `other`.
    #[must_use]
    pub fn better_than(&self, other: &AmericanOdds) -> bool {
        self > other
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// The kind of market a quote belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketKind {
    Moneyline,
    Spread,
    Total,
    /// A player prop market, e.g. `stat = "points"`.
    Prop { stat: String },
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketKind::Moneyline => write!(f, "moneyline"),
            MarketKind::Spread => write!(f, "spread"),
            MarketKind::Total => write!(f, "total"),
            MarketKind::Prop { stat } => write!(f, "prop:{stat}"),
        }
    }
}

/// The side of a market a quote prices, after name resolution.
///
/// Team-based markets quote `Home`/`Away`; totals and player props quote
/// `Over`/`Under` a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSide {
    Home,
    Away,
    Over,
    Under,
}

impl fmt::Display for QuoteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteSide::Home => write!(f, "home"),
            QuoteSide::Away => write!(f, "away"),
            QuoteSide::Over => write!(f, "over"),
            QuoteSide::Under => write!(f, "under"),
        }
    }
}

/// One sportsbook's price for one side of one market, identifiers resolved.
///
/// Fetched fresh each build and never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OddsQuote {
    /// Sportsbook name as reported by the odds provider.
    pub book: String,
    pub market: MarketKind,
    pub side: QuoteSide,
    /// Line value for spreads, totals, and props; `None` for moneylines.
    pub line: Option<Decimal>,
    pub price: AmericanOdds,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn odds(price: i32) -> AmericanOdds {
        AmericanOdds::try_new(price).unwrap()
    }

    #[test]
    fn rejects_dead_zone_prices() {
        assert!(AmericanOdds::try_new(0).is_err());
        assert!(AmericanOdds::try_new(99).is_err());
        assert!(AmericanOdds::try_new(-99).is_err());
        assert!(AmericanOdds::try_new(100).is_ok());
        assert!(AmericanOdds::try_new(-100).is_ok());
    }

    #[test]
    fn positive_beats_any_negative() {
        assert!(odds(100).better_than(&odds(-100)));
        assert!(odds(110).better_than(&odds(-5000)));
    }

    #[test]
    fn larger_positive_is_better() {
        assert!(odds(150).better_than(&odds(120)));
        assert!(!odds(120).better_than(&odds(150)));
    }

    #[test]
    fn negative_closer_to_zero_is_better() {
        assert!(odds(-105).better_than(&odds(-130)));
        assert!(!odds(-130).better_than(&odds(-105)));
    }

    #[test]
    fn display_signs_prices() {
        assert_eq!(odds(142).to_string(), "+142");
        assert_eq!(odds(-162).to_string(), "-162");
    }

    #[test]
    fn favorite_flag_follows_sign() {
        assert!(odds(-110).is_favorite());
        assert!(!odds(110).is_favorite());
    }
}
