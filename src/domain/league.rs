//! Supported leagues and their provider-specific keys.
//!
//! Every external lookup is scoped by league: the stats provider addresses
//! leagues by a sport/league URL path, the odds provider by a sport key.
//! Scoping also bounds the candidate sets handed to the name resolver, which
//! is what keeps short abbreviations resolvable at all.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::DomainError;

/// A supported league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Nba,
    Nfl,
    Mlb,
    Nhl,
    Ncaab,
    Ncaaf,
}

impl League {
    /// All supported leagues.
    pub const ALL: [League; 6] = [
        League::Nba,
        League::Nfl,
        League::Mlb,
        League::Nhl,
        League::Ncaab,
        League::Ncaaf,
    ];

    /// The stats provider's `{sport}/{league}` URL path segment.
    #[must_use]
    pub const fn stats_path(&self) -> &'static str {
        match self {
            League::Nba => "basketball/nba",
            League::Nfl => "football/nfl",
            League::Mlb => "baseball/mlb",
            League::Nhl => "hockey/nhl",
            League::Ncaab => "basketball/mens-college-basketball",
            League::Ncaaf => "football/college-football",
        }
    }

    /// The odds provider's sport key.
    #[must_use]
    pub const fn odds_key(&self) -> &'static str {
        match self {
            League::Nba => "basketball_nba",
            League::Nfl => "americanfootball_nfl",
            League::Mlb => "baseball_mlb",
            League::Nhl => "icehockey_nhl",
            League::Ncaab => "basketball_ncaab",
            League::Ncaaf => "americanfootball_ncaaf",
        }
    }

    /// Short lowercase name used in config, CLI, and the alias table.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            League::Nba => "nba",
            League::Nfl => "nfl",
            League::Mlb => "mlb",
            League::Nhl => "nhl",
            League::Ncaab => "ncaab",
            League::Ncaaf => "ncaaf",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for League {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nba" => Ok(League::Nba),
            "nfl" => Ok(League::Nfl),
            "mlb" => Ok(League::Mlb),
            "nhl" => Ok(League::Nhl),
            "ncaab" => Ok(League::Ncaab),
            "ncaaf" => Ok(League::Ncaaf),
            _ => Err(DomainError::UnknownLeague {
                input: s.to_string(),
            }),
        }
    }
}
