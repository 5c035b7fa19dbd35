//! Canonical team and player references.
//!
//! These are the stats source's view of identity. They are produced once per
//! request by the stats adapter and treated as immutable for the rest of the
//! build: everything else (odds payload names, prop player names) is resolved
//! *into* them, never the other way around.

use serde::Serialize;

use super::ids::{PlayerId, TeamId};
use super::league::League;

/// A team as known to the stats source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRef {
    team_id: TeamId,
    canonical_name: String,
    abbreviation: String,
    league: League,
}

impl TeamRef {
    /// Create a new team reference.
    pub fn new(
        team_id: TeamId,
        canonical_name: impl Into<String>,
        abbreviation: impl Into<String>,
        league: League,
    ) -> Self {
        Self {
            team_id,
            canonical_name: canonical_name.into(),
            abbreviation: abbreviation.into(),
            league,
        }
    }

    /// Get the team ID.
    #[must_use]
    pub const fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    /// Get the canonical display name (e.g. "Boston Red Sox").
    #[must_use]
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// Get the short abbreviation (e.g. "BOS").
    #[must_use]
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Get the league this team plays in.
    #[must_use]
    pub const fn league(&self) -> League {
        self.league
    }
}

/// A player on a roster, valid for one request/report cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRef {
    player_id: PlayerId,
    display_name: String,
    team_id: TeamId,
    position: String,
}

impl PlayerRef {
    /// Create a new player reference.
    pub fn new(
        player_id: PlayerId,
        display_name: impl Into<String>,
        team_id: TeamId,
        position: impl Into<String>,
    ) -> Self {
        Self {
            player_id,
            display_name: display_name.into(),
            team_id,
            position: position.into(),
        }
    }

    /// Get the player ID.
    #[must_use]
    pub const fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// Get the display name as the stats source spells it.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Get the ID of the team this player is rostered on.
    #[must_use]
    pub const fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    /// Get the position abbreviation (e.g. "PG", "QB").
    #[must_use]
    pub fn position(&self) -> &str {
        &self.position
    }
}
