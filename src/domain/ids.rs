//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::Serialize;

/// Game identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GameId(String);

impl GameId {
    /// Create a new GameId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the game ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GameId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Team identifier - newtype for type safety.
///
/// Identifies a team within the stats source's namespace. Ordered and
/// hashable so it can key the maps built during the join.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the team ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TeamId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Player identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new PlayerId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the player ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_id_new_and_as_str() {
        let id = GameId::new("401584693");
        assert_eq!(id.as_str(), "401584693");
    }

    #[test]
    fn team_id_from_string() {
        let id = TeamId::from("bos".to_string());
        assert_eq!(id.as_str(), "bos");
    }

    #[test]
    fn team_id_display() {
        let id = TeamId::new("nyy");
        assert_eq!(format!("{}", id), "nyy");
    }

    #[test]
    fn player_id_from_str() {
        let id = PlayerId::from("3917376");
        assert_eq!(id.as_str(), "3917376");
    }

    #[test]
    fn ids_order_lexicographically() {
        let a = TeamId::new("atl");
        let b = TeamId::new("bos");
        assert!(a < b);
    }
}
