//! Provider-agnostic domain logic.

mod aggregator;
mod ids;
mod league;
mod odds;
mod record;
mod refs;
mod resolver;

pub mod error;

// Core identifiers and references
pub use ids::{GameId, PlayerId, TeamId};
pub use league::League;
pub use refs::{PlayerRef, TeamRef};

// Quotes and prices
pub use odds::{AmericanOdds, MarketKind, OddsQuote, QuoteSide};

// Name resolution
pub use resolver::{normalize, AliasTable, NameResolver, Named, Resolution, Unresolved};

// Best-price reduction
pub use aggregator::best_markets;

// Joined records
pub use record::{
    FeedStatus, GameRecord, MarketBest, OrphanEvent, PlayerProps, RecentForm, Slate,
};
