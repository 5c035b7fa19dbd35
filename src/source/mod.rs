//! Source abstraction layer.
//!
//! Defines traits that stats and odds provider implementations must
//! fulfill, keeping the record builder independent of any concrete API.

mod traits;

pub use traits::{GameOdds, GameStub, OddsSource, RawQuote, RawSide, StatsSource};
