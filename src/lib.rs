//! Slatebook - sports betting-line aggregation.
//!
//! This crate joins a sports-stats provider with a betting-odds provider and
//! produces one normalized record per scheduled game: matched teams, resolved
//! player names, recent form, and the best available price per market across
//! sportsbooks.
//!
//! # Architecture
//!
//! The join pipeline has three core pieces:
//!
//! - **`domain::resolver`** - Deterministic name resolution: alias table
//!   fast-path, then fuzzy scoring with a high confidence threshold. Anything
//!   below the threshold is surfaced as an explicit `Unresolved` value,
//!   never guessed.
//! - **`domain::aggregator`** - Pure reduction of per-sportsbook quotes to
//!   the single best-priced line per (market, side, line) bucket.
//! - **`app::builder`** - Orchestration: fetch schedule and odds in
//!   parallel, resolve identifiers, match odds events to games, aggregate,
//!   and assemble the final [`Slate`](domain::Slate).
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files with env-var secrets
//! - [`domain`] - Provider-agnostic types: refs, quotes, records, resolution
//! - [`error`] - Error types for the crate
//! - [`source`] - Trait definitions for stats and odds providers
//! - [`adapter`] - Concrete provider clients (ESPN-style stats, The Odds API)
//!   and the LLM commentary client
//! - [`app`] - Record building and report rendering
//!
//! # Example
//!
//! ```no_run
//! use slatebook::domain::{AliasTable, NameResolver};
//!
//! let resolver = NameResolver::new(AliasTable::default(), 0.85);
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod source;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
