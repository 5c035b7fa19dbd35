//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `try_new` constructors that validate inputs.

use thiserror::Error;

/// Errors for domain invariant violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// American odds prices cannot fall in the open interval (-100, 100).
    #[error("invalid American odds price {price}: magnitude must be at least 100")]
    InvalidOddsPrice { price: i32 },

    /// A league string did not match any supported league.
    #[error("unknown league: {input}")]
    UnknownLeague { input: String },
}
