//! Concrete adapters for external services.
//!
//! Each adapter owns its provider's wire format: typed DTOs plus conversion
//! into the domain shapes. Provider quirks never leak past this boundary.

pub mod llm;
pub mod oddsapi;
pub mod statsapi;
