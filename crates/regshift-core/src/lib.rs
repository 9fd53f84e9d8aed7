//! Core types, traits, errors, config, tracing, and constants for regshift.
//!
//! Everything here is shared by the analysis crate: the error taxonomy,
//! layered TOML configuration, tracing setup, collection aliases and the
//! cooperative cancellation token.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;
