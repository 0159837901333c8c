//! # Tempodash - EDF Tempo tariff aggregation and comparison engine
//!
//! Backend for a mobile dashboard over the French EDF "Tempo" dynamic
//! electricity tariff: per-day colors, annual quota usage, current unit
//! prices, and comparisons against the two flat-rate reference plans.
//!
//! ## Architecture
//!
//! The application follows a modular architecture with clear separation of
//! concerns:
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `tempo`: Day colors and the upstream color normalizer
//! - `client`: HTTP client for the api-couleur-tempo upstream
//! - `calendar`: Month reconstruction with fail-to-neutral degradation
//! - `stats`: Annual quota usage mapping
//! - `prices`: Tempo unit prices and fixed reference tariffs
//! - `compare`: Pure plan-comparison arithmetic
//! - `dashboard`: Joint fetching with per-source failure isolation
//! - `web`: HTTP API serving the UI

pub mod calendar;
pub mod client;
pub mod compare;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod prices;
pub mod stats;
pub mod tempo;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TempoError};
pub use tempo::TempoColor;
