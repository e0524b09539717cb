//! Core engine types: RNG and configuration.
//!
//! These are shared by every other module and carry no game state of their own.

pub mod config;
pub mod rng;

pub use config::{ConfigError, EngineConfig, GameMode, PlacementConfig, ScoringConfig, StatsConfig};
pub use rng::GameRng;
