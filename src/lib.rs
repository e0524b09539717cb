//! # rice-tiles
//!
//! Session engine for a timed word game: tap scattered letter tiles in
//! order to spell a four-letter word before the clock runs out.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Free**: The engine knows nothing about rendering,
//!    tweening or hit-testing. It takes taps and frame ticks in and hands
//!    out plain data and events.
//!
//! 2. **Deterministic**: Time only moves through `Session::advance` and all
//!    randomness comes from seeded `GameRng` streams, so a seeded session
//!    replays exactly.
//!
//! 3. **Explicit Ownership**: No global state. A `Session` owns its
//!    configuration, its RNG streams and its `StatsStore`.
//!
//! ## Architecture
//!
//! - **Adaptive Opponent**: The versus opponent is not simulated. Each word
//!   it gets one completion time sampled from the player's own rolling
//!   average, scaled by difficulty.
//!
//! - **Epoch-Tagged Deferrals**: Delayed work is tagged with the round it
//!   was scheduled in and dropped if that round is gone.
//!
//! ## Modules
//!
//! - `core`: RNG and configuration
//! - `words`: Target words, tasks and the word bank
//! - `tiles`: Letter tiles and their placement
//! - `scoring`: Scores, penalties, time bonus and opponent pacing
//! - `stats`: Persisted player history and leaderboard
//! - `session`: The round state machine

pub mod core;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod tiles;
pub mod words;

// Re-export commonly used types
pub use crate::core::{ConfigError, EngineConfig, GameMode, GameRng};

pub use crate::words::{Task, Word, WordBank, WORD_LEN};

pub use crate::tiles::{Bounds, TileId, TileInstance, TilePlacer, TileState};

pub use crate::scoring::{Difficulty, Opponent, ScoringPolicy};

pub use crate::stats::{
    JsonFileStorage, Leaderboard, LeaderboardEntry, MemoryStorage, PlayerStatsRecord,
    StatsError, StatsStore, Storage,
};

pub use crate::session::{
    RoundPhase, Session, SessionEvent, SessionInput, SessionRecord, TimerUrgency,
};
