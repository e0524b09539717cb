//! Persisted player statistics and leaderboard.
//!
//! Two independent JSON documents live behind a [`Storage`]:
//!
//! - `player_stats`: `{ "avgTime", "totalGames", "taskTimes" }`
//! - `leaderboard`: `{ "entries": [{ "name", "score", "date" }] }`
//!
//! Absence of either document is a normal first run, not an error.
//!
//! ## Example
//!
//! ```
//! use rice_tiles::core::StatsConfig;
//! use rice_tiles::stats::{MemoryStorage, StatsStore};
//!
//! let mut store = StatsStore::load(MemoryStorage::new(), StatsConfig::default());
//! store.record_task_time(2.0);
//! store.record_task_time(4.0);
//! assert_eq!(store.player().average_task_time, 3.0);
//!
//! assert!(store.is_top_ten(150));
//! assert_eq!(store.insert_leaderboard_entry("", 150), Some(0));
//! assert_eq!(store.leaderboard().entries()[0].name, "Rice");
//! ```

mod error;
mod leaderboard;
mod record;
mod storage;
mod store;

pub use error::StatsError;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use record::PlayerStatsRecord;
pub use storage::{JsonFileStorage, MemoryStorage, Storage, LEADERBOARD_KEY, PLAYER_STATS_KEY};
pub use store::StatsStore;
