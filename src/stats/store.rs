//! Player statistics and leaderboard, backed by a [`Storage`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::StatsConfig;

use super::error::StatsError;
use super::leaderboard::{Leaderboard, LeaderboardEntry};
use super::record::PlayerStatsRecord;
use super::storage::{Storage, LEADERBOARD_KEY, PLAYER_STATS_KEY};

/// Timestamp format for leaderboard rows.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Persisted player history and leaderboard.
///
/// Loaded once at startup and written through on every mutation. A failed
/// write is logged and the document stays dirty; the next mutation or an
/// explicit [`StatsStore::flush`] retries it. Reads never see a stale value
/// because the in-memory copy is authoritative.
#[derive(Debug)]
pub struct StatsStore<S: Storage> {
    storage: S,
    config: StatsConfig,
    player: PlayerStatsRecord,
    leaderboard: Leaderboard,
    player_dirty: bool,
    leaderboard_dirty: bool,
}

impl<S: Storage> StatsStore<S> {
    /// Load both documents. Missing or unreadable documents start empty.
    pub fn load(storage: S, config: StatsConfig) -> Self {
        let mut player: PlayerStatsRecord = read_document(&storage, PLAYER_STATS_KEY);
        player.normalize(config.window);

        let mut leaderboard: Leaderboard = read_document(&storage, LEADERBOARD_KEY);
        leaderboard.normalize(config.leaderboard_size);

        log::debug!(
            "loaded stats: {} games, avg {:.2}s, {} leaderboard entries",
            player.total_games_played,
            player.average_task_time,
            leaderboard.len()
        );

        Self {
            storage,
            config,
            player,
            leaderboard,
            player_dirty: false,
            leaderboard_dirty: false,
        }
    }

    #[must_use]
    pub fn player(&self) -> &PlayerStatsRecord {
        &self.player
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    #[must_use]
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Check if any document is waiting to be written.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.player_dirty || self.leaderboard_dirty
    }

    /// Add a task completion time to the rolling window and persist.
    pub fn record_task_time(&mut self, task_time: f32) {
        self.player.record(task_time, self.config.window);
        self.player_dirty = true;
        self.flush_logged();
    }

    /// Count a finished game and persist.
    pub fn increment_games_played(&mut self) {
        self.player.total_games_played += 1;
        self.player_dirty = true;
        self.flush_logged();
    }

    /// Check if `score` earns a leaderboard place.
    #[must_use]
    pub fn is_top_ten(&self, score: u32) -> bool {
        self.leaderboard.qualifies(score, self.config.leaderboard_size)
    }

    /// Insert a score stamped with the local time.
    ///
    /// Returns the 0-based rank, or `None` if the score did not make the board.
    pub fn insert_leaderboard_entry(&mut self, name: &str, score: u32) -> Option<usize> {
        let timestamp = chrono::Local::now().format(DATE_FORMAT).to_string();
        self.insert_leaderboard_entry_at(name, score, timestamp)
    }

    /// Insert a score with an explicit timestamp.
    pub fn insert_leaderboard_entry_at(
        &mut self,
        name: &str,
        score: u32,
        timestamp: impl Into<String>,
    ) -> Option<usize> {
        let name = match name.trim() {
            "" => self.config.placeholder_name.clone(),
            trimmed => trimmed.to_string(),
        };
        let entry = LeaderboardEntry {
            name,
            score,
            timestamp: timestamp.into(),
        };

        let rank = self.leaderboard.insert(entry, self.config.leaderboard_size);
        log::info!("leaderboard insert: score {} rank {:?}", score, rank);

        self.leaderboard_dirty = true;
        self.flush_logged();
        rank
    }

    /// Write every dirty document.
    ///
    /// Both documents are attempted; the first error is returned and the
    /// failed document stays dirty.
    pub fn flush(&mut self) -> Result<(), StatsError> {
        let mut result = Ok(());

        if self.player_dirty {
            match write_document(&mut self.storage, PLAYER_STATS_KEY, &self.player) {
                Ok(()) => self.player_dirty = false,
                Err(err) => result = Err(err),
            }
        }

        if self.leaderboard_dirty {
            match write_document(&mut self.storage, LEADERBOARD_KEY, &self.leaderboard) {
                Ok(()) => self.leaderboard_dirty = false,
                Err(err) => {
                    if result.is_ok() {
                        result = Err(err);
                    }
                }
            }
        }

        result
    }

    fn flush_logged(&mut self) {
        if let Err(err) = self.flush() {
            log::warn!("failed to persist stats, will retry: {}", err);
        }
    }
}

fn read_document<T, S>(storage: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: Storage,
{
    let contents = match storage.read(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => return T::default(),
        Err(err) => {
            log::warn!("could not read {}: {}", key, err);
            return T::default();
        }
    };

    serde_json::from_str(&contents).unwrap_or_else(|err| {
        log::warn!("discarding corrupt {} document: {}", key, err);
        T::default()
    })
}

fn write_document<T, S>(storage: &mut S, key: &str, value: &T) -> Result<(), StatsError>
where
    T: Serialize,
    S: Storage,
{
    let json = serde_json::to_string_pretty(value)?;
    storage.write(key, &json)
}
