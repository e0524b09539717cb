//! Persisted player performance history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Rolling record of how fast the player completes tasks.
///
/// Persisted as `{ "avgTime": f32, "totalGames": u32, "taskTimes": [f32] }`.
/// `average_task_time` is always the mean of `recent_task_times` once a
/// time has been recorded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStatsRecord {
    #[serde(rename = "avgTime")]
    pub average_task_time: f32,

    #[serde(rename = "totalGames")]
    pub total_games_played: u32,

    /// Most recent completion times, oldest first.
    #[serde(rename = "taskTimes")]
    pub recent_task_times: VecDeque<f32>,
}

impl PlayerStatsRecord {
    /// Check if there is enough history to pace an opponent on.
    #[must_use]
    pub fn has_history(&self) -> bool {
        self.total_games_played > 0 && self.average_task_time > 0.0
    }

    /// Append a completion time, evicting the oldest beyond `window`, and
    /// recompute the average.
    pub fn record(&mut self, task_time: f32, window: usize) {
        self.recent_task_times.push_back(task_time);
        self.trim(window);
        self.recompute_average();
    }

    /// Enforce the window on a record read from storage.
    ///
    /// The stored average is kept unless times had to be dropped.
    pub fn normalize(&mut self, window: usize) {
        if self.trim(window) {
            self.recompute_average();
        }
    }

    fn trim(&mut self, window: usize) -> bool {
        let mut trimmed = false;
        while self.recent_task_times.len() > window {
            self.recent_task_times.pop_front();
            trimmed = true;
        }
        trimmed
    }

    fn recompute_average(&mut self) {
        if !self.recent_task_times.is_empty() {
            let total: f32 = self.recent_task_times.iter().sum();
            self.average_task_time = total / self.recent_task_times.len() as f32;
        }
    }
}
