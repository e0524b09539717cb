//! Score, penalty, time bonus and opponent pacing rules.

use crate::core::{EngineConfig, GameRng, ScoringConfig};
use crate::stats::PlayerStatsRecord;

use super::opponent::Difficulty;

/// Numeric policy of the game.
///
/// All operations are total: out-of-domain inputs (negative times, scores
/// below the penalty) are clamped rather than rejected.
#[derive(Clone, Debug)]
pub struct ScoringPolicy {
    config: ScoringConfig,
    game_time: f32,
    time_bonus: f32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ScoringPolicy {
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            config: config.scoring.clone(),
            game_time: config.game_time,
            time_bonus: config.time_bonus,
        }
    }

    /// Points for a task completed in `time_taken` seconds.
    ///
    /// `max(30, round(200 - 25 * t))` with the default config.
    #[must_use]
    pub fn score_for_completion(&self, time_taken: f32) -> u32 {
        let decayed = self.config.base_score - time_taken.max(0.0) * self.config.per_second_decay;
        let floor = self.config.min_score as f32;
        decayed.round().max(floor) as u32
    }

    /// Score after a wrong tap. Never below zero.
    #[must_use]
    pub fn penalty_for_wrong_tap(&self, current_score: u32) -> u32 {
        current_score.saturating_sub(self.config.wrong_tap_penalty)
    }

    /// Time left after completing a task, capped at the round length.
    #[must_use]
    pub fn time_bonus_on_completion(&self, time_left: f32) -> f32 {
        (time_left + self.time_bonus).min(self.game_time)
    }

    /// Sample how long the opponent takes for one task.
    ///
    /// The base is the player's own average, or a uniform draw from the
    /// configured range when there is no history yet. The base is scaled by
    /// the difficulty multiplier and jittered uniformly by up to 15%.
    pub fn sample_opponent_time(
        &self,
        difficulty: Difficulty,
        stats: &PlayerStatsRecord,
        rng: &mut GameRng,
    ) -> f32 {
        let base = if stats.has_history() {
            stats.average_task_time
        } else {
            let (low, high) = self.config.opponent_base_range;
            rng.gen_range_f32(low..=high)
        };

        let adjusted = base * difficulty.multiplier();
        let variance = adjusted * self.config.opponent_jitter;
        rng.gen_range_f32((adjusted - variance)..=(adjusted + variance))
    }
}
