//! Engine configuration types.
//!
//! A game provides these at startup:
//! - `PlacementConfig`: letter pool size and layout rules
//! - `ScoringConfig`: score decay, penalties and opponent pacing
//! - `StatsConfig`: history window and leaderboard size
//! - `EngineConfig`: round timing plus all of the above
//!
//! Every default matches the shipped game. Configs can also be loaded from
//! JSON, in which case missing fields fall back to those defaults.

use serde::{Deserialize, Serialize};

use crate::scoring::Opponent;
use crate::tiles::Bounds;

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Who the player is up against.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum GameMode {
    /// Playing alone. Only solo rounds feed the player's statistics.
    #[default]
    Solo,
    /// Racing a paced opponent.
    Versus(Opponent),
}

impl GameMode {
    /// Check if this is a solo game.
    #[must_use]
    pub fn is_solo(&self) -> bool {
        matches!(self, GameMode::Solo)
    }

    /// The opponent, if any.
    #[must_use]
    pub fn opponent(&self) -> Option<&Opponent> {
        match self {
            GameMode::Solo => None,
            GameMode::Versus(opponent) => Some(opponent),
        }
    }
}

/// Letter pool layout parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Random filler letters added next to the word's letters.
    pub distractor_count: usize,

    /// Rectangle tiles are placed in.
    pub bounds: Bounds,

    /// Minimum distance between tile centers.
    pub min_separation: f32,

    /// Rejection sampling budget per tile.
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            distractor_count: 8,
            bounds: Bounds::letter_pool(1280.0, 720.0),
            min_separation: 100.0,
            max_attempts: 100,
        }
    }
}

/// Scoring and opponent pacing parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score for an instant completion.
    pub base_score: f32,

    /// Points lost per second taken.
    pub per_second_decay: f32,

    /// Floor for any completed task.
    pub min_score: u32,

    /// Points deducted per wrong tap.
    pub wrong_tap_penalty: u32,

    /// Opponent base time range (seconds) when the player has no history.
    pub opponent_base_range: (f32, f32),

    /// Relative jitter applied around the opponent's adjusted time.
    pub opponent_jitter: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 200.0,
            per_second_decay: 25.0,
            min_score: 30,
            wrong_tap_penalty: 20,
            opponent_base_range: (3.0, 4.5),
            opponent_jitter: 0.15,
        }
    }
}

/// Persistence parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of recent task times kept for the rolling average.
    pub window: usize,

    /// Maximum leaderboard entries.
    pub leaderboard_size: usize,

    /// Name recorded when the player leaves theirs blank.
    pub placeholder_name: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window: 50,
            leaderboard_size: 10,
            placeholder_name: "Rice".to_string(),
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Round length in seconds; also the cap for time bonuses.
    pub game_time: f32,

    /// Seconds added to the clock per completed task.
    pub time_bonus: f32,

    /// Pause between the last accepted tap and task completion.
    pub settle_delay: f32,

    /// Pause between task completion and the next task.
    pub next_task_delay: f32,

    /// Duration of the completion flash.
    pub flash_duration: f32,

    /// Solo or versus.
    pub mode: GameMode,

    /// Fixed seed for reproducible sessions. `None` seeds from entropy.
    pub seed: Option<u64>,

    pub placement: PlacementConfig,
    pub scoring: ScoringConfig,
    pub stats: StatsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            game_time: 30.0,
            time_bonus: 2.0,
            settle_delay: 0.7,
            next_task_delay: 0.8,
            flash_duration: 0.35,
            mode: GameMode::Solo,
            seed: None,
            placement: PlacementConfig::default(),
            scoring: ScoringConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.game_time > 0.0 && self.game_time.is_finite()) {
            return invalid("game_time must be positive and finite");
        }
        if !(self.time_bonus >= 0.0 && self.time_bonus.is_finite()) {
            return invalid("time_bonus must be finite and not negative");
        }
        let delays = [self.settle_delay, self.next_task_delay, self.flash_duration];
        if !delays.iter().all(|d| *d >= 0.0 && d.is_finite()) {
            return invalid("delays must be finite and not negative");
        }
        let bounds = &self.placement.bounds;
        let edges = [bounds.left, bounds.top, bounds.right, bounds.bottom];
        if !edges.iter().all(|e| e.is_finite())
            || !bounds.width().is_finite()
            || !bounds.height().is_finite()
        {
            return invalid("placement bounds must be finite");
        }
        if !(self.placement.min_separation >= 0.0 && self.placement.min_separation.is_finite()) {
            return invalid("min_separation must be finite and not negative");
        }
        if self.placement.max_attempts == 0 {
            return invalid("max_attempts must be at least 1");
        }
        let (low, high) = self.scoring.opponent_base_range;
        if !(low > 0.0 && high >= low && high.is_finite()) {
            return invalid("opponent_base_range must be positive, finite and ordered");
        }
        if !(0.0..1.0).contains(&self.scoring.opponent_jitter) {
            return invalid("opponent_jitter must be in [0, 1)");
        }
        if self.stats.window == 0 {
            return invalid("stats window must be at least 1");
        }
        if self.stats.leaderboard_size == 0 {
            return invalid("leaderboard_size must be at least 1");
        }
        Ok(())
    }

    /// Set the round length.
    #[must_use]
    pub fn with_game_time(mut self, seconds: f32) -> Self {
        self.game_time = seconds;
        self
    }

    /// Set the game mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the settle and next-task delays.
    #[must_use]
    pub fn with_delays(mut self, settle: f32, next_task: f32) -> Self {
        self.settle_delay = settle;
        self.next_task_delay = next_task;
        self
    }

    /// Set the letter pool rectangle.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.placement.bounds = bounds;
        self
    }

    /// Set the number of distractor letters.
    #[must_use]
    pub fn with_distractors(mut self, count: usize) -> Self {
        self.placement.distractor_count = count;
        self
    }
}
