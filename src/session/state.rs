//! Round state: phase, scoreboard record and timer presentation data.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::words::Word;

/// Where the round is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round has been started yet.
    #[default]
    Idle,
    /// The clock is running and taps count.
    Active,
    /// The clock ran out. Only a new round leaves this state.
    Ended,
}

impl RoundPhase {
    #[must_use]
    pub fn is_active(self) -> bool {
        self == RoundPhase::Active
    }
}

/// One finished word in the round history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub word: Word,
    pub time_taken: f32,
    pub score: u32,
}

/// The scoreboard of the current round.
///
/// Reset wholesale at round start. Uses `im::Vector` for the history so
/// the presentation layer can hold a snapshot cheaply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub current_score: u32,
    pub wrong_tap_count: u32,
    pub tasks_completed: u32,

    /// Seconds left, within `[0, game_time]`.
    pub time_left: f32,
    pub game_time: f32,
    pub is_active: bool,
    pub completed_tasks: Vector<CompletedTask>,

    /// Versus only: the opponent's completion time for the current task.
    pub opponent_task_time: Option<f32>,

    /// Raised on task completion until the flash ends.
    pub flash_active: bool,
}

impl SessionRecord {
    /// A fresh record with a full clock.
    #[must_use]
    pub fn new(game_time: f32) -> Self {
        Self {
            current_score: 0,
            wrong_tap_count: 0,
            tasks_completed: 0,
            time_left: game_time,
            game_time,
            is_active: false,
            completed_tasks: Vector::new(),
            opponent_task_time: None,
            flash_active: false,
        }
    }

    /// Fraction of the clock remaining, 1.0 at round start.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.game_time > 0.0 {
            (self.time_left / self.game_time).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Time left as `m:ss`, whole seconds truncated.
    #[must_use]
    pub fn clock_label(&self) -> String {
        let whole = self.time_left.max(0.0) as u32;
        format!("{}:{:02}", whole / 60, whole % 60)
    }

    /// Score padded to three digits.
    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{:03}", self.current_score)
    }

    #[must_use]
    pub fn urgency(&self) -> TimerUrgency {
        TimerUrgency::from_time_left(self.time_left)
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// How alarming the clock should look.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TimerUrgency {
    Calm,
    /// Between 10 and 5 seconds. The factor runs from 0.0 at 10 s to 1.0 at 5 s.
    Warning(f32),
    /// 5 seconds or less.
    Critical,
}

impl TimerUrgency {
    const WARNING_START: f32 = 10.0;
    const CRITICAL_START: f32 = 5.0;

    #[must_use]
    pub fn from_time_left(time_left: f32) -> Self {
        if time_left <= 0.0 || time_left > Self::WARNING_START {
            TimerUrgency::Calm
        } else if time_left > Self::CRITICAL_START {
            let span = Self::WARNING_START - Self::CRITICAL_START;
            TimerUrgency::Warning((Self::WARNING_START - time_left) / span)
        } else {
            TimerUrgency::Critical
        }
    }
}
