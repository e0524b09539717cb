//! Scoring rules and opponent pacing.
//!
//! - [`ScoringPolicy`]: completion score, wrong-tap penalty, time bonus and
//!   the opponent completion-time sample
//! - [`Difficulty`]: levels 1-5 and their time multipliers
//! - [`Opponent`]: a named, paced versus opponent
//!
//! The opponent is not simulated. Each task it gets one completion-time
//! sample derived from the human player's own rolling average, so its pace
//! follows the player's skill, scaled by difficulty.

mod opponent;
mod policy;

pub use opponent::{Difficulty, Opponent, OPPONENT_NAMES};
pub use policy::ScoringPolicy;
