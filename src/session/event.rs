//! Session inputs and outputs.

use serde::{Deserialize, Serialize};

use crate::tiles::TileId;
use crate::words::Word;

/// Something the presentation layer should react to.
///
/// Events are queued by the session in the order they happen and handed out
/// by [`Session::drain_events`](super::Session::drain_events).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A round began. `epoch` identifies it.
    RoundStarted { epoch: u64 },

    /// A new word is up and its tiles have been spawned.
    TaskStarted { word: Word },

    /// Versus only: how long the opponent takes on the current task.
    OpponentPaced { name: String, task_time: f32 },

    /// A tap matched the next letter and filled `slot`.
    TileTapAccepted { tile: TileId, slot: usize },

    /// A tap on the wrong letter; the penalty has been applied.
    TileTapRejected { tile: TileId },

    /// The word was completed.
    TaskCompleted {
        word: Word,
        score: u32,
        time_taken: f32,
    },

    /// The completion flash is over.
    FlashEnded,

    /// The clock ran out.
    RoundEnded { final_score: u32, top_ten: bool },
}

/// Something the presentation layer feeds in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionInput {
    StartRound,
    /// Frame time elapsed, in seconds.
    Tick { dt: f32 },
    TileTapped { tile: TileId },
}
