//! Letter tiles.
//!
//! Every spawned tile gets a `TileId` that is unique for the lifetime of a
//! session. The presentation layer reports taps by id, so a tap against a tile
//! from a batch that has already been replaced simply finds nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Session-unique tile identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Monotonic tile id allocator.
#[derive(Clone, Debug, Default)]
pub struct TileIds {
    next: u32,
}

impl TileIds {
    /// Create an allocator starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Lifecycle of a tile within its batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileState {
    /// In the pool, tappable.
    #[default]
    Idle,
    /// Matched to a slot of the current word.
    Selected,
    /// Travelling to its slot while the completed word settles.
    Flying,
    /// Spent by a completed task.
    Consumed,
}

/// A letter tile in the current spawn batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileInstance {
    pub id: TileId,
    pub letter: char,
    pub position: Vec2,
    pub state: TileState,
}

impl TileInstance {
    /// Create an idle tile.
    #[must_use]
    pub fn new(id: TileId, letter: char, position: Vec2) -> Self {
        Self {
            id,
            letter,
            position,
            state: TileState::Idle,
        }
    }

    /// Check if the tile can still be tapped.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == TileState::Idle
    }
}
