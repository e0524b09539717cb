//! Letter tiles and their placement in the letter pool.
//!
//! A batch holds the task word's letters plus random distractors, shuffled
//! and spread out so tiles do not overlap. The session replaces the whole
//! batch on every new task.

mod placer;
mod tile;

pub use placer::{Bounds, TilePlacer};
pub use tile::{TileId, TileIds, TileInstance, TileState};
