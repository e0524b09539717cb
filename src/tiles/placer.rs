//! Tile spawning: letter multiset, shuffle and spaced placement.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PlacementConfig};
use crate::words::Task;

use super::tile::{TileIds, TileInstance};

/// Axis-aligned rectangle in screen coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// Create bounds, swapping edges given in the wrong order.
    #[must_use]
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// The letter pool area for a screen of the given size.
    ///
    /// Leaves room for the task slots above and the score bar below.
    #[must_use]
    pub fn letter_pool(width: f32, height: f32) -> Self {
        Self::new(width * 0.12, height * 0.30, width * 0.88, height * 0.77)
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Check if a point lies inside (edges included).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.top..=self.bottom).contains(&point.y)
    }

    /// Uniform point inside the rectangle.
    fn sample(&self, rng: &mut GameRng) -> Vec2 {
        Vec2::new(
            rng.gen_range_f32(self.left..=self.right),
            rng.gen_range_f32(self.top..=self.bottom),
        )
    }
}

/// Produces the shuffled, spaced-out tile batch for a task.
///
/// ## Algorithm
///
/// 1. Letters = the word's letters (duplicates kept) + `distractor_count`
///    uniform letters A-Z.
/// 2. Fisher-Yates shuffle.
/// 3. Each letter gets a position at least `min_separation` away from every
///    earlier one, found by rejection sampling. When `max_attempts` samples
///    all collide the last one is kept: a crowded pool overlaps rather than
///    stalling the round.
#[derive(Clone, Debug, Default)]
pub struct TilePlacer {
    config: PlacementConfig,
}

impl TilePlacer {
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Number of tiles every batch contains.
    #[must_use]
    pub fn batch_size(&self, task: &Task) -> usize {
        task.word().letters().len() + self.config.distractor_count
    }

    /// Spawn a fresh batch of idle tiles for `task`.
    pub fn spawn(&self, task: &Task, rng: &mut GameRng, ids: &mut TileIds) -> Vec<TileInstance> {
        let mut letters: Vec<char> = Vec::with_capacity(self.batch_size(task));
        letters.extend_from_slice(task.word().letters());
        letters.extend((0..self.config.distractor_count).map(|_| rng.gen_letter()));
        rng.shuffle(&mut letters);

        let mut placed: Vec<Vec2> = Vec::with_capacity(letters.len());
        letters
            .into_iter()
            .map(|letter| {
                let position = self.find_position(&placed, rng);
                placed.push(position);
                TileInstance::new(ids.alloc(), letter, position)
            })
            .collect()
    }

    fn find_position(&self, placed: &[Vec2], rng: &mut GameRng) -> Vec2 {
        let bounds = &self.config.bounds;
        let mut candidate = bounds.sample(rng);
        let mut attempts = 1;

        while !self.is_clear(candidate, placed) {
            if attempts >= self.config.max_attempts {
                log::trace!(
                    "no clear spot after {} attempts, accepting overlap at {:?}",
                    attempts,
                    candidate
                );
                break;
            }
            candidate = bounds.sample(rng);
            attempts += 1;
        }

        candidate
    }

    fn is_clear(&self, candidate: Vec2, placed: &[Vec2]) -> bool {
        placed
            .iter()
            .all(|p| p.distance(candidate) >= self.config.min_separation)
    }
}
