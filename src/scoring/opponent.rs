//! Versus opponents and difficulty levels.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Names opponents are drawn from.
pub const OPPONENT_NAMES: [&str; 48] = [
    "Ahmad", "Siti", "Muhammad", "Nurul", "Aminah", "Hassan", "Fatimah", "Ibrahim",
    "Aziz", "Nora", "Khairul", "Zainab", "Ismail", "Rafiq", "Farah", "Rizal",
    "Aishah", "Amir", "Nazir", "Hana", "Azman", "Laila", "Hafiz", "Maryam",
    "Razak", "Sofia", "Kamal", "Yasmin", "Jalil", "Aisyah", "Firdaus", "Azlina",
    "Rashid", "Nadia", "Zulkifli", "Hidayah", "Halim", "Suraya", "Arif", "Melissa",
    "Hakim", "Salmah", "Ramli", "Zura", "Kamarul", "Noraini", "Shahrul", "Azura",
];

/// Multiplier applied to the opponent's base time, indexed by level - 1.
const MULTIPLIERS: [f32; 5] = [1.00, 0.90, 0.80, 0.70, 0.67];

/// Opponent difficulty, level 1 (normal) to 5 (very hard).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const EASIEST: Difficulty = Difficulty(1);
    pub const HARDEST: Difficulty = Difficulty(5);

    /// Create a difficulty, `None` outside 1..=5.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::EASIEST.0 && level <= Self::HARDEST.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// All levels, easiest first.
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (Self::EASIEST.0..=Self::HARDEST.0).map(Difficulty)
    }

    /// Uniformly random level.
    pub fn random(rng: &mut GameRng) -> Self {
        Self(Self::EASIEST.0 + rng.gen_range_usize(0..MULTIPLIERS.len()) as u8)
    }

    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Scale on the opponent's completion time. Lower is faster.
    #[must_use]
    pub fn multiplier(self) -> f32 {
        MULTIPLIERS[(self.0 - 1) as usize]
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::EASIEST
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("difficulty must be 1-5, got {level}"))
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

/// A versus opponent: a display name and a pace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
    pub difficulty: Difficulty,
}

impl Opponent {
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }

    /// Random roster name at a random difficulty.
    pub fn random(rng: &mut GameRng) -> Self {
        let name = rng.choose(&OPPONENT_NAMES).copied().unwrap_or("Rice");
        Self::new(name, Difficulty::random(rng))
    }
}
