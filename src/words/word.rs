//! Target words and tasks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Letters in every target word.
pub const WORD_LEN: usize = 4;

/// A four-letter uppercase target word.
///
/// Construction validates the shape, so a `Word` always has exactly
/// [`WORD_LEN`] ASCII uppercase letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word([char; WORD_LEN]);

impl Word {
    /// Parse a word, uppercasing ASCII letters.
    ///
    /// Returns `None` unless the input is exactly four ASCII letters.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut letters = ['A'; WORD_LEN];
        let mut count = 0;
        for c in text.trim().chars() {
            if count == WORD_LEN || !c.is_ascii_alphabetic() {
                return None;
            }
            letters[count] = c.to_ascii_uppercase();
            count += 1;
        }
        (count == WORD_LEN).then_some(Self(letters))
    }

    /// All letters in order.
    #[must_use]
    pub fn letters(&self) -> &[char; WORD_LEN] {
        &self.0
    }

    /// Letter at a slot, `None` past the end.
    #[must_use]
    pub fn letter(&self, slot: usize) -> Option<char> {
        self.0.get(slot).copied()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Word {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("not a {WORD_LEN}-letter word: {s:?}"))
    }
}

impl TryFrom<String> for Word {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.to_string()
    }
}

/// The word currently being spelled.
///
/// Immutable once created; the session replaces it wholesale when the next
/// task starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    word: Word,
    started_at_millis: u64,
}

impl Task {
    /// Create a task started at the given session time.
    #[must_use]
    pub fn new(word: Word, started_at_millis: u64) -> Self {
        Self {
            word,
            started_at_millis,
        }
    }

    /// The target word.
    #[must_use]
    pub fn word(&self) -> Word {
        self.word
    }

    /// Session time the task started at.
    #[must_use]
    pub fn started_at_millis(&self) -> u64 {
        self.started_at_millis
    }

    /// Seconds between the task start and `now_millis`.
    #[must_use]
    pub fn elapsed_seconds(&self, now_millis: u64) -> f32 {
        now_millis.saturating_sub(self.started_at_millis) as f32 / 1000.0
    }
}
