//! Word bank for task selection.

use crate::core::GameRng;

use super::word::{Task, Word};

/// Dictionary shipped with the game.
pub const DEFAULT_WORDS: [&str; 80] = [
    "WORD", "RICE", "GAME", "PLAY", "TIME", "LOVE", "HATE", "LIKE", "MAKE", "TAKE",
    "COME", "SOME", "THEM", "THEN", "THAN", "THAT", "THIS", "WITH", "HAVE", "FROM",
    "THEY", "BEEN", "WERE", "WILL", "YOUR", "MORE", "WHEN", "WORK", "ALSO", "WELL",
    "VERY", "YEAR", "BACK", "CALL", "CAME", "EACH", "EVEN", "FEEL", "FIND", "GIVE",
    "GOOD", "HAND", "HIGH", "KEEP", "LAST", "LEFT", "LIFE", "LIVE", "LONG", "LOOK",
    "MADE", "MANY", "MUST", "NAME", "NEED", "NEXT", "ONLY", "OPEN", "OVER", "PART",
    "REAL", "SAID", "SAME", "SEEM", "SHOW", "SIDE", "SUCH", "SURE", "TELL", "TURN",
    "USED", "WANT", "WAYS", "WEEK", "WENT", "WHAT", "WILD", "WISE", "ZERO", "ZONE",
];

/// Fixed pool of candidate target words.
///
/// Never empty: [`WordBank::new`] refuses a dictionary with no valid words.
///
/// ## Example
///
/// ```
/// use rice_tiles::core::GameRng;
/// use rice_tiles::words::WordBank;
///
/// let bank = WordBank::new(["rice", "game", "toolong"]).unwrap();
/// assert_eq!(bank.len(), 2);
///
/// let mut rng = GameRng::new(1);
/// let task = bank.pick_task(&mut rng, 2_000);
/// assert!(bank.contains(task.word()));
/// assert_eq!(task.started_at_millis(), 2_000);
/// ```
#[derive(Clone, Debug)]
pub struct WordBank {
    words: Vec<Word>,
}

impl WordBank {
    /// Build a bank from raw entries, skipping anything that is not a
    /// four-letter word. Returns `None` if nothing valid remains.
    #[must_use]
    pub fn new<I, S>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<Word> = entries
            .into_iter()
            .filter_map(|entry| {
                let parsed = Word::parse(entry.as_ref());
                if parsed.is_none() {
                    log::warn!("skipping dictionary entry {:?}", entry.as_ref());
                }
                parsed
            })
            .collect();

        (!words.is_empty()).then_some(Self { words })
    }

    /// Number of words in the bank.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a constructed bank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check if a word is in the bank.
    #[must_use]
    pub fn contains(&self, word: Word) -> bool {
        self.words.contains(&word)
    }

    /// Iterate over all words.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    /// Pick a uniformly random word and start a task at `now_millis`.
    pub fn pick_task(&self, rng: &mut GameRng, now_millis: u64) -> Task {
        let index = rng.gen_range_usize(0..self.words.len());
        Task::new(self.words[index], now_millis)
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().filter_map(|w| Word::parse(w)).collect(),
        }
    }
}
