//! Target words, tasks and the word bank.

mod bank;
mod word;

pub use bank::{WordBank, DEFAULT_WORDS};
pub use word::{Task, Word, WORD_LEN};
