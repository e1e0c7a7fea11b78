use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{GuessResult, ParseWordError, WORD_LEN};

/// A five letter, uppercase ASCII word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LEN]);

impl Word {
    pub fn bytes(&self) -> &[u8; WORD_LEN] {
        &self.0
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| b as char)
    }

    pub fn contains(&self, c: u8) -> bool {
        self.0.contains(&c)
    }
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != WORD_LEN {
            return Err(ParseWordError::Length(s.to_string()));
        }
        if !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ParseWordError::NonAlphabetic(s.to_string()));
        }

        let mut out = [0; WORD_LEN];
        out.iter_mut()
            .zip(s.bytes())
            .for_each(|(o, b)| *o = b.to_ascii_uppercase());
        Ok(Word(out))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars().try_for_each(|c| write!(f, "{}", c))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self)
    }
}

/// The guesses made so far in a game, and what each one scored.
///
/// A word is only ever guessed once, so a guess maps to exactly one result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    guesses: BTreeMap<Word, GuessResult>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    pub fn insert(&mut self, guess: Word, result: GuessResult) -> Option<GuessResult> {
        self.guesses.insert(guess, result)
    }

    pub fn get(&self, guess: &Word) -> Option<&GuessResult> {
        self.guesses.get(guess)
    }

    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Word, GuessResult> {
        self.guesses.iter()
    }

    /// A copy of this history with one hypothetical guess added.
    ///
    /// If `guess` was already played, the recorded result is kept.
    pub fn merged_with(&self, guess: Word, result: GuessResult) -> History {
        let mut out = self.clone();
        out.guesses.entry(guess).or_insert(result);
        out
    }
}

impl FromIterator<(Word, GuessResult)> for History {
    fn from_iter<I: IntoIterator<Item = (Word, GuessResult)>>(iter: I) -> Self {
        History {
            guesses: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = (&'a Word, &'a GuessResult);
    type IntoIter = btree_map::Iter<'a, Word, GuessResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
