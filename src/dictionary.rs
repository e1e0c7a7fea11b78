use itertools::Itertools;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;

use crate::{DictionaryError, Word, WordPool};

const DICTIONARY: &str = include_str!("../words/dictionary.txt");
const OPENERS: &str = include_str!("../words/openers.txt");

static EMBEDDED: OnceCell<Dictionary> = OnceCell::new();

/// Every word the game knows, how common each one is, and the words worth opening with.
///
/// Read-only once built; solvers borrow it.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<Word>,
    frequencies: FxHashMap<Word, f64>,
    openers: Vec<Word>,
}

impl Dictionary {
    /// The dictionary shipped with the crate, parsed on first use.
    pub fn embedded() -> &'static Dictionary {
        EMBEDDED.get_or_init(|| {
            Dictionary::parse(DICTIONARY, OPENERS).expect("the embedded word lists are well formed")
        })
    }

    /// Builds a dictionary from `WORD FREQUENCY` lines and a list of opening words.
    ///
    /// Blank lines are skipped. Repeated words keep their last frequency.
    pub fn parse(words: &str, openers: &str) -> Result<Dictionary, DictionaryError> {
        let mut entries = vec![];
        for (i, line) in words.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = |reason: String| DictionaryError::Malformed {
                line: i + 1,
                reason,
            };
            let (word, freq) = line
                .split_whitespace()
                .collect_tuple()
                .ok_or_else(|| malformed(format!("expected 'WORD FREQUENCY', got '{}'", line)))?;
            let word: Word = word.parse().map_err(|e| malformed(format!("{}", e)))?;
            let freq: f64 = freq
                .parse()
                .ok()
                .filter(|f: &f64| f.is_finite() && *f >= 0.0)
                .ok_or_else(|| malformed(format!("bad frequency '{}'", freq)))?;
            entries.push((word, freq));
        }

        let openers = openers
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse::<Word>()
                    .map_err(|_| DictionaryError::UnknownOpener(l.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Dictionary::new(entries, openers)
    }

    pub fn new<I>(entries: I, openers: Vec<Word>) -> Result<Dictionary, DictionaryError>
    where
        I: IntoIterator<Item = (Word, f64)>,
    {
        let frequencies: FxHashMap<Word, f64> = entries.into_iter().collect();
        if frequencies.is_empty() {
            return Err(DictionaryError::Empty);
        }
        if let Some(unknown) = openers.iter().find(|w| !frequencies.contains_key(w)) {
            return Err(DictionaryError::UnknownOpener(unknown.to_string()));
        }

        Ok(Dictionary {
            words: frequencies.keys().copied().sorted().collect_vec(),
            frequencies,
            openers: openers.into_iter().unique().collect_vec(),
        })
    }

    /// All words, in alphabetical order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.frequencies.contains_key(word)
    }

    pub fn frequency(&self, word: &Word) -> Option<f64> {
        self.frequencies.get(word).copied()
    }

    pub fn openers(&self) -> &[Word] {
        &self.openers
    }

    /// The possible answers: every word at least as common as `min_frequency`.
    pub fn targets(&self, min_frequency: f64) -> WordPool {
        self.words
            .iter()
            .filter(|w| self.frequencies[*w] >= min_frequency)
            .copied()
            .collect()
    }

    /// Every word that may be guessed.
    pub fn valids(&self) -> WordPool {
        self.words.iter().copied().collect()
    }
}
