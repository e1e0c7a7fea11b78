pub mod dictionary;
pub mod error;
pub mod game;
pub mod pool;
pub mod recommend;
pub mod solver;
pub mod word;

pub use dictionary::Dictionary;
pub use error::{DictionaryError, InputError, ParseWordError};
pub use game::{run_solver, SolverResult};
pub use pool::WordPool;
pub use recommend::{recommend_next_words, recommend_with, sanitize_history, MAX_RECOMMENDATIONS};
pub use solver::{Branch, SearchStats, Solver, SolverConfig};
pub use word::{History, Word};

pub const WORD_LEN: usize = 5;

/// Feedback character for a letter that is in the answer, but somewhere else.
pub const PRESENT_MARK: char = '?';
/// Feedback character for a letter that is not in the answer (or not that many times).
pub const ABSENT_MARK: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharResult {
    Correct,
    CorrectChar,
    Incorrect,
}

pub type GuessResult = [CharResult; WORD_LEN];

pub fn is_solved(result: &GuessResult) -> bool {
    result.iter().all(|r| *r == CharResult::Correct)
}

#[derive(Clone, Copy)]
pub struct Wordle {
    word: Word,
}

impl Wordle {
    pub fn new(word: Word) -> Wordle {
        Wordle { word }
    }

    /// Scores `guess` against the answer.
    ///
    /// Exact matches consume their letter first; the remaining occurrences of a
    /// letter in the guess are marked `CorrectChar` only while unmatched copies of
    /// it are left in the answer.
    pub fn check(&self, guess: &Word) -> GuessResult {
        let mut out = [CharResult::Incorrect; WORD_LEN];
        let mut unmatched = [0u8; 26];

        for (i, (g, a)) in guess.bytes().iter().zip(self.word.bytes()).enumerate() {
            if g == a {
                out[i] = CharResult::Correct;
            } else {
                unmatched[letter_index(*a)] += 1;
            }
        }

        for (i, g) in guess.bytes().iter().enumerate() {
            if out[i] == CharResult::Correct {
                continue;
            }
            let left = &mut unmatched[letter_index(*g)];
            if *left > 0 {
                *left -= 1;
                out[i] = CharResult::CorrectChar;
            }
        }

        out
    }
}

/// The feedback `target` would give for `guess`.
pub fn simulate(guess: &Word, target: &Word) -> GuessResult {
    Wordle::new(*target).check(guess)
}

fn letter_index(b: u8) -> usize {
    (b - b'A') as usize
}

/// Serializes a result into the external feedback format: the guessed letter for an
/// exact match, [`PRESENT_MARK`] or [`ABSENT_MARK`] otherwise.
pub fn encode_result(guess: &Word, result: &GuessResult) -> String {
    guess
        .chars()
        .zip(result)
        .map(|(c, r)| match r {
            CharResult::Correct => c,
            CharResult::CorrectChar => PRESENT_MARK,
            CharResult::Incorrect => ABSENT_MARK,
        })
        .collect()
}

/// Parses a feedback string for `guess`. Case-insensitive.
pub fn parse_result(guess: &Word, feedback: &str) -> Result<GuessResult, InputError> {
    let chars: Vec<char> = feedback.chars().collect();
    if chars.len() != WORD_LEN {
        return Err(InputError::WrongLength(feedback.to_string()));
    }

    let mut out = [CharResult::Incorrect; WORD_LEN];
    for (i, (c, g)) in chars.into_iter().zip(guess.chars()).enumerate() {
        out[i] = match c.to_ascii_uppercase() {
            PRESENT_MARK => CharResult::CorrectChar,
            ABSENT_MARK => CharResult::Incorrect,
            c if c == g => CharResult::Correct,
            c if c.is_ascii_alphabetic() => {
                return Err(InputError::ExactLetterMismatch {
                    guess: guess.to_string(),
                    feedback: feedback.to_string(),
                    position: i,
                })
            }
            _ => {
                return Err(InputError::InvalidFeedbackChar {
                    feedback: feedback.to_string(),
                    ch: c,
                })
            }
        };
    }

    Ok(out)
}

#[cfg(test)]
macro_rules! mask {
    (C) => {$crate::CharResult::Correct};
    (M) => {$crate::CharResult::CorrectChar};
    (W) => {$crate::CharResult::Incorrect};
    ($($c:tt)+) => {[$(mask!($c)),+]}
}

#[cfg(test)]
pub(crate) use mask;

#[cfg(test)]
pub(crate) fn w(s: &str) -> Word {
    s.parse().unwrap()
}
