use thiserror::Error;

use crate::WORD_LEN;

/// A guess history entry that does not have the shape of a guess and its feedback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is not {} characters long", WORD_LEN)]
    WrongLength(String),
    #[error("guess '{0}' contains non-alphabetic characters")]
    NonAlphabetic(String),
    #[error("feedback '{feedback}' contains '{ch}', expected a letter, '?' or '.'")]
    InvalidFeedbackChar { feedback: String, ch: char },
    #[error("feedback '{feedback}' has a letter at position {position} that '{guess}' does not")]
    ExactLetterMismatch {
        guess: String,
        feedback: String,
        position: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWordError {
    #[error("'{0}' is not {} letters long", WORD_LEN)]
    Length(String),
    #[error("'{0}' contains non-alphabetic characters")]
    NonAlphabetic(String),
}

impl From<ParseWordError> for InputError {
    fn from(e: ParseWordError) -> Self {
        match e {
            ParseWordError::Length(s) => InputError::WrongLength(s),
            ParseWordError::NonAlphabetic(s) => InputError::NonAlphabetic(s),
        }
    }
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("opening word '{0}' is not in the dictionary")]
    UnknownOpener(String),
    #[error("the dictionary has no words")]
    Empty,
}
