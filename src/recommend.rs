use rand::thread_rng;
use rand::Rng;

use crate::{parse_result, Dictionary, History, InputError, Solver, SolverConfig, Word, WORD_LEN};

pub const MAX_RECOMMENDATIONS: usize = 10;

/// Checks the shape of every guess and its feedback, and normalises them to uppercase.
///
/// Nothing is checked for consistency; a history that rules out every answer is
/// accepted here and shows up later as an empty recommendation list.
pub fn sanitize_history<I, G, F>(guesses: I) -> Result<History, InputError>
where
    I: IntoIterator<Item = (G, F)>,
    G: AsRef<str>,
    F: AsRef<str>,
{
    let mut history = History::new();
    for (guess, feedback) in guesses {
        let (guess, feedback) = (guess.as_ref(), feedback.as_ref());
        for s in [guess, feedback] {
            if s.chars().count() != WORD_LEN {
                return Err(InputError::WrongLength(s.to_string()));
            }
        }
        let word: Word = guess.parse()?;
        let result = parse_result(&word, feedback)?;
        history.insert(word, result);
    }
    Ok(history)
}

/// Up to [`MAX_RECOMMENDATIONS`] next guesses for `guesses`, best first, using the
/// embedded dictionary and default tuning.
pub fn recommend_next_words<I, G, F>(
    guesses: I,
    hard_mode: bool,
) -> Result<Vec<(Word, f64)>, InputError>
where
    I: IntoIterator<Item = (G, F)>,
    G: AsRef<str>,
    F: AsRef<str>,
{
    let history = sanitize_history(guesses)?;
    let config = SolverConfig {
        hard_mode,
        ..SolverConfig::default()
    };
    Ok(recommend_with(
        Dictionary::embedded(),
        config,
        thread_rng(),
        &history,
    ))
}

/// Runs a fresh solver over an already sanitized history.
pub fn recommend_with<R: Rng>(
    dictionary: &Dictionary,
    config: SolverConfig,
    rng: R,
    history: &History,
) -> Vec<(Word, f64)> {
    let mut next_words = Solver::new(dictionary, config, rng).get_next_words(history);
    next_words.truncate(MAX_RECOMMENDATIONS);
    next_words
}
