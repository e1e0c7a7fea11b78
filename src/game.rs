use rand::Rng;

use crate::{is_solved, GuessResult, History, Solver, Word, Wordle};

/// Real games stop at six guesses; self-play goes on so the tail of the score
/// distribution stays visible.
pub const MAX_GUESSES: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    Answer { word: Word, guess_count: u32 },
    /// The solver ran out of candidates, so the answer is not among its targets.
    NoAnswer,
    OutOfGuesses,
}

/// Plays a whole game against `answer`, always taking the solver's top pick.
///
/// `on_guess` sees every guess and its result as it is made.
pub fn run_solver<R, F>(solver: &mut Solver<'_, R>, answer: Word, mut on_guess: F) -> SolverResult
where
    R: Rng,
    F: FnMut(&Word, &GuessResult),
{
    let wordle = Wordle::new(answer);
    let mut history = History::new();
    for guess_count in 1..=MAX_GUESSES {
        let guess = match solver.get_next_words(&history).first() {
            Some((word, _)) => *word,
            None => return SolverResult::NoAnswer,
        };
        let result = wordle.check(&guess);
        on_guess(&guess, &result);
        if is_solved(&result) {
            return SolverResult::Answer {
                word: guess,
                guess_count,
            };
        }
        history.insert(guess, result);
    }
    SolverResult::OutOfGuesses
}
