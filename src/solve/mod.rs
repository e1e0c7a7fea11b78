use std::io::{stdout, Stdout};
use std::process::exit;

use crossterm::{execute, style};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use wordly::*;

use crate::ui::*;

fn print_history(stdout: &mut Stdout, history: &History) -> crossterm::Result<()> {
    if history.is_empty() {
        return execute!(stdout, style::Print("No guesses yet.\n\n"));
    }
    for (guess, result) in history {
        print_scored_word(stdout, guess, result)?;
    }
    execute!(stdout, style::Print("\n"))
}

/// Prints the best next guesses for the game described by `guesses`.
pub fn recommend(
    guesses: &[(String, String)],
    config: SolverConfig,
    rng: StdRng,
    verbose: bool,
) -> crossterm::Result<()> {
    let stdout = &mut stdout();
    let history = match sanitize_history(guesses.iter().map(|(g, f)| (g, f))) {
        Ok(history) => history,
        Err(e) => {
            print_error(stdout, &format!("Invalid guess history: {}", e))?;
            exit(1);
        }
    };

    let dictionary = Dictionary::embedded();
    print_colour_explanation(stdout)?;
    print_history(stdout, &history)?;

    let mut solver = Solver::new(dictionary, config, rng);
    let mut next_words = solver.get_next_words(&history);
    next_words.truncate(MAX_RECOMMENDATIONS);
    print_recommendations(stdout, &next_words, dictionary)?;
    if verbose {
        if let Some(stats) = solver.last_search() {
            print_search_stats(stdout, stats)?;
        }
    }

    Ok(())
}

/// Lets the solver crack `answer`, or a random dictionary word, on its own.
pub fn solve_for_answer(
    answer: Option<Word>,
    config: SolverConfig,
    mut rng: StdRng,
) -> crossterm::Result<()> {
    let stdout = &mut stdout();
    let dictionary = Dictionary::embedded();
    let answer = match answer.or_else(|| dictionary.words().choose(&mut rng).copied()) {
        Some(answer) => answer,
        None => {
            print_error(stdout, "The dictionary is empty.")?;
            exit(1);
        }
    };
    if !dictionary.contains(&answer) {
        print_error(stdout, &format!("{} is not in the dictionary.", answer))?;
        exit(1);
    }

    print_colour_explanation(stdout)?;
    let mut solver = Solver::new(dictionary, config, rng);
    let mut printed = Ok(());
    let result = run_solver(&mut solver, answer, |guess, result| {
        if printed.is_ok() {
            printed = print_scored_word(stdout, guess, result);
        }
    });
    printed?;

    match result {
        SolverResult::Answer { guess_count, .. } => print_solved_msg(stdout, guess_count),
        SolverResult::NoAnswer => print_no_answer_msg(stdout),
        SolverResult::OutOfGuesses => print_error(
            stdout,
            &format!("Gave up on {} after {} guesses.", answer, game::MAX_GUESSES),
        ),
    }
}
