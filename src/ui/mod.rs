use std::io::{Stdout, Write};

use crossterm::{
    execute, queue,
    style::{self, Attribute, Color, Stylize},
};
use wordly::*;

pub const CORRECT_COL: Color = Color::Green;
pub const CORRECT_CHAR_COL: Color = Color::Yellow;
pub const INCORRECT_COL: Color = Color::DarkGrey;
pub const ERROR_COL: Color = Color::Red;

pub fn result_col(result: CharResult) -> Color {
    match result {
        CharResult::Correct => CORRECT_COL,
        CharResult::CorrectChar => CORRECT_CHAR_COL,
        CharResult::Incorrect => INCORRECT_COL,
    }
}

pub fn print_colour_explanation(stdout: &mut Stdout) -> crossterm::Result<()> {
    execute!(
        stdout,
        style::PrintStyledContent("correct".with(CORRECT_COL)),
        style::PrintStyledContent("    wrong position".with(CORRECT_CHAR_COL)),
        style::PrintStyledContent("    incorrect".with(INCORRECT_COL)),
        style::Print("\n\n"),
    )
}

/// One guess as a row of coloured letters, followed by its feedback string.
pub fn print_scored_word(
    stdout: &mut Stdout,
    guess: &Word,
    result: &GuessResult,
) -> crossterm::Result<()> {
    queue!(stdout, style::Print("  "))?;
    for (c, r) in guess.chars().zip(result) {
        let attr = if *r == CharResult::Incorrect {
            Attribute::Dim
        } else {
            Attribute::Bold
        };
        queue!(
            stdout,
            style::PrintStyledContent(format!(" {} ", c).with(result_col(*r)).attribute(attr))
        )?;
    }
    queue!(
        stdout,
        style::Print(format!("   {}\n", encode_result(guess, result)))
    )?;
    stdout.flush()
}

pub fn print_recommendations(
    stdout: &mut Stdout,
    words: &[(Word, f64)],
    dictionary: &Dictionary,
) -> crossterm::Result<()> {
    if words.is_empty() {
        return print_no_answer_msg(stdout);
    }

    queue!(stdout, style::Print("Try one of:\n"))?;
    for (i, (word, score)) in words.iter().enumerate() {
        let freq = dictionary.frequency(word).unwrap_or_default();
        let line = format!("{:>3}. {}  score {:>10.3}  frequency {:.2}\n", i + 1, word, score, freq);
        if i == 0 {
            queue!(stdout, style::PrintStyledContent(line.bold()))?;
        } else {
            queue!(stdout, style::Print(line))?;
        }
    }
    stdout.flush()
}

pub fn print_search_stats(stdout: &mut Stdout, stats: &SearchStats) -> crossterm::Result<()> {
    execute!(
        stdout,
        style::PrintStyledContent(
            format!(
                "({:?}: {} guesses x {} answers, {} pairs scored, {} kept)\n",
                stats.branch, stats.valids, stats.targets, stats.pairs_evaluated, stats.retained
            )
            .with(INCORRECT_COL)
        )
    )
}

pub fn print_error(stdout: &mut Stdout, msg: &str) -> crossterm::Result<()> {
    execute!(
        stdout,
        style::PrintStyledContent(format!("{}\n", msg).with(ERROR_COL))
    )
}

pub fn print_no_answer_msg(stdout: &mut Stdout) -> crossterm::Result<()> {
    print_error(
        stdout,
        "Something went wrong; no word fits those guesses. Check the feedback.",
    )
}

pub fn print_solved_msg(stdout: &mut Stdout, guess_count: u32) -> crossterm::Result<()> {
    execute!(
        stdout,
        style::Print(format!(
            "\nSolved in {} guess{}!\n",
            guess_count,
            if guess_count == 1 { "" } else { "es" }
        ))
    )
}
