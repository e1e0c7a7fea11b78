use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use wordly::*;

#[derive(Parser)]
#[clap(name = "stats")]
#[clap(about = "offline analysis of the wordly solver", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every word as an opening guess; the top of this list is openers.txt
    Openers {
        #[clap(long, default_value_t = 20)]
        top: usize,
    },
    /// Let the solver play many games and report how many guesses they took
    Games {
        /// How many answers to play, picked at random from the dictionary
        #[clap(long, default_value_t = 200)]
        sample: usize,
        #[clap(long)]
        hard: bool,
        #[clap(long, default_value_t = 0)]
        seed: u64,
    },
}

/// Expected number of answers left after opening with `guess`.
fn expected_remaining(guess: &Word, answers: &[Word]) -> f64 {
    let buckets = answers.iter().map(|a| simulate(guess, a)).counts();
    let sum: usize = buckets.values().map(|n| n * n).sum();
    sum as f64 / answers.len() as f64
}

fn rank_openers(dictionary: &Dictionary, top: usize) {
    let answers = dictionary.targets(0.0).sorted();
    let scores = dictionary
        .words()
        .par_iter()
        .map(|guess| (guess, expected_remaining(guess, &answers)))
        .collect::<Vec<_>>();

    for (i, (guess, n)) in scores
        .into_iter()
        .sorted_by(|(_, a), (_, b)| a.total_cmp(b))
        .take(top)
        .enumerate()
    {
        println!(
            "opener #{}: {} ({:.2} expected answers afterwards)",
            i + 1,
            guess,
            n
        );
    }
}

fn play_games(dictionary: &Dictionary, sample: usize, hard: bool, seed: u64) {
    let mut answers = dictionary.words().to_vec();
    answers.shuffle(&mut StdRng::seed_from_u64(seed));
    answers.truncate(sample);

    let config = SolverConfig {
        hard_mode: hard,
        ..SolverConfig::default()
    };
    let results = answers
        .par_iter()
        .enumerate()
        .map(|(i, answer)| {
            let rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let mut solver = Solver::new(dictionary, config.clone(), rng);
            (answer, run_solver(&mut solver, *answer, |_, _| {}))
        })
        .collect::<Vec<_>>();

    let mut distribution = BTreeMap::new();
    let mut failures = vec![];
    for (answer, result) in &results {
        match result {
            SolverResult::Answer { guess_count, .. } => {
                *distribution.entry(*guess_count).or_insert(0usize) += 1
            }
            _ => failures.push(answer),
        }
    }

    let solved: usize = distribution.values().sum();
    let total: u32 = distribution.iter().map(|(g, n)| g * *n as u32).sum();
    for (guesses, n) in &distribution {
        println!("{:>2} guesses: {:>5} {}", guesses, n, "#".repeat(n * 60 / solved.max(1)));
    }
    if solved > 0 {
        println!("\naverage {:.3} guesses over {} games", total as f64 / solved as f64, solved);
    }
    if !failures.is_empty() {
        println!("failed on {}", failures.iter().join(", "));
    }
}

fn main() {
    env_logger::init();

    let args = Cli::parse();
    let dictionary = Dictionary::embedded();
    match args.command {
        Commands::Openers { top } => rank_openers(dictionary, top),
        Commands::Games { sample, hard, seed } => play_games(dictionary, sample, hard, seed),
    }
}
