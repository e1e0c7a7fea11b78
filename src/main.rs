use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wordly::{SolverConfig, Word};

mod solve;
mod ui;

#[derive(Parser)]
#[clap(name = "wordly")]
#[clap(about = "recommends the next wordle guess", long_about = None)]
#[clap(author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend the next guesses for a game in progress
    Recommend {
        /// Guesses made so far, as GUESS=FEEDBACK
        ///
        /// The feedback has the guessed letter where it is correct, '?' where the
        /// letter is in the word but elsewhere, and '.' where it is not in the word.
        /// For example: crate=c.?..
        #[clap(value_parser = parse_pair)]
        guesses: Vec<(String, String)>,

        /// Print what the search did
        #[clap(short, long)]
        verbose: bool,

        #[clap(flatten)]
        tuning: Tuning,
    },
    /// Watch the solver crack a wordle
    Solve {
        /// (optional) the wordle to be solved
        ///
        /// When not specified, a random dictionary word is picked
        #[clap(value_parser)]
        answer: Option<Word>,

        #[clap(flatten)]
        tuning: Tuning,
    },
}

#[derive(Args)]
struct Tuning {
    /// Only recommend guesses that reuse every revealed letter
    #[clap(long)]
    hard: bool,

    /// Seed for the random choices, for repeatable output
    #[clap(long)]
    seed: Option<u64>,

    /// Penalty exponent on the answers a guess leaves behind
    #[clap(long, default_value_t = 1.75)]
    cost_exponent: f64,

    /// Most (guess, answer) pairs scored per recommendation
    #[clap(long, default_value_t = 5000)]
    max_pool_size: usize,

    /// Guesses-to-answers ratio above which the guesses are subsampled first
    #[clap(long, default_value_t = 1.0)]
    ratio: f64,

    /// Never consider words less common than this as answers
    #[clap(long, default_value_t = 0.0)]
    min_frequency: f64,
}

impl Tuning {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            hard_mode: self.hard,
            cost_exponent: self.cost_exponent,
            max_pool_size: self.max_pool_size,
            guess_target_ratio: self.ratio,
            min_target_frequency: self.min_frequency,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(g, f)| (g.trim().to_string(), f.trim().to_string()))
        .ok_or_else(|| format!("expected GUESS=FEEDBACK, got '{}'", s))
}

fn main() -> crossterm::Result<()> {
    env_logger::init();

    let args = Cli::parse();
    match &args.command {
        Commands::Recommend {
            guesses,
            verbose,
            tuning,
        } => solve::recommend(guesses, tuning.config(), tuning.rng(), *verbose)?,
        Commands::Solve { answer, tuning } => {
            solve::solve_for_answer(*answer, tuning.config(), tuning.rng())?
        }
    }

    Ok(())
}
