//! Picks the next guess.
//!
//! A full game tree search is far too slow for interactive use, so the solver
//! scores guesses against the remaining answers on a bounded sample of both
//! pools, and prunes any guess as soon as it is known to be worse than the best
//! one found so far.

use std::time::Instant;

use log::{debug, trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::{simulate, Dictionary, GuessResult, History, Word, WordPool};

/// Over-constraining the guess pool leads to dumb guesses.
pub const PREFILTER_FLOOR: usize = 50;
/// Subsampling never shrinks a pool below this many words.
pub const SUBSAMPLE_FLOOR: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub hard_mode: bool,
    /// Exponent applied to the number of answers a guess leaves behind. Above 1,
    /// guesses that sometimes leave a large pool are penalised.
    pub cost_exponent: f64,
    /// Upper bound on the number of (guess, answer) pairs scored per call.
    pub max_pool_size: usize,
    /// How much larger the guesses pool may be than the answers pool before the
    /// guesses pool is the one that gets subsampled.
    pub guess_target_ratio: f64,
    /// Words less common than this are never considered as answers.
    pub min_target_frequency: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            hard_mode: false,
            cost_exponent: 1.75,
            max_pool_size: 5000,
            guess_target_ratio: 1.0,
            min_target_frequency: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Opening,
    FewTargets,
    Search,
}

/// What the most recent call to [`Solver::get_next_words`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStats {
    pub branch: Branch,
    /// Size of the guesses pool that was scored.
    pub valids: usize,
    /// Size of the answers pool the guesses were scored against.
    pub targets: usize,
    pub pairs_evaluated: usize,
    pub retained: usize,
}

pub struct Solver<'d, R> {
    dictionary: &'d Dictionary,
    config: SolverConfig,
    targets: WordPool,
    valids: WordPool,
    rng: R,
    last_search: Option<SearchStats>,
}

impl<'d, R: Rng> Solver<'d, R> {
    pub fn new(dictionary: &'d Dictionary, config: SolverConfig, rng: R) -> Solver<'d, R> {
        Solver {
            targets: dictionary.targets(config.min_target_frequency),
            valids: dictionary.valids(),
            dictionary,
            config,
            rng,
            last_search: None,
        }
    }

    /// The answers still possible after the last call.
    pub fn targets(&self) -> &WordPool {
        &self.targets
    }

    /// The words that may still be guessed after the last call.
    pub fn valids(&self) -> &WordPool {
        &self.valids
    }

    pub fn last_search(&self) -> Option<&SearchStats> {
        self.last_search.as_ref()
    }

    /// Good next guesses and their scores, best (lowest) first.
    ///
    /// A score estimates the work left after the guess. An empty list means the
    /// history rules out every answer.
    pub fn get_next_words(&mut self, history: &History) -> Vec<(Word, f64)> {
        // the best opener is the same every game, so it is looked up, not searched for
        if history.is_empty() {
            let mut openers = self.dictionary.openers().to_vec();
            openers.shuffle(&mut self.rng);
            self.record(Branch::Opening, 0, 0, 0, openers.len());
            return openers.into_iter().map(|w| (w, 1.0)).collect();
        }

        self.targets.apply_guesses(history);
        if self.config.hard_mode {
            self.valids.apply_hardmode_constraints(history);
        }

        if self.targets.is_empty() {
            warn!("no answer is consistent with {} guesses", history.len());
            self.record(Branch::FewTargets, self.valids.len(), 0, 0, 0);
            return vec![];
        }

        // with one or two answers left, guessing one of them beats any guess that
        // merely tells them apart
        if self.targets.len() <= 2 {
            let remaining = self.targets.sorted();
            let pick = remaining.choose(&mut self.rng).copied();
            self.record(Branch::FewTargets, self.valids.len(), remaining.len(), 0, 1);
            return pick.into_iter().map(|w| (w, 1.0)).collect();
        }

        let (valids, targets) = self.bounded_pools(history);
        self.search(history, &valids, &targets)
    }

    /// Snapshots of the current pools, shrunk until scoring every pair of them
    /// fits in `max_pool_size`.
    fn bounded_pools(&mut self, history: &History) -> (WordPool, WordPool) {
        let max = self.config.max_pool_size;
        let mut valids = self.valids.clone();
        let mut targets = self.targets.clone();
        debug!(
            "{} guesses against {} targets, budget {}",
            valids.len(),
            targets.len(),
            max
        );

        // dropping guesses with known-absent letters favours guessing new letters
        if valids.len() * targets.len() > max {
            let mut pairs: Vec<(&Word, &GuessResult)> = history.iter().collect();
            pairs.shuffle(&mut self.rng);
            for (guess, result) in pairs {
                if valids.len() * targets.len() <= max {
                    break;
                }
                let before = valids.clone();
                valids.apply_nonmatches(guess, result);
                if valids.len() < PREFILTER_FLOOR {
                    debug!("nonmatches of {} leave {} guesses, undone", guess, valids.len());
                    valids = before;
                } else {
                    debug!("nonmatches of {} leave {} guesses", guess, valids.len());
                }
            }
        }

        while valids.len() * targets.len() > max {
            let shrink_valids =
                valids.len() as f64 >= targets.len() as f64 * self.config.guess_target_ratio;
            let shrunk = if shrink_valids {
                self.subsample(&mut valids) || self.subsample(&mut targets)
            } else {
                self.subsample(&mut targets) || self.subsample(&mut valids)
            };
            if !shrunk {
                debug!("cannot subsample below {} pairs", valids.len() * targets.len());
                break;
            }
        }

        (valids, targets)
    }

    /// Keeps a random half of `pool`, or [`SUBSAMPLE_FLOOR`] words if that is more.
    /// Returns whether anything was removed.
    fn subsample(&mut self, pool: &mut WordPool) -> bool {
        let before = pool.len();
        let keep = (before / 2).max(SUBSAMPLE_FLOOR).min(before);
        let sample = pool
            .sorted()
            .choose_multiple(&mut self.rng, keep)
            .copied()
            .collect::<Vec<_>>();
        pool.remove_all_except(sample);
        pool.len() < before
    }

    /// Scores every guess in `valids` against every answer in `targets`.
    fn search(
        &mut self,
        history: &History,
        valids: &WordPool,
        targets: &WordPool,
    ) -> Vec<(Word, f64)> {
        let start = Instant::now();
        let exp = self.config.cost_exponent;

        // the order matters: it decides which guesses get pruned
        let mut guesses = valids.sorted();
        guesses.shuffle(&mut self.rng);
        let answers = targets.sorted();

        let mut best = f64::INFINITY;
        let mut scores = vec![];
        let mut pairs_evaluated = 0;
        for guess in guesses {
            let mut score = 0.0;
            // answers giving the same result leave the same pool behind
            let mut left_by_result: FxHashMap<GuessResult, usize> = FxHashMap::default();
            for answer in &answers {
                pairs_evaluated += 1;
                let result = simulate(&guess, answer);
                let n_left = *left_by_result
                    .entry(result)
                    .or_insert_with(|| targets.count_consistent(&history.merged_with(guess, result)));
                score += (n_left as f64).powf(exp);
                if score > best {
                    trace!("pruned {} at {:.3}", guess, score);
                    break;
                }
            }
            if score < best {
                best = score;
                scores.push((guess, round_score(score)));
            }
        }

        scores.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        debug!(
            "scored {} pairs ({} guesses x {} targets) in {:?}, kept {}",
            pairs_evaluated,
            valids.len(),
            targets.len(),
            start.elapsed(),
            scores.len()
        );
        self.record(
            Branch::Search,
            valids.len(),
            targets.len(),
            pairs_evaluated,
            scores.len(),
        );
        scores
    }

    fn record(
        &mut self,
        branch: Branch,
        valids: usize,
        targets: usize,
        pairs_evaluated: usize,
        retained: usize,
    ) {
        self.last_search = Some(SearchStats {
            branch,
            valids,
            targets,
            pairs_evaluated,
            retained,
        });
    }
}

fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mask, w};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dictionary(words: &[&str], openers: &[&str]) -> Dictionary {
        Dictionary::new(
            words.iter().map(|s| (w(s), 1.0)),
            openers.iter().map(|s| w(s)).collect(),
        )
        .unwrap()
    }

    fn solver(dict: &Dictionary, config: SolverConfig) -> Solver<'_, StdRng> {
        Solver::new(dict, config, StdRng::seed_from_u64(7))
    }

    #[test]
    fn opening_words_are_looked_up() {
        let dict = dictionary(&["crate", "slate", "blimp"], &["crate", "slate"]);
        let mut solver = solver(&dict, SolverConfig::default());
        let mut next = solver.get_next_words(&History::new());
        next.sort_by_key(|(w, _)| *w);

        assert_eq!(next, vec![(w("crate"), 1.0), (w("slate"), 1.0)]);
        assert_eq!(solver.last_search().unwrap().branch, Branch::Opening);
        assert_eq!(solver.targets().len(), 3);
    }

    #[test]
    fn two_targets_left_guesses_one_of_them() {
        let dict = dictionary(&["crate", "grate", "slate", "blimp", "shown"], &[]);
        let history: History = [(w("blimp"), mask![W W W W W]), (w("shown"), mask![W W W W W])]
            .into_iter()
            .collect();
        // BLIMP rules out SLATE
        let mut solver = solver(&dict, SolverConfig::default());
        let next = solver.get_next_words(&history);

        assert_eq!(next.len(), 1);
        assert!([w("crate"), w("grate")].contains(&next[0].0));
        assert_eq!(next[0].1, 1.0);
        assert_eq!(solver.last_search().unwrap().branch, Branch::FewTargets);
    }

    #[test]
    fn contradictory_history_recommends_nothing() {
        let dict = dictionary(&["crate", "slate", "blimp"], &[]);
        let history: History = [(w("crate"), mask![C C C C W])].into_iter().collect();
        let mut solver = solver(&dict, SolverConfig::default());

        assert!(solver.get_next_words(&history).is_empty());
        assert!(solver.targets().is_empty());
    }

    #[test]
    fn splitting_guess_beats_uninformative_guess() {
        // FJORD tells nothing about these answers, CRATE sets them all apart
        let dict = dictionary(
            &["crate", "fjord", "bathe", "lathe", "caste", "grate", "blimp"],
            &[],
        );
        let history: History = [(w("blimp"), mask![W W W W W])].into_iter().collect();
        for seed in 0..20 {
            let mut solver = Solver::new(&dict, SolverConfig::default(), StdRng::seed_from_u64(seed));
            solver.valids.remove_all_except([w("crate"), w("fjord")]);
            let next = solver.get_next_words(&history);

            assert_eq!(next[0].0, w("crate"));
            if let Some((_, fjord)) = next.iter().find(|(g, _)| *g == w("fjord")) {
                assert!(*fjord > next[0].1);
            }
        }
    }

    #[test]
    fn scores_are_ascending_and_strictly_improving() {
        let dict = Dictionary::embedded();
        let history: History = [(w("slate"), mask![W W M W M])].into_iter().collect();
        let mut solver = solver(dict, SolverConfig::default());
        let next = solver.get_next_words(&history);

        assert!(!next.is_empty());
        assert!(next.windows(2).all(|p| p[0].1 <= p[1].1));
    }

    #[test]
    fn search_stays_within_budget() {
        let dict = Dictionary::embedded();
        let history: History = [(w("crane"), mask![W W W W W])].into_iter().collect();
        for max_pool_size in [200, 1000, 5000] {
            let config = SolverConfig {
                max_pool_size,
                ..SolverConfig::default()
            };
            let mut solver = solver(dict, config);
            solver.get_next_words(&history);

            let stats = solver.last_search().unwrap();
            assert_eq!(stats.branch, Branch::Search);
            assert!(stats.valids * stats.targets <= max_pool_size);
            assert!(stats.pairs_evaluated <= max_pool_size);
        }
    }

    #[test]
    fn hard_mode_narrows_guesses() {
        let dict = Dictionary::embedded();
        let history: History = [(w("crane"), mask![C W M W W])].into_iter().collect();
        let config = SolverConfig {
            hard_mode: true,
            ..SolverConfig::default()
        };
        let mut solver = solver(dict, config);
        let next = solver.get_next_words(&history);

        assert!(solver.valids().len() < dict.len());
        for (word, _) in next {
            assert_eq!(word.bytes()[0], b'C');
            assert!(word.contains(b'A'));
        }
    }

    #[test]
    fn same_seed_same_recommendations() {
        let dict = Dictionary::embedded();
        let history: History = [(w("stare"), mask![W M W W W])].into_iter().collect();
        let a = solver(dict, SolverConfig::default()).get_next_words(&history);
        let b = solver(dict, SolverConfig::default()).get_next_words(&history);
        assert_eq!(a, b);
    }

    #[test]
    fn subsampling_stops_at_the_floor() {
        let dict = Dictionary::embedded();
        let history: History = [(w("crane"), mask![W W W W W])].into_iter().collect();
        let config = SolverConfig {
            max_pool_size: 10,
            ..SolverConfig::default()
        };
        let mut solver = solver(dict, config);
        let next = solver.get_next_words(&history);

        let stats = solver.last_search().unwrap();
        assert_eq!(stats.valids, SUBSAMPLE_FLOOR);
        assert_eq!(stats.targets, SUBSAMPLE_FLOOR);
        assert!(!next.is_empty());
    }

    fn without_letters_of(dict: &Dictionary, guess: &str) -> WordPool {
        let mut pool = dict.valids();
        pool.apply_nonmatches(&w(guess), &mask![W W W W W]);
        pool
    }

    #[test]
    fn prefilter_keeps_guesses_without_absent_letters() {
        let dict = Dictionary::embedded();
        let history: History = [(w("crane"), mask![W W W W W])].into_iter().collect();
        let config = SolverConfig {
            max_pool_size: 128 * dict.len(),
            ..SolverConfig::default()
        };
        let mut solver = solver(dict, config);
        let (valids, targets) = solver.bounded_pools(&history);

        assert_eq!(valids.len(), 128);
        assert_eq!(valids, without_letters_of(dict, "crane"));
        assert_eq!(targets.len(), dict.len());
    }

    #[test]
    fn prefilter_step_below_floor_is_undone() {
        // either guess alone leaves over a hundred words, both together a handful
        let dict = Dictionary::embedded();
        let history: History = [
            (w("crane"), mask![W W W W W]),
            (w("pilot"), mask![W W W W W]),
        ]
        .into_iter()
        .collect();
        let crane = without_letters_of(dict, "crane");
        let pilot = without_letters_of(dict, "pilot");
        let mut both = crane.clone();
        both.apply_nonmatches(&w("pilot"), &mask![W W W W W]);
        assert!(both.len() < PREFILTER_FLOOR);

        for seed in 0..10 {
            let config = SolverConfig {
                max_pool_size: 50_000,
                guess_target_ratio: 1e9,
                ..SolverConfig::default()
            };
            let mut solver = Solver::new(dict, config, StdRng::seed_from_u64(seed));
            let (valids, targets) = solver.bounded_pools(&history);

            assert!(valids == crane || valids == pilot);
            assert!(valids.len() * targets.len() <= 50_000);
        }
    }

    #[test]
    fn ratio_decides_which_pool_is_subsampled() {
        let dict = Dictionary::embedded();
        let history: History = [(w("crane"), mask![W W W W W])].into_iter().collect();
        let pool_sizes = |guess_target_ratio| {
            let config = SolverConfig {
                max_pool_size: 3000,
                guess_target_ratio,
                ..SolverConfig::default()
            };
            let mut solver = solver(dict, config);
            solver.targets.apply_guesses(&history);
            let (valids, targets) = solver.bounded_pools(&history);
            (valids.len(), targets.len())
        };

        // both pools start at 128 words once CRANE's letters are gone
        assert_eq!(pool_sizes(1.0), (32, 64));
        assert_eq!(pool_sizes(100.0), (128, 16));
    }
}
