use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::{simulate, CharResult, GuessResult, History, Word, WORD_LEN};

/// A set of candidate words that only ever shrinks.
///
/// One pool tracks the answers still possible, another the words still worth
/// guessing. Cloning gives a fully independent snapshot, so a search can narrow
/// hypothetical copies without touching the game's own pools.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordPool {
    words: FxHashSet<Word>,
}

impl WordPool {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> + '_ {
        self.words.iter()
    }

    /// The words in alphabetical order; a stable starting point for anything random.
    pub fn sorted(&self) -> Vec<Word> {
        self.words.iter().copied().sorted().collect_vec()
    }

    /// Removes every word that would not have produced the recorded result for
    /// each guess in `history`.
    pub fn apply_guesses(&mut self, history: &History) {
        self.words.retain(|w| is_consistent(w, history));
    }

    pub fn narrowed_by(&self, history: &History) -> WordPool {
        self.words
            .iter()
            .filter(|w| is_consistent(w, history))
            .copied()
            .collect()
    }

    /// How many words would survive [`WordPool::apply_guesses`].
    pub fn count_consistent(&self, history: &History) -> usize {
        self.words
            .iter()
            .filter(|w| is_consistent(w, history))
            .count()
    }

    /// Cheap pre-filter: drops every word containing a letter that was marked
    /// absent in `result`, wherever it appears and however often.
    ///
    /// This can remove words that are still possible answers, so it is only fit
    /// for narrowing the guesses pool.
    pub fn apply_nonmatches(&mut self, guess: &Word, result: &GuessResult) {
        let absent = guess
            .bytes()
            .iter()
            .zip(result)
            .filter(|(_, r)| **r == CharResult::Incorrect)
            .map(|(b, _)| *b)
            .collect_vec();
        if absent.is_empty() {
            return;
        }
        self.words.retain(|w| !absent.iter().any(|&b| w.contains(b)));
    }

    /// Keeps only the words a hard mode player may still guess.
    pub fn apply_hardmode_constraints(&mut self, history: &History) {
        let pattern = ReusePattern::new(history);
        self.words.retain(|w| pattern.matches(w));
    }

    /// Replaces the pool with the words of `subset` it already holds.
    pub fn remove_all_except<I: IntoIterator<Item = Word>>(&mut self, subset: I) {
        let keep: FxHashSet<Word> = subset.into_iter().collect();
        self.words.retain(|w| keep.contains(w));
    }
}

impl FromIterator<Word> for WordPool {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        WordPool {
            words: iter.into_iter().collect(),
        }
    }
}

fn is_consistent(word: &Word, history: &History) -> bool {
    history
        .iter()
        .all(|(guess, result)| simulate(guess, word) == *result)
}

/// What hard mode forces a guess to reuse: every exact letter in its place, and
/// every misplaced letter somewhere.
struct ReusePattern {
    mask: [Option<u8>; WORD_LEN],
    required_chars: Vec<u8>,
}

impl ReusePattern {
    fn new(history: &History) -> ReusePattern {
        let mut mask = [None; WORD_LEN];
        let mut required_chars = vec![];
        for (guess, result) in history {
            for (i, (&b, res)) in guess.bytes().iter().zip(result).enumerate() {
                match res {
                    CharResult::Correct => mask[i] = Some(b),
                    CharResult::CorrectChar => required_chars.push(b),
                    CharResult::Incorrect => {}
                }
            }
        }
        required_chars.sort_unstable();
        required_chars.dedup();

        ReusePattern {
            mask,
            required_chars,
        }
    }

    fn matches(&self, word: &Word) -> bool {
        word.bytes()
            .iter()
            .zip(self.mask)
            .all(|(&b, m)| m.map_or(true, |m| m == b))
            && self.required_chars.iter().all(|&b| word.contains(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mask, w};

    fn pool(words: &[&str]) -> WordPool {
        words.iter().map(|s| w(s)).collect()
    }

    fn words() -> WordPool {
        pool(&[
            "crate", "trace", "slate", "caret", "react", "grace", "blimp", "shown", "crane",
            "abbey", "geese", "creep",
        ])
    }

    #[test]
    fn apply_guesses_keeps_exactly_the_consistent_words() {
        let mut targets = words();
        let history: History = [(w("crate"), simulate(&w("crate"), &w("trace")))]
            .into_iter()
            .collect();
        targets.apply_guesses(&history);

        assert!(targets.contains(&w("trace")));
        for word in targets.iter() {
            assert_eq!(simulate(&w("crate"), word), simulate(&w("crate"), &w("trace")));
        }
        assert!(!targets.contains(&w("crate")));
        assert!(!targets.contains(&w("blimp")));
    }

    #[test]
    fn narrowing_is_idempotent_and_monotone() {
        let history: History = [
            (w("crate"), mask![W W W W M]),
            (w("shown"), mask![W W W W W]),
        ]
        .into_iter()
        .collect();

        let mut once = words();
        once.apply_guesses(&history);
        let mut twice = once.clone();
        twice.apply_guesses(&history);

        assert_eq!(once, twice);
        assert!(once.len() <= words().len());
        assert_eq!(once, words().narrowed_by(&history));
        assert_eq!(once.len(), words().count_consistent(&history));
    }

    #[test]
    fn snapshots_are_independent() {
        let canonical = words();
        let mut copy = canonical.clone();
        copy.remove_all_except([w("crate")]);

        assert_eq!(copy.len(), 1);
        assert_eq!(canonical, words());
    }

    #[test]
    fn nonmatches_drop_words_with_absent_letters() {
        let mut valids = words();
        // C and R absent, the rest not
        valids.apply_nonmatches(&w("crate"), &mask![W W C M C]);
        assert_eq!(
            valids.sorted(),
            vec![w("abbey"), w("blimp"), w("geese"), w("shown"), w("slate")]
        );
    }

    #[test]
    fn nonmatches_ignore_duplicate_nuance() {
        let mut valids = pool(&["geese", "creep", "blimp"]);
        // the trailing E of GEESE is absent even though E is in the answer
        valids.apply_nonmatches(&w("geese"), &mask![W M C W W]);
        assert_eq!(valids.sorted(), vec![w("blimp")]);
    }

    #[test]
    fn nonmatches_without_absent_letters_change_nothing() {
        let mut valids = words();
        valids.apply_nonmatches(&w("caret"), &mask![M M M M M]);
        assert_eq!(valids, words());
    }

    #[test]
    fn hardmode_requires_reuse_of_known_letters() {
        let mut valids = words();
        let history: History = [(w("crane"), mask![C W M W M])].into_iter().collect();
        valids.apply_hardmode_constraints(&history);

        for word in valids.iter() {
            assert_eq!(word.bytes()[0], b'C');
            assert!(word.contains(b'A') && word.contains(b'E'));
        }
        // an R is allowed, hard mode does not forbid absent letters
        assert_eq!(valids.sorted(), vec![w("caret"), w("crane"), w("crate")]);
    }

    #[test]
    fn remove_all_except_never_grows() {
        let mut targets = pool(&["crate", "slate"]);
        targets.remove_all_except([w("crate"), w("blimp")]);
        assert_eq!(targets.sorted(), vec![w("crate")]);
    }
}
