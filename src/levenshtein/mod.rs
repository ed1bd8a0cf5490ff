/*!
Automata accepting every string within a bounded edit distance of a word.

[`LevenshteinAutomata`] builds deterministic automata for edit distances of
up to two, optionally counting the transposition of two adjacent characters
as a single edit (the "optimal string alignment" distance). Construction is
linear in the length of the word: rather than determinizing anything, states
are read off the precomputed parametric tables in [`ParametricDescription`].

# Example

```
use term_automata::{levenshtein::LevenshteinAutomata, operations};

let lev = LevenshteinAutomata::new("kitten", false);
let a = lev.to_automaton(2).unwrap();
assert!(operations::run(&a, "sitten"));
assert!(operations::run(&a, "sittin"));
assert!(!operations::run(&a, "sitting"));
```
*/

use crate::{
    automata,
    automaton::{Automaton, MAX_CODE_POINT},
};

pub use self::parametric::{unpack, ParametricDescription};

mod parametric;
mod tables;

/// The largest supported edit distance.
pub const MAXIMUM_SUPPORTED_DISTANCE: u32 = 2;

/// A builder of Levenshtein automata for one word.
#[derive(Clone, Debug)]
pub struct LevenshteinAutomata {
    word: Vec<u32>,
    /// The distinct characters of the word, ascending.
    alphabet: Vec<u32>,
    /// The ranges of characters up to the maximum label that are not in
    /// the word.
    ranges: Vec<(u32, u32)>,
    transpositions: bool,
}

impl LevenshteinAutomata {
    /// Creates a builder for the codepoints of `word`.
    pub fn new(word: &str, transpositions: bool) -> LevenshteinAutomata {
        let word: Vec<u32> = word.chars().map(|c| c as u32).collect();
        LevenshteinAutomata::with_alpha_max(&word, MAX_CODE_POINT, transpositions)
    }

    /// Creates a builder for a word of arbitrary labels, where no label
    /// exceeds `alpha_max`.
    ///
    /// # Panics
    ///
    /// When a label of `word` is greater than `alpha_max`.
    pub fn with_alpha_max(
        word: &[u32],
        alpha_max: u32,
        transpositions: bool,
    ) -> LevenshteinAutomata {
        let mut alphabet = word.to_vec();
        alphabet.sort_unstable();
        alphabet.dedup();
        if let Some(&max) = alphabet.last() {
            assert!(
                max <= alpha_max,
                "alpha_max exceeded by symbol {} in word",
                max
            );
        }
        let mut ranges = vec![];
        let mut lower = 0;
        for &c in alphabet.iter() {
            if c > lower {
                ranges.push((lower, c - 1));
            }
            lower = c + 1;
        }
        if lower <= alpha_max {
            ranges.push((lower, alpha_max));
        }
        LevenshteinAutomata {
            word: word.to_vec(),
            alphabet,
            ranges,
            transpositions,
        }
    }

    /// Returns a deterministic automaton accepting every string within `n`
    /// edits of the word, or `None` if `n` is greater than
    /// [`MAXIMUM_SUPPORTED_DISTANCE`].
    pub fn to_automaton(&self, n: u32) -> Option<Automaton> {
        self.to_automaton_with_prefix(n, "")
    }

    /// Like [`LevenshteinAutomata::to_automaton`], but every accepted string
    /// also starts with `prefix`, which is matched exactly.
    ///
    /// The result may contain states that are not reachable from the
    /// initial state.
    pub fn to_automaton_with_prefix(
        &self,
        n: u32,
        prefix: &str,
    ) -> Option<Automaton> {
        if n == 0 {
            let mut labels: Vec<u32> = prefix.chars().map(|c| c as u32).collect();
            labels.extend_from_slice(&self.word);
            return Some(automata::make_labels(&labels));
        }
        if n > MAXIMUM_SUPPORTED_DISTANCE {
            return None;
        }
        let description =
            ParametricDescription::new(self.word.len(), n, self.transpositions);
        let range = 2 * n as usize + 1;

        let mut a = Automaton::new();
        let mut last = a.create_state();
        for c in prefix.chars() {
            let state = a.create_state();
            a.add_transition_label(last, state, c as u32);
            last = state;
        }
        let base = last;
        a.set_accept(base, description.is_accept(0));
        for k in 1..description.size() {
            let state = a.create_state();
            a.set_accept(state, description.is_accept(k));
        }

        for k in 0..description.size() {
            let pos = description.position(k);
            let end = pos + (self.word.len() - pos).min(range);
            for &c in self.alphabet.iter() {
                let vector = self.vector(c, pos, end);
                if let Some(dest) = description.transition(k, pos, vector) {
                    a.add_transition_label(base + k, base + dest, c);
                }
            }
            // Characters outside the word never match, so their vector is 0.
            if let Some(dest) = description.transition(k, pos, 0) {
                for &(min, max) in self.ranges.iter() {
                    a.add_transition(base + k, base + dest, min, max);
                }
            }
        }
        a.finish_state();
        debug_assert!(a.is_deterministic());
        Some(a)
    }

    /// Returns the characteristic vector of `c` over `word[pos..end]`, with
    /// `word[pos]` in the most significant bit.
    fn vector(&self, c: u32, pos: usize, end: usize) -> u32 {
        self.word[pos..end]
            .iter()
            .fold(0, |vector, &w| (vector << 1) | (w == c) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations;

    /// The optimal string alignment distance, or the plain Levenshtein
    /// distance without transpositions.
    fn distance(a: &[u32], b: &[u32], transpositions: bool) -> usize {
        let (n, m) = (a.len(), b.len());
        let mut d = vec![vec![0; m + 1]; n + 1];
        for i in 0..=n {
            d[i][0] = i;
        }
        for j in 0..=m {
            d[0][j] = j;
        }
        for i in 1..=n {
            for j in 1..=m {
                let cost = (a[i - 1] != b[j - 1]) as usize;
                d[i][j] = (d[i - 1][j] + 1)
                    .min(d[i][j - 1] + 1)
                    .min(d[i - 1][j - 1] + cost);
                if transpositions
                    && i > 1
                    && j > 1
                    && a[i - 1] == b[j - 2]
                    && a[i - 2] == b[j - 1]
                {
                    d[i][j] = d[i][j].min(d[i - 2][j - 2] + 1);
                }
            }
        }
        d[n][m]
    }

    fn strings(alphabet: &[u32], max_len: usize) -> Vec<Vec<u32>> {
        let mut all = vec![vec![]];
        let mut start = 0;
        for _ in 0..max_len {
            let end = all.len();
            for i in start..end {
                for &c in alphabet {
                    let mut s = all[i].clone();
                    s.push(c);
                    all.push(s);
                }
            }
            start = end;
        }
        all
    }

    fn labels(s: &str) -> Vec<u32> {
        s.chars().map(|c| c as u32).collect()
    }

    fn check_word(word: &str) {
        let w = labels(word);
        // One character outside the word exercises the gap ranges.
        let mut alphabet = w.clone();
        alphabet.push('x' as u32);
        alphabet.sort_unstable();
        alphabet.dedup();
        let inputs = strings(&alphabet, w.len() + 2);
        for &transpositions in &[false, true] {
            let lev = LevenshteinAutomata::new(word, transpositions);
            for n in 0..=2 {
                let a = lev.to_automaton(n).unwrap();
                assert!(a.is_deterministic());
                for s in inputs.iter() {
                    let expected = distance(&w, s, transpositions) <= n as usize;
                    assert_eq!(
                        expected,
                        operations::run_labels(&a, s),
                        "word {:?}, input {:?}, n = {}, transpositions = {}",
                        word,
                        s,
                        n,
                        transpositions,
                    );
                }
            }
        }
    }

    #[test]
    fn agrees_with_brute_force() {
        for word in ["", "a", "ab", "aab", "abc", "abab", "abcba"] {
            check_word(word);
        }
    }

    #[test]
    fn transposition_is_one_edit() {
        let lev = LevenshteinAutomata::new("abcd", true);
        let a = lev.to_automaton(1).unwrap();
        assert!(operations::run(&a, "bacd"));
        assert!(operations::run(&a, "abdc"));
        assert!(!operations::run(&a, "badc"));
        let lev = LevenshteinAutomata::new("abcd", false);
        let a = lev.to_automaton(1).unwrap();
        assert!(!operations::run(&a, "bacd"));
    }

    #[test]
    fn prefix() {
        let lev = LevenshteinAutomata::new("bar", false);
        let a = lev.to_automaton_with_prefix(1, "foo").unwrap();
        assert!(operations::run(&a, "foobar"));
        assert!(operations::run(&a, "foobat"));
        assert!(operations::run(&a, "fooba"));
        assert!(!operations::run(&a, "fobar"));
        assert!(!operations::run(&a, "bar"));
        let a = lev.to_automaton_with_prefix(0, "foo").unwrap();
        assert!(operations::run(&a, "foobar"));
        assert!(!operations::run(&a, "foobat"));
    }

    #[test]
    fn unsupported_distance() {
        let lev = LevenshteinAutomata::new("foo", true);
        assert!(lev.to_automaton(3).is_none());
    }

    #[test]
    fn supplementary_characters() {
        let lev = LevenshteinAutomata::new("𝛃𝛄", false);
        let a = lev.to_automaton(1).unwrap();
        assert!(operations::run(&a, "𝛃"));
        assert!(operations::run(&a, "𝛃\u{10FFFF}"));
        assert!(!operations::run(&a, "xx"));
    }

    #[test]
    fn alpha_max() {
        let word = [1, 2, 3];
        let lev = LevenshteinAutomata::with_alpha_max(&word, 255, false);
        let a = lev.to_automaton(1).unwrap();
        assert!(operations::run_labels(&a, &[1, 2, 255]));
        assert!(!operations::run_labels(&a, &[1, 2, 256]));
    }

    #[test]
    #[should_panic(expected = "alpha_max exceeded")]
    fn alpha_max_exceeded() {
        LevenshteinAutomata::with_alpha_max(&[300], 255, false);
    }
}
