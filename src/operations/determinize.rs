use std::collections::VecDeque;

use crate::{
    automaton::{self, Automaton},
    operations::TooComplexToDeterminize,
    util::{
        fnv,
        int_set::{FrozenIntSet, StateSet},
    },
};

/// Determinizes the given automaton using subset construction.
///
/// Each state of the result corresponds to a set of states of `a`. The
/// transitions of a subset are computed by sweeping over the sorted label
/// points at which the transitions of its members begin and end, so that
/// the cost is proportional to the number of transitions rather than the
/// size of the alphabet.
///
/// Work is tracked with an effort counter: the sum of the sizes of every
/// subset processed. If the counter reaches `10 * work_limit`, this gives
/// up and returns an error.
///
/// An automaton that is already deterministic, or that has at most one
/// state, is returned unchanged.
pub fn determinize(
    a: &Automaton,
    work_limit: usize,
) -> Result<Automaton, TooComplexToDeterminize> {
    if a.is_deterministic() || a.num_states() <= 1 {
        return Ok(a.clone());
    }
    let dfa = Determinizer::new(a, work_limit).build()?;
    debug!(
        "determinized automaton: {} NFA states -> {} DFA states",
        a.num_states(),
        dfa.num_states()
    );
    Ok(dfa)
}

/// A label point at which an NFA transition either begins or ends.
///
/// Points are sorted by label, with ends ordered before starts at the same
/// label, so that a transition ending at `p - 1` leaves the subset before a
/// transition starting at `p` enters it. Labels are widened so that the
/// end of a range reaching `u32::MAX` has a point of its own.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct Point {
    label: u64,
    kind: PointKind,
    dest: usize,
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum PointKind {
    End,
    Start,
}

struct Determinizer<'a> {
    /// The NFA we're converting into a DFA.
    nfa: &'a Automaton,
    /// The DFA being built. Its transitions are discovered one subset at a
    /// time but are not sorted, so we record them in a builder.
    builder: automaton::Builder,
    /// Maps every subset seen so far to its DFA state.
    cache: fnv::HashMap<FrozenIntSet, usize>,
    /// Subsets whose transitions have not been computed yet.
    worklist: VecDeque<(FrozenIntSet, usize)>,
    /// Scratch space for the label points of the current subset.
    points: Vec<Point>,
    effort_limit: usize,
    limit: usize,
}

impl<'a> Determinizer<'a> {
    fn new(nfa: &'a Automaton, limit: usize) -> Determinizer<'a> {
        Determinizer {
            nfa,
            builder: automaton::Builder::new(),
            cache: fnv::new_map(),
            worklist: VecDeque::new(),
            points: vec![],
            effort_limit: limit.saturating_mul(10),
            limit,
        }
    }

    fn build(mut self) -> Result<Automaton, TooComplexToDeterminize> {
        let start = FrozenIntSet::from_sorted(vec![0]);
        let id = self.builder.create_state();
        self.builder.set_accept(id, self.nfa.is_accept(0));
        self.cache.insert(start.clone(), id);
        self.worklist.push_back((start, id));

        let mut effort = 0usize;
        let mut set = StateSet::new();
        while let Some((subset, from)) = self.worklist.pop_front() {
            effort += subset.len();
            if effort >= self.effort_limit {
                debug!(
                    "determinization exceeded effort limit {} after {} \
                     DFA states",
                    self.effort_limit,
                    self.builder.num_states()
                );
                return Err(TooComplexToDeterminize::new(
                    self.nfa, self.limit,
                ));
            }
            self.collect_points(&subset);
            self.sweep(from, &mut set);
            debug_assert!(set.is_empty());
        }
        Ok(self.builder.finish())
    }

    fn collect_points(&mut self, subset: &FrozenIntSet) {
        self.points.clear();
        for &s in subset.values() {
            for e in self.nfa.edges(s) {
                self.points.push(Point {
                    label: u64::from(e.min),
                    kind: PointKind::Start,
                    dest: e.dest,
                });
                self.points.push(Point {
                    label: u64::from(e.max) + 1,
                    kind: PointKind::End,
                    dest: e.dest,
                });
            }
        }
        self.points.sort_unstable();
    }

    /// Walks the sorted points of the current subset, emitting one DFA
    /// transition for every label interval over which the set of reachable
    /// NFA states is constant and non-empty.
    fn sweep(&mut self, from: usize, set: &mut StateSet) {
        let mut accept_count = 0usize;
        let mut last_label = 0u64;
        let mut i = 0;
        while i < self.points.len() {
            let label = self.points[i].label;
            if !set.is_empty() {
                let key = set.freeze();
                let to = match self.cache.get(&key) {
                    Some(&to) => to,
                    None => {
                        let to = self.builder.create_state();
                        self.builder.set_accept(to, accept_count > 0);
                        self.cache.insert(key.clone(), to);
                        self.worklist.push_back((key, to));
                        to
                    }
                };
                self.builder.add_transition(
                    from,
                    to,
                    last_label as u32,
                    (label - 1) as u32,
                );
            }
            while i < self.points.len() && self.points[i].label == label {
                let p = self.points[i];
                let accept = self.nfa.is_accept(p.dest) as usize;
                match p.kind {
                    PointKind::End => {
                        set.decr(p.dest);
                        accept_count -= accept;
                    }
                    PointKind::Start => {
                        set.incr(p.dest);
                        accept_count += accept;
                    }
                }
                i += 1;
            }
            last_label = label;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds a small NFA for (a|ab)c over two overlapping paths.
    fn nfa() -> Automaton {
        let mut a = Automaton::new();
        let s0 = a.create_state();
        let s1 = a.create_state();
        let s2 = a.create_state();
        let s3 = a.create_state();
        let s4 = a.create_state();
        a.set_accept(s4, true);
        a.add_transition_label(s0, s1, 'a' as u32);
        a.add_transition_label(s0, s2, 'a' as u32);
        a.add_transition_label(s1, s4, 'c' as u32);
        a.add_transition_label(s2, s3, 'b' as u32);
        a.add_transition_label(s3, s4, 'c' as u32);
        a.finish_state();
        a
    }

    fn accepts(a: &Automaton, s: &str) -> bool {
        let mut state = 0;
        for c in s.chars() {
            match a.step(state, c as u32) {
                None => return false,
                Some(next) => state = next,
            }
        }
        a.is_accept(state)
    }

    #[test]
    fn subset_construction() {
        let nfa = nfa();
        assert!(!nfa.is_deterministic());
        let dfa = determinize(&nfa, 10_000).unwrap();
        assert!(dfa.is_deterministic());
        assert!(accepts(&dfa, "ac"));
        assert!(accepts(&dfa, "abc"));
        assert!(!accepts(&dfa, "a"));
        assert!(!accepts(&dfa, "ab"));
        assert!(!accepts(&dfa, "abbc"));
    }

    #[test]
    fn overlapping_ranges_split() {
        let mut a = Automaton::new();
        let s0 = a.create_state();
        let s1 = a.create_state();
        let s2 = a.create_state();
        a.set_accept(s1, true);
        a.add_transition(s0, s1, 'a' as u32, 'm' as u32);
        a.add_transition(s0, s2, 'h' as u32, 'z' as u32);
        a.add_transition_label(s2, s2, 'q' as u32);
        a.finish_state();
        let dfa = determinize(&a, 10_000).unwrap();
        assert!(dfa.is_deterministic());
        assert!(accepts(&dfa, "a"));
        assert!(accepts(&dfa, "h"));
        assert!(accepts(&dfa, "m"));
        assert!(!accepts(&dfa, "n"));
        assert!(!accepts(&dfa, "hq"));
        assert_eq!(3, dfa.num_transitions(0));
    }

    #[test]
    fn label_at_u32_max() {
        let mut a = Automaton::new();
        let s0 = a.create_state();
        let s1 = a.create_state();
        let s2 = a.create_state();
        a.set_accept(s1, true);
        a.set_accept(s2, true);
        a.add_transition(s0, s1, 10, u32::MAX);
        a.add_transition(s0, s2, u32::MAX - 1, u32::MAX);
        a.finish_state();
        let dfa = determinize(&a, 10_000).unwrap();
        assert!(dfa.is_deterministic());
        assert_eq!(2, dfa.num_transitions(0));
        assert!(dfa.step(0, u32::MAX).is_some());
        assert!(dfa.step(0, 20).is_some());
        assert!(dfa.step(0, 9).is_none());
    }

    #[test]
    fn effort_limit() {
        let err = determinize(&nfa(), 0).unwrap_err();
        assert_eq!(0, err.limit());
        assert_eq!(5, err.automaton().unwrap().num_states());
    }

    #[test]
    fn deterministic_input_unchanged() {
        let mut a = Automaton::new();
        let s0 = a.create_state();
        a.set_accept(s0, true);
        a.add_transition_label(s0, s0, 'x' as u32);
        a.finish_state();
        let d = determinize(&a, 0).unwrap();
        assert_eq!(1, d.num_states());
        assert!(d.is_accept(0));
    }
}
