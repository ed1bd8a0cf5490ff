use std::cell::RefCell;

use crate::{
    automaton::{Automaton, Transition, TransitionAccessor},
    run::{ByteRunnable, MISSING},
    util::{fnv, int_set::FrozenIntSet, sparse_set::SparseSet},
};

/// Marks a transition of a subset state that hasn't been computed yet.
const NOT_COMPUTED: u32 = MISSING - 1;

/// A run automaton that determinizes lazily.
///
/// Each state of this automaton is a set of states of the underlying
/// (possibly non-deterministic) automaton. A subset state and its
/// transitions are computed the first time they are needed and then cached,
/// so the cost of running is proportional to the part of the subset
/// construction that input actually explores. This makes it usable for
/// automata whose full determinization would be too large.
///
/// The cache lives behind a `RefCell`, so a value is `Send` but not `Sync`.
/// Threads that want to share one should each use their own clone.
///
/// State `0` is the initial state. State ids are dense and are assigned in
/// the order states are discovered.
#[derive(Clone, Debug)]
pub struct NFARunAutomaton {
    automaton: Automaton,
    alphabet_size: u32,
    points: Box<[u32]>,
    classmap: Box<[u32]>,
    cache: RefCell<Cache>,
}

#[derive(Clone, Debug)]
struct Cache {
    dstates: Vec<DState>,
    ords: fnv::HashMap<FrozenIntSet, usize>,
    scratch: SparseSet,
}

#[derive(Clone, Debug)]
struct DState {
    nfa_states: FrozenIntSet,
    accept: bool,
    /// One entry per label class, allocated on first use.
    transitions: Option<Box<[u32]>>,
    computed: usize,
    outgoing: usize,
}

impl NFARunAutomaton {
    /// Creates a lazy run automaton for labels in `0..alphabet_size`.
    pub fn new(a: &Automaton, alphabet_size: u32) -> NFARunAutomaton {
        let points = a.start_points();
        let classmap_len = alphabet_size.min(256) as usize;
        let mut classmap = vec![0; classmap_len];
        let mut i = 0;
        for (label, class) in classmap.iter_mut().enumerate() {
            if i + 1 < points.len() && label as u32 == points[i + 1] {
                i += 1;
            }
            *class = i as u32;
        }

        let initial = if a.num_states() == 0 { vec![] } else { vec![0] };
        let initial = FrozenIntSet::from_sorted(initial);
        let mut ords = fnv::new_map();
        ords.insert(initial.clone(), 0);
        let cache = Cache {
            dstates: vec![DState {
                accept: a.num_states() > 0 && a.is_accept(0),
                nfa_states: initial,
                transitions: None,
                computed: 0,
                outgoing: 0,
            }],
            ords,
            scratch: SparseSet::new(a.num_states()),
        };
        NFARunAutomaton {
            automaton: a.clone(),
            alphabet_size,
            points: points.into_boxed_slice(),
            classmap: classmap.into_boxed_slice(),
            cache: RefCell::new(cache),
        }
    }

    /// Returns the state reached from `state` on `label`, if any.
    pub fn step(&self, state: usize, label: u32) -> Option<usize> {
        let class = self.char_class(label);
        let mut cache = self.cache.borrow_mut();
        match self.next_class(&mut cache, state, class) {
            MISSING => None,
            dest => Some(dest as usize),
        }
    }

    /// Returns true if `state` is an accepting state.
    pub fn is_accept(&self, state: usize) -> bool {
        self.cache.borrow().dstates[state].accept
    }

    /// Returns the number of states discovered so far.
    pub fn size(&self) -> usize {
        self.cache.borrow().dstates.len()
    }

    /// Returns true if this automaton accepts the given labels.
    pub fn run_labels(&self, labels: &[u32]) -> bool {
        let mut state = 0;
        for &label in labels {
            match self.step(state, label) {
                None => return false,
                Some(next) => state = next,
            }
        }
        self.is_accept(state)
    }

    fn char_class(&self, label: u32) -> usize {
        match self.classmap.get(label as usize) {
            Some(&class) => class as usize,
            None => self.points.partition_point(|&p| p <= label) - 1,
        }
    }

    /// Returns the destination of `state` on the given label class,
    /// computing it if needed.
    ///
    /// Neighboring classes that are known to lead to the same subset are
    /// filled in at the same time.
    fn next_class(&self, cache: &mut Cache, state: usize, class: usize) -> u32 {
        if let Some(ref row) = cache.dstates[state].transitions {
            if row[class] != NOT_COMPUTED {
                return row[class];
            }
        }
        let (set, left, right) = self.step_set(cache, state, self.points[class]);
        let dest = match set {
            None => MISSING,
            Some(set) => self.find_or_add(cache, set) as u32,
        };

        let mut lo = class;
        while lo > 0 && self.points[lo - 1] >= left {
            lo -= 1;
        }
        let mut hi = class;
        while hi + 1 < self.points.len() && self.points[hi + 1] <= right {
            hi += 1;
        }
        let n = self.points.len();
        let d = &mut cache.dstates[state];
        let row = d
            .transitions
            .get_or_insert_with(|| vec![NOT_COMPUTED; n].into_boxed_slice());
        for slot in row[lo..=hi].iter_mut() {
            if *slot == NOT_COMPUTED {
                *slot = dest;
                d.computed += 1;
                if dest != MISSING {
                    d.outgoing += 1;
                }
            }
        }
        dest
    }

    /// Computes the subset reached from `state` on `label`, along with the
    /// widest label range `[left, right]` around `label` on which every
    /// member's transitions behave identically.
    fn step_set(
        &self,
        cache: &mut Cache,
        state: usize,
        label: u32,
    ) -> (Option<FrozenIntSet>, u32, u32) {
        cache.scratch.clear();
        let (mut left, mut right) = (0, self.alphabet_size - 1);
        for &s in cache.dstates[state].nfa_states.values() {
            for e in self.automaton.edges(s) {
                if e.max < label {
                    left = left.max(e.max + 1);
                } else if e.min > label {
                    right = right.min(e.min - 1);
                    break;
                } else {
                    cache.scratch.insert(e.dest);
                    left = left.max(e.min);
                    right = right.min(e.max);
                }
            }
        }
        if cache.scratch.is_empty() {
            return (None, left, right);
        }
        let set = FrozenIntSet::from_sorted(cache.scratch.to_sorted_vec());
        (Some(set), left, right)
    }

    fn find_or_add(&self, cache: &mut Cache, set: FrozenIntSet) -> usize {
        if let Some(&ord) = cache.ords.get(&set) {
            return ord;
        }
        let ord = cache.dstates.len();
        let accept = set.values().iter().any(|&s| self.automaton.is_accept(s));
        cache.ords.insert(set.clone(), ord);
        cache.dstates.push(DState {
            nfa_states: set,
            accept,
            transitions: None,
            computed: 0,
            outgoing: 0,
        });
        if ord.is_power_of_two() {
            trace!("lazy NFA run automaton grew to {} states", ord + 1);
        }
        ord
    }

    fn determinize_fully(&self, cache: &mut Cache, state: usize) {
        if cache.dstates[state].computed == self.points.len() {
            return;
        }
        for class in 0..self.points.len() {
            self.next_class(cache, state, class);
        }
    }

    fn set_transition(&self, row: &[u32], class: usize, t: &mut Transition) {
        t.dest = row[class] as usize;
        t.min = self.points[class];
        t.max = match self.points.get(class + 1) {
            Some(&next) => next - 1,
            None => self.alphabet_size - 1,
        };
    }
}

impl ByteRunnable for NFARunAutomaton {
    fn step(&self, state: usize, byte: u8) -> Option<usize> {
        NFARunAutomaton::step(self, state, byte as u32)
    }

    fn is_accept(&self, state: usize) -> bool {
        NFARunAutomaton::is_accept(self, state)
    }

    fn size(&self) -> usize {
        NFARunAutomaton::size(self)
    }
}

/// Transitions are reported one per label class, in ascending label order.
/// Reading the transitions of a state computes all of them.
impl TransitionAccessor for NFARunAutomaton {
    fn init_transition(&self, state: usize, t: &mut Transition) -> usize {
        t.source = state;
        t.upto = 0;
        self.num_transitions(state)
    }

    fn next_transition(&self, t: &mut Transition) {
        let cache = self.cache.borrow();
        let row = cache.dstates[t.source].transitions.as_deref().unwrap_or(&[]);
        while row[t.upto] == MISSING {
            t.upto += 1;
        }
        self.set_transition(row, t.upto, t);
        t.upto += 1;
    }

    fn num_transitions(&self, state: usize) -> usize {
        let mut cache = self.cache.borrow_mut();
        self.determinize_fully(&mut cache, state);
        cache.dstates[state].outgoing
    }

    fn transition(&self, state: usize, index: usize, t: &mut Transition) {
        let mut cache = self.cache.borrow_mut();
        self.determinize_fully(&mut cache, state);
        let row = cache.dstates[state].transitions.as_deref().unwrap_or(&[]);
        let class = row
            .iter()
            .enumerate()
            .filter(|&(_, &dest)| dest != MISSING)
            .map(|(class, _)| class)
            .nth(index);
        match class {
            None => panic!("transition {} of state {} out of bounds", index, state),
            Some(class) => {
                t.source = state;
                self.set_transition(row, class, t);
                t.upto = class + 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        automata,
        operations::{self, run_labels},
        run::RunAutomaton,
    };

    /// (a|b)*a(a|b){n}
    fn nth_from_last(n: usize) -> Automaton {
        let ab = automata::make_char_range('a' as u32, 'b' as u32);
        operations::concatenate(&[
            operations::repeat(&ab),
            automata::make_char('a' as u32),
            operations::repeat_range(&ab, n, n),
        ])
    }

    fn all_strings(alphabet: &[u32], max_len: usize) -> Vec<Vec<u32>> {
        let mut all = vec![vec![]];
        let mut last = vec![vec![]];
        for _ in 0..max_len {
            let mut next = vec![];
            for s in last.iter() {
                for &c in alphabet {
                    let mut s: Vec<u32> = s.clone();
                    s.push(c);
                    next.push(s);
                }
            }
            all.extend(next.iter().cloned());
            last = next;
        }
        all
    }

    #[test]
    fn agrees_with_nfa() {
        let a = nth_from_last(3);
        let lazy = NFARunAutomaton::new(&a, 256);
        for s in all_strings(&['a' as u32, 'b' as u32, 'c' as u32], 7) {
            assert_eq!(run_labels(&a, &s), lazy.run_labels(&s), "{:?}", s);
        }
    }

    #[test]
    fn lazy_growth() {
        let a = nth_from_last(12);
        let lazy = NFARunAutomaton::new(&a, 256);
        assert_eq!(1, lazy.size());
        assert!(lazy.run_labels(&[b'a' as u32; 13]));
        // Only one subset per prefix length is explored.
        assert!(lazy.size() <= 14);
    }

    #[test]
    fn neighboring_classes_share_result() {
        let mut a = Automaton::new();
        let s0 = a.create_state();
        let s1 = a.create_state();
        let s2 = a.create_state();
        a.set_accept(s1, true);
        a.set_accept(s2, true);
        a.add_transition(s0, s1, 'a' as u32, 'z' as u32);
        a.add_transition(s1, s2, 'm' as u32, 'm' as u32);
        a.finish_state();
        let lazy = NFARunAutomaton::new(&a, 256);
        assert_eq!(Some(1), lazy.step(0, 'b' as u32));
        // The classes a-l, m and n-z were all filled in by the step above.
        assert_eq!(3, lazy.cache.borrow().dstates[0].computed);
        assert_eq!(Some(1), lazy.step(0, 'm' as u32));
        assert_eq!(Some(1), lazy.step(0, 'x' as u32));
        assert_eq!(2, lazy.size());
    }

    #[test]
    fn transitions_match_dfa() {
        let a = nth_from_last(2);
        let lazy = NFARunAutomaton::new(&a, 256);
        let dfa = RunAutomaton::new(&a, 256, 10_000).unwrap();
        let mut t = Transition::new();
        let n = lazy.init_transition(0, &mut t);
        assert_eq!(2, n);
        lazy.next_transition(&mut t);
        assert_eq!(('a' as u32, 'a' as u32), (t.min, t.max));
        lazy.next_transition(&mut t);
        assert_eq!(('b' as u32, 'b' as u32), (t.min, t.max));
        assert_eq!(Some(t.dest), lazy.step(0, 'b' as u32));

        lazy.transition(0, 1, &mut t);
        assert_eq!('b' as u32, t.min);
        assert!(dfa.step(0, 'b' as u32).is_some());
    }

    #[test]
    fn full_traversal() {
        let a = automata::make_string_union(&["ab", "ac", "b"]);
        let lazy = NFARunAutomaton::new(&a, 256);
        let mut seen = vec![0];
        let mut stack = vec![0];
        let mut t = Transition::new();
        while let Some(s) = stack.pop() {
            let n = lazy.init_transition(s, &mut t);
            for _ in 0..n {
                lazy.next_transition(&mut t);
                if !seen.contains(&t.dest) {
                    seen.push(t.dest);
                    stack.push(t.dest);
                }
            }
        }
        assert_eq!(lazy.size(), seen.len());
        assert_eq!(a.num_states(), seen.len());
    }

    #[test]
    fn empty_automaton() {
        let lazy = NFARunAutomaton::new(&automata::make_empty(), 256);
        assert!(!lazy.run_labels(&[]));
        assert!(!ByteRunnable::run(&lazy, b"a"));
        assert_eq!(0, lazy.num_transitions(0));
    }

    #[test]
    fn send() {
        fn assert_send<T: Send>() {}
        assert_send::<NFARunAutomaton>();
    }
}
