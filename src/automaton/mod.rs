/*!
The core automaton graph representation.

An [`Automaton`] is a set of integer-indexed states, where state `0` is the
initial state, an acceptance flag per state and, for every state, a list of
transitions labeled by inclusive ranges of `u32` labels. Labels are usually
Unicode codepoints (`0..=0x10FFFF`), but byte automata (`0..=255`) use the
exact same representation.

Automata are built incrementally. A state's transitions must be added
contiguously: once transitions for a different source state are added, the
previous source is *finished*, which sorts its transitions and merges
adjacent ranges that lead to the same destination. Algorithms that cannot
emit transitions in source order should use [`Builder`] instead.
*/

use std::fmt::Write;

pub use self::builder::Builder;

mod builder;

/// The largest Unicode codepoint.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// The largest label of a byte automaton.
pub const MAX_BYTE: u32 = 0xFF;

const NO_TRANSITIONS: usize = usize::MAX;

/// A finite state automaton over `u32` labels.
///
/// The automaton may or may not be deterministic. Determinism is tracked as
/// states are finished: a state with two transitions whose label ranges
/// overlap makes the whole automaton non-deterministic, and the flag is
/// never reset afterwards.
///
/// # Example
///
/// ```
/// use term_automata::Automaton;
///
/// let mut a = Automaton::new();
/// let s0 = a.create_state();
/// let s1 = a.create_state();
/// a.set_accept(s1, true);
/// a.add_transition(s0, s1, 'a' as u32, 'c' as u32);
/// a.finish_state();
///
/// assert_eq!(Some(s1), a.step(s0, 'b' as u32));
/// assert_eq!(None, a.step(s0, 'd' as u32));
/// assert!(a.is_deterministic());
/// ```
#[derive(Clone, Debug)]
pub struct Automaton {
    /// For each state, the location of its transitions.
    states: Vec<StateSlot>,
    /// All transitions of all states, grouped by source state.
    edges: Vec<Edge>,
    /// Whether each state is an accepting state.
    accept: Vec<bool>,
    /// The state currently receiving transitions, if any.
    cur_state: Option<usize>,
    deterministic: bool,
}

#[derive(Clone, Copy, Debug)]
struct StateSlot {
    start: usize,
    len: usize,
}

/// A single transition stored in an automaton.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Edge {
    pub(crate) dest: usize,
    pub(crate) min: u32,
    pub(crate) max: u32,
}

/// A cursor describing one transition of an automaton.
///
/// A `Transition` is reused across traversal calls: it records the source
/// state and the position of the next transition to read, and is filled in
/// with the destination and label range each time a transition is read.
///
/// See [`TransitionAccessor`] for the cursor protocol.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Transition {
    /// The source state.
    pub source: usize,
    /// The destination state.
    pub dest: usize,
    /// The minimum label, inclusive.
    pub min: u32,
    /// The maximum label, inclusive.
    pub max: u32,
    pub(crate) upto: usize,
}

impl Transition {
    /// Creates an empty transition cursor.
    pub fn new() -> Transition {
        Transition::default()
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} --> {} ", self.source, self.dest)?;
        fmt_label(f, self.min)?;
        if self.min != self.max {
            write!(f, "-")?;
            fmt_label(f, self.max)?;
        }
        Ok(())
    }
}

/// Generic enumeration of the transitions of an automaton-like value.
///
/// This is implemented by [`Automaton`] and by the lazily determinized
/// [`NFARunAutomaton`](crate::run::NFARunAutomaton), so that traversals such
/// as topological sorting and floor seeking work on either.
///
/// The protocol is: call `init_transition` for a state, which returns the
/// number of transitions leaving it, then call `next_transition` that many
/// times. Each call fills in the given cursor.
pub trait TransitionAccessor {
    /// Positions the cursor before the first transition of `state` and
    /// returns the number of transitions leaving `state`.
    fn init_transition(&self, state: usize, t: &mut Transition) -> usize;

    /// Reads the next transition into the cursor.
    ///
    /// # Panics
    ///
    /// When the cursor has already read every transition of its state.
    fn next_transition(&self, t: &mut Transition);

    /// Returns the number of transitions leaving `state`.
    fn num_transitions(&self, state: usize) -> usize;

    /// Reads the transition at `index` of `state` into the cursor.
    ///
    /// # Panics
    ///
    /// When `index` is out of bounds.
    fn transition(&self, state: usize, index: usize, t: &mut Transition);
}

impl Default for Automaton {
    fn default() -> Automaton {
        Automaton::new()
    }
}

impl Automaton {
    /// Creates a new automaton with no states. It accepts nothing.
    pub fn new() -> Automaton {
        Automaton {
            states: vec![],
            edges: vec![],
            accept: vec![],
            cur_state: None,
            deterministic: true,
        }
    }

    /// Creates a new state and returns its identifier.
    ///
    /// The first state created is the initial state.
    pub fn create_state(&mut self) -> usize {
        let id = self.states.len();
        self.states.push(StateSlot { start: NO_TRANSITIONS, len: 0 });
        self.accept.push(false);
        id
    }

    /// Sets whether the given state is an accepting state.
    ///
    /// # Panics
    ///
    /// When `state` does not exist.
    pub fn set_accept(&mut self, state: usize, accept: bool) {
        self.check_state(state);
        self.accept[state] = accept;
    }

    /// Returns true if the given state is an accepting state.
    pub fn is_accept(&self, state: usize) -> bool {
        self.accept[state]
    }

    /// Returns an iterator over all accepting states in ascending order.
    pub fn accept_states(&self) -> impl Iterator<Item = usize> + '_ {
        self.accept
            .iter()
            .enumerate()
            .filter(|&(_, &accept)| accept)
            .map(|(s, _)| s)
    }

    /// Returns the number of states in this automaton.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the total number of transitions in this automaton.
    pub fn num_total_transitions(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if no state has transitions with overlapping labels.
    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    /// Adds a transition on the single label `label`.
    pub fn add_transition_label(
        &mut self,
        source: usize,
        dest: usize,
        label: u32,
    ) {
        self.add_transition(source, dest, label, label);
    }

    /// Adds a transition from `source` to `dest` on every label in
    /// `min..=max`.
    ///
    /// If `source` differs from the state that most recently received a
    /// transition, that state is finished first.
    ///
    /// # Panics
    ///
    /// When either state does not exist, when `min > max` or when `source`
    /// was already finished. Transitions for a state must be added
    /// contiguously.
    pub fn add_transition(
        &mut self,
        source: usize,
        dest: usize,
        min: u32,
        max: u32,
    ) {
        self.check_state(source);
        self.check_state(dest);
        assert!(min <= max, "invalid label range: min={} max={}", min, max);
        if self.cur_state != Some(source) {
            if self.cur_state.is_some() {
                self.finish_current_state();
            }
            assert!(
                self.states[source].start == NO_TRANSITIONS,
                "from state ({}) already had transitions added",
                source,
            );
            self.cur_state = Some(source);
            self.states[source].start = self.edges.len();
        }
        self.edges.push(Edge { dest, min, max });
        self.states[source].len += 1;
    }

    /// Adds a virtual epsilon transition from `source` to `dest`.
    ///
    /// Instead of a real epsilon edge, every transition leaving `dest` is
    /// copied to `source`, and `source` becomes accepting if `dest` is.
    /// The transitions of `dest` must already be finished.
    ///
    /// # Panics
    ///
    /// When `dest` is the state currently receiving transitions, or when
    /// `source` was already finished and has transitions to copy.
    pub fn add_epsilon(&mut self, source: usize, dest: usize) {
        let copied: Vec<Edge> = self.edges(dest).to_vec();
        for e in copied {
            self.add_transition(source, e.dest, e.min, e.max);
        }
        if self.is_accept(dest) {
            self.set_accept(source, true);
        }
    }

    /// Appends a copy of every state and transition of `other` to this
    /// automaton. State `s` of `other` becomes state `s + n`, where `n` is
    /// the number of states in this automaton before the copy.
    ///
    /// # Panics
    ///
    /// When `other` has an unfinished state.
    pub fn copy(&mut self, other: &Automaton) {
        assert!(
            other.cur_state.is_none(),
            "cannot copy an automaton with an unfinished state"
        );
        self.finish_state();
        let state_offset = self.states.len();
        let edge_offset = self.edges.len();
        for slot in other.states.iter() {
            let start = if slot.start == NO_TRANSITIONS {
                NO_TRANSITIONS
            } else {
                slot.start + edge_offset
            };
            self.states.push(StateSlot { start, len: slot.len });
        }
        self.accept.extend_from_slice(&other.accept);
        self.edges.extend(other.edges.iter().map(|e| Edge {
            dest: e.dest + state_offset,
            min: e.min,
            max: e.max,
        }));
        self.deterministic = self.deterministic && other.deterministic;
    }

    /// Finishes the state currently receiving transitions, if any.
    ///
    /// This must be called after the last transition has been added and
    /// before the automaton is used.
    pub fn finish_state(&mut self) {
        if self.cur_state.is_some() {
            self.finish_current_state();
            self.cur_state = None;
        }
    }

    /// Returns the number of transitions leaving `state`.
    pub fn num_transitions(&self, state: usize) -> usize {
        self.edges(state).len()
    }

    /// Returns an iterator over the transitions leaving `state`, ordered by
    /// `(min, max, dest)`.
    pub fn transitions(&self, state: usize) -> Transitions<'_> {
        Transitions { source: state, it: self.edges(state).iter() }
    }

    /// Returns the destination of the transition from `state` that matches
    /// `label`, if one exists.
    ///
    /// This uses a binary search and assumes the automaton is deterministic.
    /// On a non-deterministic automaton, an arbitrary matching transition may
    /// be returned, or none at all.
    pub fn step(&self, state: usize, label: u32) -> Option<usize> {
        let edges = self.edges(state);
        find_edge(edges, label).map(|i| edges[i].dest)
    }

    /// Like [`Automaton::step`], but reuses the position of the cursor from
    /// a previous call to speed up repeated stepping from the same state.
    ///
    /// The cursor's `source` selects the state. On success, the cursor is
    /// filled with the matching transition.
    pub fn next(&self, t: &mut Transition, label: u32) -> Option<usize> {
        let edges = self.edges(t.source);
        let index = match edges.get(t.upto) {
            Some(e) if e.min <= label && label <= e.max => Some(t.upto),
            Some(e) if e.max < label => {
                find_edge(&edges[t.upto + 1..], label)
                    .map(|i| i + t.upto + 1)
            }
            _ => find_edge(edges, label),
        }?;
        let e = edges[index];
        t.upto = index;
        t.dest = e.dest;
        t.min = e.min;
        t.max = e.max;
        Some(e.dest)
    }

    /// Returns the sorted set of label values at which the outgoing
    /// transitions of some state begin or end.
    ///
    /// Every label range between two consecutive start points (and after the
    /// last one) is treated identically by every state. The first start
    /// point is always `0`.
    pub fn start_points(&self) -> Vec<u32> {
        let mut points = vec![0];
        for e in self.edges.iter() {
            points.push(e.min);
            if e.max < MAX_CODE_POINT {
                points.push(e.max + 1);
            }
        }
        points.sort_unstable();
        points.dedup();
        points
    }

    /// Returns the transitions of every state, indexed by state.
    pub fn sorted_transitions(&self) -> Vec<Vec<Transition>> {
        (0..self.num_states())
            .map(|s| self.transitions(s).collect())
            .collect()
    }

    /// Renders this automaton in the Graphviz DOT language.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        // Writing to a String never fails.
        let _ = self.write_dot(&mut out);
        out
    }

    fn write_dot(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "digraph Automaton {{")?;
        writeln!(out, "  rankdir = LR")?;
        writeln!(out, "  node [width=0.2, height=0.2, fontsize=8]")?;
        if self.num_states() > 0 {
            writeln!(out, "  initial [shape=plaintext,label=\"\"]")?;
            writeln!(out, "  initial -> 0")?;
        }
        for s in 0..self.num_states() {
            let shape =
                if self.is_accept(s) { "doublecircle" } else { "circle" };
            writeln!(out, "  {} [shape={},label=\"{}\"]", s, shape, s)?;
            for t in self.transitions(s) {
                write!(out, "  {} -> {} [label=\"", s, t.dest)?;
                write_dot_label(out, t.min)?;
                if t.min != t.max {
                    write!(out, "-")?;
                    write_dot_label(out, t.max)?;
                }
                writeln!(out, "\"]")?;
            }
        }
        writeln!(out, "}}")
    }

    /// Returns the finished transitions of `state`.
    pub(crate) fn edges(&self, state: usize) -> &[Edge] {
        assert!(
            self.cur_state != Some(state),
            "state {} is unfinished; call finish_state first",
            state
        );
        let slot = self.states[state];
        if slot.start == NO_TRANSITIONS {
            return &[];
        }
        &self.edges[slot.start..slot.start + slot.len]
    }

    fn check_state(&self, state: usize) {
        assert!(
            state < self.states.len(),
            "state={} is out of bounds (num_states={})",
            state,
            self.states.len()
        );
    }

    fn finish_current_state(&mut self) {
        let state = match self.cur_state {
            None => return,
            Some(state) => state,
        };
        let StateSlot { start, len } = self.states[state];
        // The current state's transitions are always the last ones.
        debug_assert_eq!(start + len, self.edges.len());
        let edges = &mut self.edges[start..];
        edges.sort_unstable_by_key(|e| (e.dest, e.min, e.max));

        let mut upto = 0;
        for i in 0..edges.len() {
            let e = edges[i];
            if upto > 0 {
                let last = &mut edges[upto - 1];
                if last.dest == e.dest && e.min <= last.max.saturating_add(1)
                {
                    if e.max > last.max {
                        last.max = e.max;
                    }
                    continue;
                }
            }
            edges[upto] = e;
            upto += 1;
        }
        self.edges.truncate(start + upto);
        self.states[state].len = upto;

        let edges = &mut self.edges[start..];
        edges.sort_unstable_by_key(|e| (e.min, e.max, e.dest));
        let mut prev_max: Option<u32> = None;
        for e in edges.iter() {
            if prev_max.map_or(false, |max| e.min <= max) {
                self.deterministic = false;
                break;
            }
            prev_max = Some(prev_max.map_or(e.max, |max| max.max(e.max)));
        }
    }
}

impl TransitionAccessor for Automaton {
    fn init_transition(&self, state: usize, t: &mut Transition) -> usize {
        t.source = state;
        t.upto = 0;
        self.num_transitions(state)
    }

    fn next_transition(&self, t: &mut Transition) {
        let e = self.edges(t.source)[t.upto];
        t.dest = e.dest;
        t.min = e.min;
        t.max = e.max;
        t.upto += 1;
    }

    fn num_transitions(&self, state: usize) -> usize {
        Automaton::num_transitions(self, state)
    }

    fn transition(&self, state: usize, index: usize, t: &mut Transition) {
        let e = self.edges(state)[index];
        t.source = state;
        t.dest = e.dest;
        t.min = e.min;
        t.max = e.max;
        t.upto = index + 1;
    }
}

/// An iterator over the transitions leaving one state.
#[derive(Clone, Debug)]
pub struct Transitions<'a> {
    source: usize,
    it: std::slice::Iter<'a, Edge>,
}

impl<'a> Iterator for Transitions<'a> {
    type Item = Transition;

    fn next(&mut self) -> Option<Transition> {
        let e = self.it.next()?;
        Some(Transition {
            source: self.source,
            dest: e.dest,
            min: e.min,
            max: e.max,
            upto: 0,
        })
    }
}

/// Returns the index of the edge containing `label` in edges sorted by
/// their minimum label.
fn find_edge(edges: &[Edge], label: u32) -> Option<usize> {
    let i = edges.partition_point(|e| e.min <= label);
    if i > 0 && label <= edges[i - 1].max {
        Some(i - 1)
    } else {
        None
    }
}

fn fmt_label(f: &mut std::fmt::Formatter, label: u32) -> std::fmt::Result {
    match char::from_u32(label) {
        Some(c) if (0x21..=0x7E).contains(&label) => write!(f, "{}", c),
        _ => write!(f, "\\U+{:04X}", label),
    }
}

fn write_dot_label(out: &mut String, label: u32) -> std::fmt::Result {
    match char::from_u32(label) {
        Some(c) if c == '"' || c == '\\' => write!(out, "\\{}", c),
        Some(c) if (0x21..=0x7E).contains(&label) => write!(out, "{}", c),
        _ => write!(out, "\\\\U+{:04X}", label),
    }
}
