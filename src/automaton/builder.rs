use crate::automaton::Automaton;

/// Records transitions in any order and compiles them into an
/// [`Automaton`].
///
/// An `Automaton` requires every state's transitions to be added
/// contiguously. Algorithms such as determinization and reversal discover
/// transitions in some other order, so they record them here instead and
/// pay for a single global sort when calling [`Builder::finish`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    transitions: Vec<(usize, usize, u32, u32)>,
    accept: Vec<bool>,
}

impl Builder {
    /// Creates an empty builder.
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Creates a new state and returns its identifier.
    pub fn create_state(&mut self) -> usize {
        self.accept.push(false);
        self.accept.len() - 1
    }

    /// Returns the number of states created so far.
    pub fn num_states(&self) -> usize {
        self.accept.len()
    }

    /// Sets whether the given state is an accepting state.
    ///
    /// # Panics
    ///
    /// When `state` does not exist.
    pub fn set_accept(&mut self, state: usize, accept: bool) {
        assert!(state < self.num_states(), "state={} is out of bounds", state);
        self.accept[state] = accept;
    }

    /// Returns true if the given state is an accepting state.
    pub fn is_accept(&self, state: usize) -> bool {
        self.accept[state]
    }

    /// Records a transition from `source` to `dest` on `min..=max`.
    ///
    /// # Panics
    ///
    /// When `min > max`. Invalid state indices are reported by
    /// [`Builder::finish`].
    pub fn add_transition(
        &mut self,
        source: usize,
        dest: usize,
        min: u32,
        max: u32,
    ) {
        assert!(min <= max, "invalid label range: min={} max={}", min, max);
        self.transitions.push((source, dest, min, max));
    }

    /// Records a transition on the single label `label`.
    pub fn add_transition_label(
        &mut self,
        source: usize,
        dest: usize,
        label: u32,
    ) {
        self.add_transition(source, dest, label, label);
    }

    /// Adds a virtual epsilon transition by copying every transition
    /// recorded so far that leaves `dest` to `source`. If `dest` is
    /// accepting, `source` becomes accepting too.
    ///
    /// Only transitions recorded before this call are copied.
    pub fn add_epsilon(&mut self, source: usize, dest: usize) {
        let count = self.transitions.len();
        for i in 0..count {
            let (src, to, min, max) = self.transitions[i];
            if src == dest {
                self.transitions.push((source, to, min, max));
            }
        }
        if self.is_accept(dest) {
            self.set_accept(source, true);
        }
    }

    /// Appends a copy of every state and transition of `other`, shifting its
    /// states by the number of states in this builder.
    pub fn copy(&mut self, other: &Automaton) {
        let offset = self.num_states();
        self.copy_states(other);
        for s in 0..other.num_states() {
            for e in other.edges(s) {
                self.transitions.push((
                    s + offset,
                    e.dest + offset,
                    e.min,
                    e.max,
                ));
            }
        }
    }

    /// Appends the states of `other`, with their acceptance, but none of its
    /// transitions.
    pub fn copy_states(&mut self, other: &Automaton) {
        for s in 0..other.num_states() {
            let id = self.create_state();
            self.set_accept(id, other.is_accept(s));
        }
    }

    /// Compiles the recorded states and transitions into an automaton.
    pub fn finish(mut self) -> Automaton {
        let mut a = Automaton::new();
        for &accept in self.accept.iter() {
            let s = a.create_state();
            a.set_accept(s, accept);
        }
        self.transitions
            .sort_unstable_by_key(|&(src, dest, min, max)| (src, min, max, dest));
        for &(source, dest, min, max) in self.transitions.iter() {
            a.add_transition(source, dest, min, max);
        }
        a.finish_state();
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_order_transitions() {
        let mut b = Builder::new();
        let s0 = b.create_state();
        let s1 = b.create_state();
        let s2 = b.create_state();
        b.set_accept(s2, true);
        b.add_transition_label(s1, s2, 'b' as u32);
        b.add_transition_label(s0, s1, 'a' as u32);
        b.add_transition_label(s1, s2, 'c' as u32);
        let a = b.finish();
        assert_eq!(3, a.num_states());
        assert_eq!(1, a.num_transitions(s0));
        // b and c are adjacent and share a destination.
        assert_eq!(1, a.num_transitions(s1));
        assert_eq!(Some(s2), a.step(s1, 'c' as u32));
        assert!(a.is_deterministic());
    }

    #[test]
    fn epsilon_copies_recorded_transitions() {
        let mut b = Builder::new();
        let s0 = b.create_state();
        let s1 = b.create_state();
        let s2 = b.create_state();
        b.set_accept(s2, true);
        b.add_transition_label(s1, s2, 'x' as u32);
        b.add_epsilon(s0, s1);
        b.add_epsilon(s0, s2);
        let a = b.finish();
        assert_eq!(Some(s2), a.step(s0, 'x' as u32));
        assert!(a.is_accept(s0));
    }
}
