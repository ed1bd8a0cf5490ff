/*!
Builds minimal deterministic automata from sorted lists of strings.

This is the incremental construction of Daciuk, Mihov, Watson and Watson:
"Incremental Construction of Minimal Acyclic Finite-State Automata". Each
new string shares the longest prefix already present in the automaton, and
once a path can no longer be extended by later (larger) strings, its states
are merged with equivalent states seen before. The automaton stays minimal
after every insertion, except along the path of the last string added.
*/

use crate::{automaton::Automaton, util::fnv};

/// An incremental builder of a minimal automaton accepting a sorted set of
/// strings.
///
/// # Example
///
/// ```
/// use term_automata::{operations, strings::StringsToAutomaton};
///
/// let a = StringsToAutomaton::build(vec!["bar", "baz", "foo"]);
/// assert!(operations::run(&a, "baz"));
/// assert!(!operations::run(&a, "ba"));
/// ```
#[derive(Clone, Debug)]
pub struct StringsToAutomaton {
    /// An arena of nodes. Node 0 is the root.
    nodes: Vec<Node>,
    /// Every node that can no longer change, keyed by its content.
    register: fnv::HashMap<Node, usize>,
    previous: Option<Vec<u32>>,
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
struct Node {
    /// Outgoing labels in ascending order.
    labels: Vec<u32>,
    /// The destination of each label.
    dests: Vec<usize>,
    is_final: bool,
}

impl Default for StringsToAutomaton {
    fn default() -> StringsToAutomaton {
        StringsToAutomaton::new()
    }
}

impl StringsToAutomaton {
    /// Creates a builder with no strings.
    pub fn new() -> StringsToAutomaton {
        StringsToAutomaton {
            nodes: vec![Node::default()],
            register: fnv::new_map(),
            previous: None,
        }
    }

    /// Builds the minimal automaton accepting exactly the given strings,
    /// compared as sequences of codepoints.
    ///
    /// # Panics
    ///
    /// When the strings are not sorted.
    pub fn build<I, S>(strings: I) -> Automaton
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = StringsToAutomaton::new();
        let mut labels = vec![];
        for s in strings {
            labels.clear();
            labels.extend(s.as_ref().chars().map(|c| c as u32));
            builder.add(&labels);
        }
        builder.finish()
    }

    /// Builds the minimal byte automaton accepting exactly the given byte
    /// strings.
    ///
    /// # Panics
    ///
    /// When the byte strings are not sorted.
    pub fn build_binary<I, B>(strings: I) -> Automaton
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut builder = StringsToAutomaton::new();
        let mut labels = vec![];
        for s in strings {
            labels.clear();
            labels.extend(s.as_ref().iter().map(|&b| b as u32));
            builder.add(&labels);
        }
        builder.finish()
    }

    /// Adds a string, given as a sequence of labels.
    ///
    /// Adding the same string twice in a row has no effect.
    ///
    /// # Panics
    ///
    /// When `current` sorts before the previously added string.
    pub fn add(&mut self, current: &[u32]) {
        if let Some(ref previous) = self.previous {
            assert!(
                previous.as_slice() <= current,
                "input must be sorted: {:?} >= {:?}",
                previous,
                current
            );
            if previous.as_slice() == current {
                return;
            }
        }

        // Only the last child can share a prefix with a larger string.
        let mut state = 0;
        let mut pos = 0;
        while pos < current.len() {
            match self.last_child(state, current[pos]) {
                None => break,
                Some(child) => {
                    state = child;
                    pos += 1;
                }
            }
        }
        if !self.nodes[state].labels.is_empty() {
            self.replace_or_register(state);
        }
        self.add_suffix(state, &current[pos..]);
        self.previous = Some(current.to_vec());
    }

    /// Finishes construction and returns the automaton.
    ///
    /// If no strings were added, the automaton accepts nothing.
    pub fn finish(mut self) -> Automaton {
        if self.nodes[0].labels.is_empty() && !self.nodes[0].is_final {
            return Automaton::new();
        }
        if !self.nodes[0].labels.is_empty() {
            self.replace_or_register(0);
        }
        self.convert()
    }

    fn last_child(&self, state: usize, label: u32) -> Option<usize> {
        let node = &self.nodes[state];
        match node.labels.last() {
            Some(&last) if last == label => node.dests.last().copied(),
            _ => None,
        }
    }

    fn add_suffix(&mut self, mut state: usize, suffix: &[u32]) {
        for &label in suffix {
            let child = self.nodes.len();
            self.nodes.push(Node::default());
            self.nodes[state].labels.push(label);
            self.nodes[state].dests.push(child);
            state = child;
        }
        self.nodes[state].is_final = true;
    }

    /// Minimizes the path of last children below `state`, replacing each
    /// node with an equivalent registered node or registering it.
    fn replace_or_register(&mut self, state: usize) {
        let mut path = vec![state];
        loop {
            let last = path[path.len() - 1];
            match self.nodes[last].dests.last() {
                Some(&child) => path.push(child),
                None => break,
            }
        }
        for i in (1..path.len()).rev() {
            let (parent, child) = (path[i - 1], path[i]);
            match self.register.get(&self.nodes[child]) {
                Some(&registered) => {
                    if let Some(dest) = self.nodes[parent].dests.last_mut() {
                        *dest = registered;
                    }
                }
                None => {
                    self.register.insert(self.nodes[child].clone(), child);
                }
            }
        }
    }

    /// Converts the node graph reachable from the root into an automaton
    /// with the root as state 0.
    fn convert(&self) -> Automaton {
        let mut ids = vec![usize::MAX; self.nodes.len()];
        let mut order = vec![0];
        ids[0] = 0;
        let mut i = 0;
        while i < order.len() {
            let node = &self.nodes[order[i]];
            for &dest in node.dests.iter() {
                if ids[dest] == usize::MAX {
                    ids[dest] = order.len();
                    order.push(dest);
                }
            }
            i += 1;
        }

        let mut a = Automaton::new();
        for &n in order.iter() {
            let s = a.create_state();
            a.set_accept(s, self.nodes[n].is_final);
        }
        for (s, &n) in order.iter().enumerate() {
            let node = &self.nodes[n];
            for (&label, &dest) in node.labels.iter().zip(node.dests.iter()) {
                a.add_transition_label(s, ids[dest], label);
            }
        }
        a.finish_state();
        a
    }
}
