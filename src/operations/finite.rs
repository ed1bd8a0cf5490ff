use crate::automaton::Automaton;

/// An iterator over every string accepted by an acyclic automaton.
///
/// Strings are yielded as sequences of labels, in depth first order: the
/// empty string first if the initial state accepts, then every other string
/// in lexicographic order when the automaton is deterministic. An optional
/// limit stops iteration after a fixed number of strings.
///
/// The traversal uses an explicit stack, so long accepted strings do not
/// grow the call stack.
///
/// # Panics
///
/// Iteration panics if a cycle is reached, since the language would then be
/// infinite.
#[derive(Clone, Debug)]
pub struct FiniteStrings<'a> {
    a: &'a Automaton,
    limit: Option<usize>,
    count: usize,
    stack: Vec<Frame>,
    on_path: Vec<bool>,
    string: Vec<u32>,
    emit_empty: bool,
}

/// A state on the current path, with the next label to try.
#[derive(Clone, Copy, Debug)]
struct Frame {
    state: usize,
    edge: usize,
    label: u32,
}

impl<'a> FiniteStrings<'a> {
    /// Creates an iterator over every string accepted by `a`.
    pub fn new(a: &'a Automaton) -> FiniteStrings<'a> {
        FiniteStrings::with_limit(a, None)
    }

    /// Creates an iterator over at most `limit` strings accepted by `a`.
    pub fn with_limit(
        a: &'a Automaton,
        limit: Option<usize>,
    ) -> FiniteStrings<'a> {
        let mut it = FiniteStrings {
            a,
            limit,
            count: 0,
            stack: vec![],
            on_path: vec![false; a.num_states()],
            string: vec![],
            emit_empty: false,
        };
        if a.num_states() > 0 {
            it.emit_empty = a.is_accept(0);
            it.push(0);
        }
        it
    }

    fn push(&mut self, state: usize) {
        assert!(!self.on_path[state], "automaton has cycles");
        self.on_path[state] = true;
        let label = self.a.edges(state).first().map_or(0, |e| e.min);
        self.stack.push(Frame { state, edge: 0, label });
    }

    fn limit_reached(&self) -> bool {
        self.limit.map_or(false, |limit| self.count >= limit)
    }
}

impl<'a> Iterator for FiniteStrings<'a> {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        if self.limit_reached() {
            return None;
        }
        if self.emit_empty {
            self.emit_empty = false;
            self.count += 1;
            return Some(vec![]);
        }
        let a = self.a;
        while let Some(frame) = self.stack.last_mut() {
            let edges = a.edges(frame.state);
            if frame.edge >= edges.len() {
                self.on_path[frame.state] = false;
                self.stack.pop();
                continue;
            }
            let e = edges[frame.edge];
            let label = frame.label;
            if label < e.max {
                frame.label += 1;
            } else {
                frame.edge += 1;
                if let Some(next) = edges.get(frame.edge) {
                    frame.label = next.min;
                }
            }
            self.string.truncate(self.stack.len() - 1);
            self.string.push(label);
            self.push(e.dest);
            if a.is_accept(e.dest) {
                self.count += 1;
                return Some(self.string.clone());
            }
        }
        None
    }
}
