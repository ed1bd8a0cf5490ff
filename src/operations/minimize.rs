use crate::{
    automaton::Automaton,
    operations::{self, TooComplexToDeterminize},
    util::sparse_set::SparseSet,
};

/// Returns the minimal deterministic automaton accepting the same language
/// as `a`.
///
/// This determinizes `a` (subject to `work_limit`), makes it total and then
/// runs Hopcroft's partition refinement algorithm over the alphabet of start
/// points. The result has no dead states.
pub fn minimize(
    a: &Automaton,
    work_limit: usize,
) -> Result<Automaton, TooComplexToDeterminize> {
    if a.num_states() == 0 || (!a.is_accept(0) && a.num_transitions(0) == 0)
    {
        return Ok(Automaton::new());
    }
    let dfa = operations::determinize(a, work_limit)?;
    let total = operations::totalize(&dfa);
    let minimal = Minimizer::new(&total).run();
    let minimal = operations::remove_dead_states(&minimal);
    debug!(
        "minimized automaton: {} DFA states -> {} states",
        dfa.num_states(),
        minimal.num_states()
    );
    Ok(minimal)
}

struct Minimizer<'a> {
    dfa: &'a Automaton,
    /// The alphabet: every label range between consecutive points is a
    /// single equivalence class.
    points: Vec<u32>,
    /// For each state and class, the states with a transition into that
    /// state on that class.
    in_transitions: Vec<Vec<Vec<usize>>>,
    /// The current partition of states into blocks.
    partitions: Vec<Vec<usize>>,
    /// The block containing each state.
    block_of: Vec<usize>,
    /// Blocks waiting to be used as splitters.
    waiting: Vec<usize>,
    in_waiting: Vec<bool>,
}

impl<'a> Minimizer<'a> {
    /// Creates a minimizer for a deterministic and total automaton.
    fn new(dfa: &'a Automaton) -> Minimizer<'a> {
        let points = dfa.start_points();
        let in_transitions = Minimizer::incoming_transitions(dfa, &points);
        let mut m = Minimizer {
            dfa,
            points,
            in_transitions,
            partitions: vec![],
            block_of: vec![0; dfa.num_states()],
            waiting: vec![],
            in_waiting: vec![],
        };
        m.initial_partitions();
        m
    }

    fn run(mut self) -> Automaton {
        let mut incoming = SparseSet::new(self.dfa.num_states());
        let mut hits: Vec<Vec<usize>> = vec![vec![]; self.dfa.num_states()];
        let mut touched: Vec<usize> = vec![];
        let mut marked = SparseSet::new(self.dfa.num_states());

        while let Some(splitter) = self.waiting.pop() {
            self.in_waiting[splitter] = false;
            let members = self.partitions[splitter].clone();
            for class in 0..self.points.len() {
                self.find_incoming_to(class, &members, &mut incoming);
                if incoming.is_empty() {
                    continue;
                }
                for s in incoming.iter() {
                    let block = self.block_of[s];
                    if hits[block].is_empty() {
                        touched.push(block);
                    }
                    hits[block].push(s);
                }
                for block in touched.drain(..) {
                    let x = std::mem::take(&mut hits[block]);
                    if x.len() < self.partitions[block].len() {
                        self.split(block, x, &mut marked);
                    }
                }
            }
        }
        self.build()
    }

    /// Splits `block` into the states in `x` and the rest.
    fn split(&mut self, block: usize, x: Vec<usize>, marked: &mut SparseSet) {
        marked.clear();
        for &s in x.iter() {
            marked.insert(s);
        }
        let y: Vec<usize> = self.partitions[block]
            .iter()
            .copied()
            .filter(|&s| !marked.contains(s))
            .collect();
        let new_block = self.partitions.len();
        for &s in y.iter() {
            self.block_of[s] = new_block;
        }
        let (xlen, ylen) = (x.len(), y.len());
        self.partitions[block] = x;
        self.partitions.push(y);
        self.in_waiting.push(false);
        if self.in_waiting[block] || ylen < xlen {
            self.push_waiting(new_block);
        } else {
            self.push_waiting(block);
        }
    }

    fn push_waiting(&mut self, block: usize) {
        if !self.in_waiting[block] {
            self.in_waiting[block] = true;
            self.waiting.push(block);
        }
    }

    fn find_incoming_to(
        &self,
        class: usize,
        members: &[usize],
        incoming: &mut SparseSet,
    ) {
        incoming.clear();
        for &s in members {
            for &from in self.in_transitions[s][class].iter() {
                incoming.insert(from);
            }
        }
    }

    fn initial_partitions(&mut self) {
        let (accepting, rejecting): (Vec<usize>, Vec<usize>) =
            (0..self.dfa.num_states()).partition(|&s| self.dfa.is_accept(s));
        for block in [accepting, rejecting] {
            if block.is_empty() {
                continue;
            }
            let id = self.partitions.len();
            for &s in block.iter() {
                self.block_of[s] = id;
            }
            self.partitions.push(block);
            self.in_waiting.push(false);
            self.push_waiting(id);
        }
    }

    fn incoming_transitions(
        dfa: &Automaton,
        points: &[u32],
    ) -> Vec<Vec<Vec<usize>>> {
        let mut incoming = vec![vec![vec![]; points.len()]; dfa.num_states()];
        for s in 0..dfa.num_states() {
            for e in dfa.edges(s) {
                let mut class = points.partition_point(|&p| p < e.min);
                while class < points.len() && points[class] <= e.max {
                    incoming[e.dest][class].push(s);
                    class += 1;
                }
            }
        }
        incoming
    }

    /// Builds the minimal automaton, with the block containing the initial
    /// state numbered first.
    fn build(self) -> Automaton {
        let start_block = self.block_of[0];
        let mut new_ids = vec![0; self.partitions.len()];
        let mut next = 1;
        for (block, id) in new_ids.iter_mut().enumerate() {
            if block != start_block {
                *id = next;
                next += 1;
            }
        }
        let mut order = vec![0; self.partitions.len()];
        for (block, &id) in new_ids.iter().enumerate() {
            order[id] = block;
        }

        let mut result = Automaton::new();
        for &block in order.iter() {
            let s = result.create_state();
            result.set_accept(s, self.dfa.is_accept(self.partitions[block][0]));
        }
        for (id, &block) in order.iter().enumerate() {
            let rep = self.partitions[block][0];
            for e in self.dfa.edges(rep) {
                let dest = new_ids[self.block_of[e.dest]];
                result.add_transition(id, dest, e.min, e.max);
            }
        }
        result.finish_state();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata;

    #[test]
    fn merges_equivalent_states() {
        // Two parallel paths accepting the same strings.
        let mut a = Automaton::new();
        let s0 = a.create_state();
        let s1 = a.create_state();
        let s2 = a.create_state();
        let s3 = a.create_state();
        a.set_accept(s3, true);
        a.add_transition_label(s0, s1, 'a' as u32);
        a.add_transition_label(s0, s2, 'b' as u32);
        a.add_transition_label(s1, s3, 'c' as u32);
        a.add_transition_label(s2, s3, 'c' as u32);
        a.finish_state();
        let m = minimize(&a, 10_000).unwrap();
        assert_eq!(3, m.num_states());
        assert!(operations::same_language(&a, &m));
    }

    #[test]
    fn empty_language() {
        let m = minimize(&automata::make_empty(), 10_000).unwrap();
        assert_eq!(0, m.num_states());
    }

    #[test]
    fn any_string_is_one_state() {
        let a = operations::union(&[
            automata::make_any_string(),
            automata::make_string("abc"),
        ]);
        let m = minimize(&a, 10_000).unwrap();
        assert_eq!(1, m.num_states());
        assert!(m.is_accept(0));
    }
}
