use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// A multiset of automaton states used during subset construction.
///
/// Each state carries a reference count. Incrementing adds the state if it
/// isn't present and decrementing to zero removes it. This lets the point
/// sweep in determinization add and remove NFA states as transition ranges
/// begin and end.
#[derive(Clone, Debug, Default)]
pub(crate) struct StateSet {
    counts: BTreeMap<usize, usize>,
    hash: u64,
}

impl StateSet {
    pub(crate) fn new() -> StateSet {
        StateSet::default()
    }

    pub(crate) fn incr(&mut self, state: usize) {
        let count = self.counts.entry(state).or_insert(0);
        if *count == 0 {
            self.hash = self.hash.wrapping_add(mix(state));
        }
        *count += 1;
    }

    pub(crate) fn decr(&mut self, state: usize) {
        let remove = match self.counts.get_mut(&state) {
            None => panic!("state {} not in set", state),
            Some(count) => {
                *count -= 1;
                *count == 0
            }
        };
        if remove {
            self.counts.remove(&state);
            self.hash = self.hash.wrapping_sub(mix(state));
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.counts.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns an immutable, hashable snapshot of the distinct states.
    pub(crate) fn freeze(&self) -> FrozenIntSet {
        FrozenIntSet {
            values: self.counts.keys().copied().collect(),
            hash: self.hash,
        }
    }
}

/// An immutable sorted set of states with a precomputed hash.
///
/// Two frozen sets are equal precisely when they contain the same states.
#[derive(Clone, Debug, Eq)]
pub(crate) struct FrozenIntSet {
    values: Box<[usize]>,
    hash: u64,
}

impl FrozenIntSet {
    /// Builds a frozen set from states in ascending order without duplicates.
    pub(crate) fn from_sorted(values: Vec<usize>) -> FrozenIntSet {
        debug_assert!(values.windows(2).all(|w| w[0] < w[1]));
        let hash = values
            .iter()
            .fold(0u64, |h, &v| h.wrapping_add(mix(v)));
        FrozenIntSet { values: values.into_boxed_slice(), hash }
    }

    pub(crate) fn values(&self) -> &[usize] {
        &self.values
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}

impl PartialEq for FrozenIntSet {
    fn eq(&self, other: &FrozenIntSet) -> bool {
        self.hash == other.hash && self.values == other.values
    }
}

impl Hash for FrozenIntSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// The hash of a set is the wrapping sum of its members' mixed values, so it
// can be maintained incrementally as states enter and leave a StateSet.
fn mix(state: usize) -> u64 {
    let mut x = (state as u64).wrapping_add(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}
