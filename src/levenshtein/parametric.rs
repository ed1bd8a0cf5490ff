/*!
Parametric descriptions of Levenshtein automata.

The Levenshtein automaton for a word `w` and a maximum distance `n` has the
same shape for every word of the same length: what varies is only which
positions of the word match each input character. Following Schulz and
Mihov, "Fast String Correction with Levenshtein-Automata", a state is a set
of positions `i#e` (word offset `i` reached with `e` edits) taken relative
to the smallest offset, and a transition depends only on the *characteristic
vector* of the input character against the next `2n + 1` characters of the
word.

The transition tables for each supported `(n, transpositions)` pair are
stored bit-packed in the `tables` module. The construction that produces
them lives in this module's tests, which check the stored tables against it.
*/

use super::tables::{LEV1, LEV1T, LEV2, LEV2T};

/// Bit-packed unsigned values of a fixed width.
#[derive(Debug)]
pub(super) struct Packed {
    pub(super) bits: u32,
    pub(super) data: &'static [u64],
}

impl Packed {
    fn get(&self, index: usize) -> u32 {
        unpack(self.data, index, self.bits)
    }
}

/// Reads the `index`th value of `bits` bits from values packed
/// least-significant bit first into `data`. A value may straddle two words.
pub fn unpack(data: &[u64], index: usize, bits: u32) -> u32 {
    assert!(0 < bits && bits <= 32, "invalid bits per value: {}", bits);
    let loc = index * bits as usize;
    let (word, start) = (loc >> 6, (loc & 63) as u32);
    let mask = (1u64 << bits) - 1;
    if start + bits <= 64 {
        ((data[word] >> start) & mask) as u32
    } else {
        let part = 64 - start;
        let low = data[word] >> start;
        let high = data[word + 1] << part;
        ((low | high) & mask) as u32
    }
}

/// The transition tables of every word length, for one maximum distance.
#[derive(Debug)]
pub(super) struct Tables {
    /// Per state, the minimum of `errors - offset` over its non-transposed
    /// positions.
    pub(super) min_errors: &'static [i32],
    /// Indexed by characteristic vector width, from `0` to `2n + 1`. Entry
    /// `vector * num_states + state` is the destination plus one, or `0`
    /// when there is none.
    pub(super) to_states: &'static [Packed],
    /// Laid out like `to_states`: how far the destination's base offset
    /// moves.
    pub(super) offset_incrs: &'static [Packed],
}

impl Tables {
    fn num_states(&self) -> usize {
        self.min_errors.len()
    }
}

fn tables(n: u32, transpositions: bool) -> &'static Tables {
    match (n, transpositions) {
        (1, false) => &LEV1,
        (1, true) => &LEV1T,
        (2, false) => &LEV2,
        (2, true) => &LEV2T,
        _ => panic!("unsupported maximum edit distance: {}", n),
    }
}

/// The parametric Levenshtein automaton for words of one length and one
/// maximum edit distance.
///
/// Absolute states combine a parametric state with the base offset into the
/// word: `state * (w + 1) + offset`. State `0` is the initial state.
#[derive(Clone, Copy, Debug)]
pub struct ParametricDescription {
    w: usize,
    n: u32,
    tables: &'static Tables,
}

impl ParametricDescription {
    /// Returns the description for words of length `w` and at most `n`
    /// edits, where `n` is `1` or `2`.
    ///
    /// # Panics
    ///
    /// When `n` is not `1` or `2`.
    pub fn new(w: usize, n: u32, transpositions: bool) -> ParametricDescription {
        ParametricDescription { w, n, tables: tables(n, transpositions) }
    }

    /// Returns the number of absolute states.
    pub fn size(&self) -> usize {
        self.tables.num_states() * (self.w + 1)
    }

    /// Returns true if the absolute state accepts.
    pub fn is_accept(&self, abs_state: usize) -> bool {
        let state = abs_state / (self.w + 1);
        let offset = abs_state % (self.w + 1);
        let remaining = (self.w - offset) as i64;
        remaining + self.tables.min_errors[state] as i64 <= self.n as i64
    }

    /// Returns the word offset of the absolute state.
    pub fn position(&self, abs_state: usize) -> usize {
        abs_state % (self.w + 1)
    }

    /// Returns the absolute state reached from `abs_state` on a character
    /// with characteristic vector `vector` over the word starting at
    /// `position`, or `None` if no edits remain.
    pub fn transition(
        &self,
        abs_state: usize,
        position: usize,
        vector: u32,
    ) -> Option<usize> {
        let state = abs_state / (self.w + 1);
        let offset = abs_state % (self.w + 1);
        let width = (self.w - position).min(2 * self.n as usize + 1);
        let loc = vector as usize * self.tables.num_states() + state;
        let to = self.tables.to_states[width].get(loc);
        if to == 0 {
            return None;
        }
        let offset = offset + self.tables.offset_incrs[width].get(loc) as usize;
        // Unreachable states can drift past the end of the word.
        if offset > self.w {
            return None;
        }
        Some((to as usize - 1) * (self.w + 1) + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::fnv;

    /// A position within the word, relative to the smallest offset of the
    /// state it belongs to.
    ///
    /// A transposed position `i#e_t` has read the character at `i + 1` and
    /// must read the character at `i` next to complete the transposition.
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
    struct Position {
        offset: u32,
        errors: u32,
        transposed: bool,
    }

    impl Position {
        fn new(offset: u32, errors: u32) -> Position {
            Position { offset, errors, transposed: false }
        }

        fn transposed(offset: u32, errors: u32) -> Position {
            Position { offset, errors, transposed: true }
        }

        /// Returns true if every string accepted from `other` is accepted
        /// from `self`.
        fn subsumes(&self, other: &Position) -> bool {
            if self.errors >= other.errors {
                return false;
            }
            let budget = other.errors - self.errors;
            match (self.transposed, other.transposed) {
                (false, false) => {
                    self.offset.abs_diff(other.offset) <= budget
                }
                (false, true) => {
                    self.offset.abs_diff(other.offset + 1) <= budget
                }
                (true, true) => self.offset == other.offset,
                (true, false) => false,
            }
        }
    }

    /// The tables for one maximum distance, as built from positions.
    struct Built {
        min_errors: Vec<i32>,
        to_states: Vec<(u32, Vec<u64>)>,
        offset_incrs: Vec<(u32, Vec<u64>)>,
    }

    /// Packs `values` with the fewest bits that fit the largest one.
    fn pack(values: &[u32]) -> (u32, Vec<u64>) {
        let max = values.iter().copied().max().unwrap_or(0);
        let bits = (32 - max.leading_zeros()).max(1);
        let mut data = vec![0u64; (values.len() * bits as usize + 63) / 64];
        for (i, &v) in values.iter().enumerate() {
            let loc = i * bits as usize;
            let (word, start) = (loc >> 6, (loc & 63) as u32);
            data[word] |= (v as u64) << start;
            if start + bits > 64 {
                data[word + 1] |= (v as u64) >> (64 - start);
            }
        }
        (bits, data)
    }

    /// Computes the successor of a set of positions on a character whose
    /// characteristic vector has the given width, with the bit for
    /// relative offset `0` in the most significant place.
    ///
    /// A width below `2n + 1` means the word ends `width` characters after
    /// the base offset. Returns the normalized successor and the amount the
    /// base offset moves, or `None` when no position survives.
    fn step(
        set: &[Position],
        n: u32,
        transpositions: bool,
        width: u32,
        vector: u32,
    ) -> Option<(Vec<Position>, u32)> {
        let matches =
            |i: u32| i < width && (vector >> (width - 1 - i)) & 1 == 1;
        let mut next = vec![];
        for p in set.iter() {
            let (i, e) = (p.offset, p.errors);
            if p.transposed {
                if i + 1 < width && matches(i) {
                    next.push(Position::new(i + 2, e));
                }
                continue;
            }
            if matches(i) {
                next.push(Position::new(i + 1, e));
            }
            if e < n {
                // Insertion.
                next.push(Position::new(i, e + 1));
                if i < width {
                    // Substitution.
                    next.push(Position::new(i + 1, e + 1));
                }
                // Deleting j characters, then a match.
                for j in 1..=(n - e) {
                    if matches(i + j) {
                        next.push(Position::new(i + j + 1, e + j));
                    }
                }
                if transpositions && matches(i + 1) {
                    next.push(Position::transposed(i, e + 1));
                }
            }
        }
        next.sort();
        next.dedup();
        let reduced: Vec<Position> = next
            .iter()
            .filter(|q| !next.iter().any(|p| p.subsumes(q)))
            .copied()
            .collect();
        let shift = reduced.iter().map(|p| p.offset).min()?;
        let normalized = reduced
            .into_iter()
            .map(|p| Position { offset: p.offset - shift, ..p })
            .collect();
        Some((normalized, shift))
    }

    /// Explores every state reachable from `{0#0}`, numbering states in the
    /// order they are discovered.
    fn build(n: u32, transpositions: bool) -> Built {
        let initial = vec![Position::new(0, 0)];
        let mut states = vec![initial.clone()];
        let mut ids = fnv::new_map();
        ids.insert(initial, 0);
        let max_width = 2 * n + 1;
        // Per width, (state, vector) -> (destination, offset increment).
        let mut steps: Vec<Vec<(usize, u32, Option<(usize, u32)>)>> =
            vec![vec![]; max_width as usize + 1];

        let mut i = 0;
        while i < states.len() {
            for width in 0..=max_width {
                for vector in 0..(1u32 << width) {
                    let next =
                        step(&states[i], n, transpositions, width, vector);
                    let dest = next.map(|(set, shift)| {
                        let id = match ids.get(&set) {
                            Some(&id) => id,
                            None => {
                                let id = states.len();
                                states.push(set.clone());
                                ids.insert(set, id);
                                id
                            }
                        };
                        (id, shift)
                    });
                    steps[width as usize].push((i, vector, dest));
                }
            }
            i += 1;
        }

        let num_states = states.len();
        let mut to_states = vec![];
        let mut offset_incrs = vec![];
        for (width, entries) in steps.iter().enumerate() {
            let len = num_states << width;
            let mut to = vec![0; len];
            let mut incrs = vec![0; len];
            for &(state, vector, dest) in entries.iter() {
                if let Some((dest, shift)) = dest {
                    let loc = vector as usize * num_states + state;
                    to[loc] = dest as u32 + 1;
                    incrs[loc] = shift;
                }
            }
            to_states.push(pack(&to));
            offset_incrs.push(pack(&incrs));
        }
        let min_errors = states
            .iter()
            .map(|set| {
                set.iter()
                    .filter(|p| !p.transposed)
                    .map(|p| p.errors as i32 - p.offset as i32)
                    .min()
                    .unwrap_or(n as i32 + 1)
            })
            .collect();
        Built { min_errors, to_states, offset_incrs }
    }

    fn same_packed(stored: &[Packed], built: &[(u32, Vec<u64>)]) -> bool {
        stored.len() == built.len()
            && stored
                .iter()
                .zip(built.iter())
                .all(|(s, (bits, data))| s.bits == *bits && s.data == &data[..])
    }

    #[test]
    fn tables_match_construction() {
        for &(n, t) in &[(1, false), (1, true), (2, false), (2, true)] {
            let stored = tables(n, t);
            let built = build(n, t);
            assert_eq!(built.min_errors, stored.min_errors, "n={} t={}", n, t);
            assert!(
                same_packed(stored.to_states, &built.to_states),
                "to_states differ for n={} t={}",
                n,
                t
            );
            assert!(
                same_packed(stored.offset_incrs, &built.offset_incrs),
                "offset_incrs differ for n={} t={}",
                n,
                t
            );
        }
    }

    #[test]
    fn unpack_straddling() {
        let values: Vec<u32> = (0..100).map(|i| (i * 7) % 23).collect();
        let (bits, data) = pack(&values);
        assert_eq!(5, bits);
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(v, unpack(&data, i, bits), "index {}", i);
        }
        // 13 values of 5 bits end at bit 65.
        let data = [u64::MAX << 60, 0b1];
        assert_eq!(0b11111, unpack(&data, 12, 5));
    }

    #[test]
    fn subsumption() {
        assert!(Position::new(0, 0).subsumes(&Position::new(1, 1)));
        assert!(!Position::new(0, 0).subsumes(&Position::new(2, 1)));
        assert!(!Position::new(0, 1).subsumes(&Position::new(0, 1)));
        assert!(Position::new(1, 0).subsumes(&Position::transposed(0, 1)));
        assert!(!Position::transposed(0, 1).subsumes(&Position::new(0, 2)));
    }

    #[test]
    fn initial_state() {
        // The empty string is two edits away from "ab" but one from "a".
        let d = ParametricDescription::new(2, 1, false);
        assert!(!d.is_accept(0));
        let d = ParametricDescription::new(1, 1, false);
        assert!(d.is_accept(0));
        assert_eq!(0, d.position(0));
    }

    #[test]
    fn exact_match_advances() {
        let d = ParametricDescription::new(3, 1, false);
        // Reading the first character: the full-width vector is 100.
        let s = d.transition(0, 0, 0b100).unwrap();
        assert_eq!(1, d.position(s));
        let s = d.transition(s, 1, 0b10).unwrap();
        let s = d.transition(s, 2, 0b1).unwrap();
        assert_eq!(3, d.position(s));
        assert!(d.is_accept(s));
    }

    #[test]
    fn table_sizes() {
        for &(n, t) in &[(1, false), (1, true), (2, false), (2, true)] {
            let tables = tables(n, t);
            assert_eq!(2 * n as usize + 2, tables.to_states.len());
            assert_eq!(0, tables.min_errors[0]);
        }
        assert_eq!(5, tables(1, false).num_states());
        assert_eq!(6, tables(1, true).num_states());
        assert_eq!(30, tables(2, false).num_states());
        assert_eq!(42, tables(2, true).num_states());
    }
}
