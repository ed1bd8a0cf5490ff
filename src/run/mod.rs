/*!
Execution of automata against input.

A [`RunAutomaton`] determinizes an automaton up front and precomputes a
dense transition table with one row per state and one column per label
class, so that stepping is a table lookup. [`ByteRunAutomaton`] and
[`CharacterRunAutomaton`] specialize it for byte and codepoint input.

When full determinization is too expensive, [`NFARunAutomaton`] instead
determinizes lazily, creating only the subset states that input actually
visits.

Both strategies implement [`ByteRunnable`], which is all that term matching
needs.
*/

use crate::{
    automaton::{Automaton, Transition, MAX_CODE_POINT},
    operations::{self, TooComplexToDeterminize},
    utf8::Utf32ToUtf8,
};

pub use self::nfa::NFARunAutomaton;

mod nfa;
#[cfg(feature = "transducer")]
mod transducer;

/// Marks a missing transition in a dense transition table.
const MISSING: u32 = u32::MAX;

/// An automaton that can be run over bytes.
///
/// The initial state is always `0`. A missing transition is `None`, after
/// which no input can lead to an accepting state.
pub trait ByteRunnable {
    /// Returns the state reached from `state` on `byte`, if any.
    fn step(&self, state: usize, byte: u8) -> Option<usize>;

    /// Returns true if `state` is an accepting state.
    fn is_accept(&self, state: usize) -> bool;

    /// Returns the number of states.
    fn size(&self) -> usize;

    /// Returns true if this automaton accepts `bytes`.
    fn run(&self, bytes: &[u8]) -> bool {
        let mut state = 0;
        for &b in bytes {
            match self.step(state, b) {
                None => return false,
                Some(next) => state = next,
            }
        }
        self.is_accept(state)
    }
}

/// A deterministic automaton with a precomputed dense transition table.
///
/// The label alphabet is split into classes at the automaton's start points.
/// Every state treats all labels of a class the same, so the table stores
/// one destination per state and class. Classes of labels below 256 are
/// looked up directly; larger labels use a binary search over the points.
#[derive(Clone, Debug)]
pub struct RunAutomaton {
    automaton: Automaton,
    alphabet_size: u32,
    points: Box<[u32]>,
    accept: Box<[bool]>,
    /// `table[state * points.len() + class]` is the destination, or
    /// `MISSING`.
    table: Box<[u32]>,
    /// The class of every label below `min(256, alphabet_size)`.
    classmap: Box<[u32]>,
}

impl RunAutomaton {
    /// Builds a run automaton for labels in `0..alphabet_size`,
    /// determinizing `a` first.
    pub fn new(
        a: &Automaton,
        alphabet_size: u32,
        work_limit: usize,
    ) -> Result<RunAutomaton, TooComplexToDeterminize> {
        let a = operations::determinize(a, work_limit)?;
        let points = a.start_points();
        let size = a.num_states().max(1);
        assert!(size < MISSING as usize, "too many states: {}", size);

        let mut accept = vec![false; size];
        let mut table = vec![MISSING; size * points.len()];
        let mut t = Transition::new();
        for s in 0..a.num_states() {
            accept[s] = a.is_accept(s);
            t.source = s;
            for (class, &point) in points.iter().enumerate() {
                if let Some(dest) = a.next(&mut t, point) {
                    table[s * points.len() + class] = dest as u32;
                }
            }
        }

        let classmap_len = alphabet_size.min(256) as usize;
        let mut classmap = vec![0; classmap_len];
        let mut i = 0;
        for (label, class) in classmap.iter_mut().enumerate() {
            if i + 1 < points.len() && label as u32 == points[i + 1] {
                i += 1;
            }
            *class = i as u32;
        }
        Ok(RunAutomaton {
            automaton: a,
            alphabet_size,
            points: points.into_boxed_slice(),
            accept: accept.into_boxed_slice(),
            table: table.into_boxed_slice(),
            classmap: classmap.into_boxed_slice(),
        })
    }

    /// Returns the state reached from `state` on `label`, if any.
    #[inline]
    pub fn step(&self, state: usize, label: u32) -> Option<usize> {
        let class = match self.classmap.get(label as usize) {
            Some(&class) => class as usize,
            None => self.char_class(label),
        };
        match self.table[state * self.points.len() + class] {
            MISSING => None,
            dest => Some(dest as usize),
        }
    }

    /// Returns true if `state` is an accepting state.
    #[inline]
    pub fn is_accept(&self, state: usize) -> bool {
        self.accept[state]
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.accept.len()
    }

    /// Returns the alphabet size given at construction.
    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    /// Returns the sorted start points of the label classes.
    pub fn char_intervals(&self) -> &[u32] {
        &self.points
    }

    /// Returns the index of the label class containing `label`.
    pub fn char_class(&self, label: u32) -> usize {
        // The first point is always 0, so this is never 0.
        self.points.partition_point(|&p| p <= label) - 1
    }

    /// Returns the deterministic automaton this table was built from.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}

/// A run automaton over bytes, typically the UTF-8 encoded form of a
/// codepoint automaton.
///
/// # Example
///
/// ```
/// use term_automata::{automata, run::{ByteRunAutomaton, ByteRunnable}};
///
/// let a = automata::make_string("añb");
/// let run = ByteRunAutomaton::new(&a, false, 10_000).unwrap();
/// assert!(run.run("añb".as_bytes()));
/// assert!(!run.run(b"anb"));
/// ```
#[derive(Clone, Debug)]
pub struct ByteRunAutomaton {
    run: RunAutomaton,
}

impl ByteRunAutomaton {
    /// Builds a byte run automaton.
    ///
    /// Unless `is_binary` is set, `a` is taken to be a codepoint automaton
    /// and is converted to UTF-8 first.
    pub fn new(
        a: &Automaton,
        is_binary: bool,
        work_limit: usize,
    ) -> Result<ByteRunAutomaton, TooComplexToDeterminize> {
        let run = if is_binary {
            RunAutomaton::new(a, 256, work_limit)?
        } else {
            let utf8 = Utf32ToUtf8::new().convert(a);
            RunAutomaton::new(&utf8, 256, work_limit)?
        };
        Ok(ByteRunAutomaton { run })
    }

    /// Returns the state reached from `state` on `byte`, if any.
    #[inline]
    pub fn step(&self, state: usize, byte: u8) -> Option<usize> {
        self.run.step(state, byte as u32)
    }

    /// Returns true if `state` is an accepting state.
    #[inline]
    pub fn is_accept(&self, state: usize) -> bool {
        self.run.is_accept(state)
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.run.size()
    }

    /// Returns the deterministic byte automaton this was built from.
    pub fn automaton(&self) -> &Automaton {
        self.run.automaton()
    }
}

impl ByteRunnable for ByteRunAutomaton {
    fn step(&self, state: usize, byte: u8) -> Option<usize> {
        ByteRunAutomaton::step(self, state, byte)
    }

    fn is_accept(&self, state: usize) -> bool {
        ByteRunAutomaton::is_accept(self, state)
    }

    fn size(&self) -> usize {
        ByteRunAutomaton::size(self)
    }
}

/// A run automaton over Unicode codepoints.
#[derive(Clone, Debug)]
pub struct CharacterRunAutomaton {
    run: RunAutomaton,
}

impl CharacterRunAutomaton {
    /// Builds a codepoint run automaton, determinizing `a` first.
    pub fn new(
        a: &Automaton,
        work_limit: usize,
    ) -> Result<CharacterRunAutomaton, TooComplexToDeterminize> {
        let run = RunAutomaton::new(a, MAX_CODE_POINT + 1, work_limit)?;
        Ok(CharacterRunAutomaton { run })
    }

    /// Returns true if this automaton accepts `s`.
    pub fn run(&self, s: &str) -> bool {
        let mut state = 0;
        for c in s.chars() {
            match self.run.step(state, c as u32) {
                None => return false,
                Some(next) => state = next,
            }
        }
        self.run.is_accept(state)
    }

    /// Returns true if this automaton accepts the given codepoints.
    pub fn run_labels(&self, labels: &[u32]) -> bool {
        let mut state = 0;
        for &label in labels {
            match self.run.step(state, label) {
                None => return false,
                Some(next) => state = next,
            }
        }
        self.run.is_accept(state)
    }

    /// Returns the state reached from `state` on `label`, if any.
    pub fn step(&self, state: usize, label: u32) -> Option<usize> {
        self.run.step(state, label)
    }

    /// Returns true if `state` is an accepting state.
    pub fn is_accept(&self, state: usize) -> bool {
        self.run.is_accept(state)
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.run.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{automata, operations};

    #[test]
    fn class_map() {
        let a = automata::make_char_range('b' as u32, 'd' as u32);
        let run = RunAutomaton::new(&a, 256, 10_000).unwrap();
        assert_eq!(&[0, 'b' as u32, 'e' as u32], run.char_intervals());
        assert_eq!(0, run.char_class('a' as u32));
        assert_eq!(1, run.char_class('c' as u32));
        assert_eq!(2, run.char_class(255));
        assert_eq!(Some(1), run.step(0, 'd' as u32));
        assert_eq!(None, run.step(0, 'e' as u32));
        assert_eq!(None, run.step(1, 'c' as u32));
        assert!(run.is_accept(1));
    }

    #[test]
    fn empty_automaton() {
        let run = ByteRunAutomaton::new(&automata::make_empty(), true, 10_000)
            .unwrap();
        assert_eq!(1, run.size());
        assert!(!run.run(b""));
        assert!(!run.run(b"a"));
    }

    #[test]
    fn byte_run_converts_utf8() {
        let a = operations::concatenate(&[
            automata::make_string("x"),
            automata::make_any_char(),
        ]);
        let run = ByteRunAutomaton::new(&a, false, 10_000).unwrap();
        assert!(run.run("x☃".as_bytes()));
        assert!(run.run("x\u{10FFFF}".as_bytes()));
        assert!(run.run(b"xa"));
        assert!(!run.run(b"x"));
        assert!(!run.run(b"x\xFF"));
        assert!(!run.run("x☃a".as_bytes()));
    }

    #[test]
    fn byte_run_binary() {
        let a = automata::make_binary(b"\xFF\x00");
        let run = ByteRunAutomaton::new(&a, true, 10_000).unwrap();
        assert!(run.run(b"\xFF\x00"));
        assert!(!run.run(b"\xFF"));
    }

    #[test]
    fn character_run() {
        let a = operations::repeat(&automata::make_string_union(&["ab", "☃"]));
        let run = CharacterRunAutomaton::new(&a, 10_000).unwrap();
        assert!(run.run(""));
        assert!(run.run("ab☃ab"));
        assert!(!run.run("a☃"));
        assert!(run.run_labels(&[0x2603]));
    }

    #[test]
    fn too_complex() {
        // (a|b)*a(a|b){12} has no small DFA.
        let ab = automata::make_char_range('a' as u32, 'b' as u32);
        let a = operations::concatenate(&[
            operations::repeat(&ab),
            automata::make_char('a' as u32),
            operations::repeat_range(&ab, 12, 12),
        ]);
        assert!(CharacterRunAutomaton::new(&a, 100).is_err());
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RunAutomaton>();
        assert_send_sync::<ByteRunAutomaton>();
        assert_send_sync::<CharacterRunAutomaton>();
    }
}
