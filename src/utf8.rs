/*!
Conversion of codepoint automata into UTF-8 byte automata.

Term dictionaries store terms as UTF-8 bytes, so matching a codepoint
automaton against them requires an equivalent automaton over bytes. Every
codepoint range transition is replaced by paths of byte range transitions
that accept exactly the UTF-8 encodings of the codepoints in the range.
*/

use regex_syntax::utf8::{Utf8Range, Utf8Sequences};

use crate::{
    automaton::{self, Automaton, MAX_CODE_POINT},
    util::fnv,
};

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_END: u32 = 0xDFFF;

/// Converts automata over Unicode codepoints into automata over the bytes
/// of their UTF-8 encodings.
///
/// Ranges are split at the boundaries between 1, 2, 3 and 4 byte encodings
/// and at byte boundaries within each, so that no overlong encoding is ever
/// accepted. Surrogate codepoints (`U+D800..=U+DFFF`) have no UTF-8
/// encoding and are dropped. The result is usually not deterministic.
///
/// # Example
///
/// ```
/// use term_automata::{automata, operations, utf8::Utf32ToUtf8};
///
/// let a = automata::make_string("☃");
/// let b = Utf32ToUtf8::new().convert(&a);
/// assert!(operations::run_labels(&b, &[0xE2, 0x98, 0x83]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Utf32ToUtf8 {
    /// Intermediate states already built for a sequence of trailing byte
    /// ranges leading to a destination, so that parallel paths share
    /// their suffixes.
    suffixes: fnv::HashMap<(usize, Vec<(u8, u8)>), usize>,
}

impl Utf32ToUtf8 {
    /// Creates a new converter.
    pub fn new() -> Utf32ToUtf8 {
        Utf32ToUtf8::default()
    }

    /// Returns a byte automaton accepting the UTF-8 encodings of the
    /// strings accepted by `utf32`.
    ///
    /// Only states reachable from the initial state are converted.
    pub fn convert(&mut self, utf32: &Automaton) -> Automaton {
        self.suffixes.clear();
        if utf32.num_states() == 0 {
            return Automaton::new();
        }
        let mut map = vec![usize::MAX; utf32.num_states()];
        let mut utf8 = automaton::Builder::new();
        let start = utf8.create_state();
        utf8.set_accept(start, utf32.is_accept(0));
        map[0] = start;

        let mut pending = vec![0];
        while let Some(s) = pending.pop() {
            let from = map[s];
            for t in utf32.transitions(s) {
                if map[t.dest] == usize::MAX {
                    let to = utf8.create_state();
                    utf8.set_accept(to, utf32.is_accept(t.dest));
                    map[t.dest] = to;
                    pending.push(t.dest);
                }
                self.convert_edge(&mut utf8, from, map[t.dest], t.min, t.max);
            }
        }
        let result = utf8.finish();
        trace!(
            "converted UTF-32 automaton with {} states to UTF-8 automaton \
             with {} states",
            utf32.num_states(),
            result.num_states()
        );
        result
    }

    fn convert_edge(
        &mut self,
        utf8: &mut automaton::Builder,
        from: usize,
        to: usize,
        min: u32,
        max: u32,
    ) {
        let max = max.min(MAX_CODE_POINT);
        if min > max {
            return;
        }
        if min < SURROGATE_START {
            self.convert_scalars(utf8, from, to, min, max.min(SURROGATE_START - 1));
        }
        if max > SURROGATE_END {
            self.convert_scalars(utf8, from, to, min.max(SURROGATE_END + 1), max);
        }
    }

    /// Converts a range of codepoints that contains no surrogates.
    fn convert_scalars(
        &mut self,
        utf8: &mut automaton::Builder,
        from: usize,
        to: usize,
        min: u32,
        max: u32,
    ) {
        let (start, end) = match (char::from_u32(min), char::from_u32(max)) {
            (Some(start), Some(end)) => (start, end),
            _ => return,
        };
        for seq in Utf8Sequences::new(start, end) {
            let ranges = seq.as_slice();
            let (first, rest) = ranges.split_at(1);
            let next = self.suffix_state(utf8, rest, to);
            utf8.add_transition(
                from,
                next,
                first[0].start as u32,
                first[0].end as u32,
            );
        }
    }

    /// Returns a state from which the given byte ranges, in order, lead to
    /// `to`. An empty sequence of ranges is `to` itself.
    fn suffix_state(
        &mut self,
        utf8: &mut automaton::Builder,
        ranges: &[Utf8Range],
        to: usize,
    ) -> usize {
        let (first, rest) = match ranges.split_first() {
            None => return to,
            Some(split) => split,
        };
        let key = (to, ranges.iter().map(|r| (r.start, r.end)).collect());
        if let Some(&s) = self.suffixes.get(&key) {
            return s;
        }
        let next = self.suffix_state(utf8, rest, to);
        let s = utf8.create_state();
        utf8.add_transition(s, next, first.start as u32, first.end as u32);
        self.suffixes.insert(key, s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{automata, operations};

    fn accepts(a: &Automaton, bytes: &[u8]) -> bool {
        let labels: Vec<u32> = bytes.iter().map(|&b| b as u32).collect();
        operations::run_labels(a, &labels)
    }

    #[test]
    fn single_codepoints() {
        let mut conv = Utf32ToUtf8::new();
        for s in ["a", "é", "☃", "𝛃", "\u{7F}", "\u{80}", "\u{FFFF}"] {
            let a = conv.convert(&automata::make_string(s));
            assert!(accepts(&a, s.as_bytes()), "{:?}", s);
        }
    }

    #[test]
    fn length_class_boundaries() {
        let mut conv = Utf32ToUtf8::new();
        let a = conv.convert(&automata::make_char_range(0x7F, 0x800));
        assert!(accepts(&a, "\u{7F}".as_bytes()));
        assert!(accepts(&a, "\u{80}".as_bytes()));
        assert!(accepts(&a, "\u{7FF}".as_bytes()));
        assert!(accepts(&a, "\u{800}".as_bytes()));
        assert!(!accepts(&a, "\u{801}".as_bytes()));
        assert!(!accepts(&a, "\u{7E}".as_bytes()));
        // Overlong encoding of U+007F.
        assert!(!accepts(&a, &[0xC1, 0xBF]));
    }

    #[test]
    fn surrogates_dropped() {
        let mut conv = Utf32ToUtf8::new();
        let a = conv.convert(&automata::make_char_range(0xD000, 0xE000));
        assert!(accepts(&a, "\u{D7FF}".as_bytes()));
        assert!(accepts(&a, "\u{E000}".as_bytes()));
        assert!(!accepts(&a, &[0xED, 0xA0, 0x80]));
        assert!(operations::is_empty(
            &conv.convert(&automata::make_char_range(0xD800, 0xDFFF))
        ));
    }

    #[test]
    fn preserves_structure() {
        let mut conv = Utf32ToUtf8::new();
        let a = automata::make_string_union(&["ab", "é☃"]);
        let b = conv.convert(&operations::repeat(&a));
        assert!(accepts(&b, b""));
        assert!(accepts(&b, "abé☃ab".as_bytes()));
        assert!(!accepts(&b, "abé".as_bytes()));
    }

    #[test]
    fn empty() {
        let mut conv = Utf32ToUtf8::new();
        assert_eq!(0, conv.convert(&automata::make_empty()).num_states());
    }
}
