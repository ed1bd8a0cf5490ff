use crate::run::{ByteRunAutomaton, NFARunAutomaton};

// A state of `None` is the dead state reached after a missing transition.
// Unlike a search for a match anywhere in a key, a key must be consumed in
// its entirety to match.

impl fst::Automaton for ByteRunAutomaton {
    type State = Option<usize>;

    #[inline]
    fn start(&self) -> Option<usize> {
        Some(0)
    }

    #[inline]
    fn is_match(&self, state: &Option<usize>) -> bool {
        state.map_or(false, |s| self.is_accept(s))
    }

    #[inline]
    fn accept(&self, state: &Option<usize>, byte: u8) -> Option<usize> {
        state.and_then(|s| self.step(s, byte))
    }

    #[inline]
    fn can_match(&self, state: &Option<usize>) -> bool {
        state.is_some()
    }
}

impl fst::Automaton for NFARunAutomaton {
    type State = Option<usize>;

    #[inline]
    fn start(&self) -> Option<usize> {
        Some(0)
    }

    #[inline]
    fn is_match(&self, state: &Option<usize>) -> bool {
        state.map_or(false, |s| self.is_accept(s))
    }

    #[inline]
    fn accept(&self, state: &Option<usize>, byte: u8) -> Option<usize> {
        state.and_then(|s| self.step(s, byte as u32))
    }

    #[inline]
    fn can_match(&self, state: &Option<usize>) -> bool {
        state.is_some()
    }
}

#[cfg(test)]
mod tests {
    use bstr::BString;
    use fst::{Automaton, IntoStreamer, Set, Streamer};

    use crate::{
        automata, operations,
        run::{ByteRunAutomaton, NFARunAutomaton},
    };

    fn search<A: Automaton, D: AsRef<[u8]>>(
        set: &Set<D>,
        aut: A,
    ) -> Vec<BString> {
        let mut stream = set.search(aut).into_stream();

        let mut results = vec![];
        while let Some(key) = stream.next() {
            results.push(BString::from(key));
        }
        results
    }

    fn ba_any() -> crate::Automaton {
        operations::concatenate(&[
            automata::make_string("ba"),
            automata::make_any_string(),
        ])
    }

    #[test]
    fn byte_run_prefix() {
        let set =
            Set::from_iter(&["a", "bar", "baz", "bé", "wat", "xba", "z"])
                .unwrap();
        let run = ByteRunAutomaton::new(&ba_any(), false, 10_000).unwrap();
        let got = search(&set, &run);
        assert_eq!(got, vec!["bar", "baz"]);
    }

    #[test]
    fn byte_run_non_ascii() {
        let set = Set::from_iter(&["bar", "bz", "bé", "bêta"]).unwrap();
        let a = operations::concatenate(&[
            automata::make_char('b' as u32),
            automata::make_char_range('à' as u32, 'ÿ' as u32),
            automata::make_any_string(),
        ]);
        let run = ByteRunAutomaton::new(&a, false, 10_000).unwrap();
        let got = search(&set, &run);
        assert_eq!(got, vec!["bé", "bêta"]);
    }

    #[test]
    fn nfa_run_matches_byte_run() {
        let set = Set::from_iter(&["ab", "abba", "b", "ba", "baa", "bab"])
            .unwrap();
        let ab = automata::make_char_range('a' as u32, 'b' as u32);
        let a = operations::concatenate(&[
            operations::repeat(&ab),
            automata::make_char('a' as u32),
            ab.clone(),
        ]);
        let dfa = ByteRunAutomaton::new(&a, true, 10_000).unwrap();
        let nfa = NFARunAutomaton::new(&a, 256);
        assert_eq!(search(&set, &dfa), search(&set, &nfa));
        assert_eq!(search(&set, &nfa), vec!["ab", "baa", "bab"]);
    }
}
