use std::collections::BTreeSet;

use bstr::ByteSlice;
use quickcheck::quickcheck;
use term_automata::{
    automata,
    operations::{self, FiniteStrings},
    strings::StringsToAutomaton,
};

use crate::util::{canonical, language, words};

quickcheck! {
    fn prop_accepts_exactly(raw: Vec<Vec<u8>>) -> bool {
        let mut ws = words(&raw);
        ws.sort();
        ws.dedup();
        let a = StringsToAutomaton::build(&ws);
        let expected: BTreeSet<String> = ws.into_iter().collect();
        a.is_deterministic() && language(&a) == expected
    }

    fn prop_minimal(raw: Vec<Vec<u8>>) -> bool {
        let mut ws = words(&raw);
        ws.sort();
        let a = StringsToAutomaton::build(&ws);
        if ws.is_empty() {
            return operations::is_empty(&a);
        }
        canonical(&a).num_states() == a.num_states()
    }
}

#[test]
fn binary_union_in_byte_order() {
    let terms: Vec<&[u8]> = vec![b"\xFFz", b"a\x00", b"a", b"\x80\x80"];
    let a = automata::make_binary_string_union(&terms);
    let got: Vec<Vec<u8>> = FiniteStrings::new(&a)
        .map(|labels| labels.into_iter().map(|l| l as u8).collect())
        .collect();
    let mut expected: Vec<Vec<u8>> = terms.iter().map(|t| t.to_vec()).collect();
    expected.sort();
    assert_eq!(
        expected,
        got,
        "expected {:?}, got {:?}",
        expected.iter().map(|t| t.as_bstr()).collect::<Vec<_>>(),
        got.iter().map(|t| t.as_bstr()).collect::<Vec<_>>(),
    );
}

#[test]
fn incremental_builder() {
    let mut builder = StringsToAutomaton::new();
    for word in ["cat", "cats", "dog", "dogs"] {
        let labels: Vec<u32> = word.chars().map(|c| c as u32).collect();
        builder.add(&labels);
    }
    let a = builder.finish();
    // The paths for "cat(s)" and "dog(s)" merge after their second label.
    assert_eq!(6, a.num_states());
    assert!(operations::run(&a, "dogs"));
    assert!(!operations::run(&a, "cog"));
}
