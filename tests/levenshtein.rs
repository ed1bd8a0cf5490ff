use term_automata::{
    compiled::CompiledAutomaton,
    levenshtein::{LevenshteinAutomata, MAXIMUM_SUPPORTED_DISTANCE},
    operations,
};

use crate::util::language;

#[test]
fn distance_one() {
    let lev = LevenshteinAutomata::new("abc", false);
    let a = lev.to_automaton(1).unwrap();
    for s in ["abc", "ab", "bc", "abcd", "xabc", "axc", "abx", "ac"] {
        assert!(operations::run(&a, s), "{:?}", s);
    }
    for s in ["a", "c", "bac", "xyc", "abcde", "cba"] {
        assert!(!operations::run(&a, s), "{:?}", s);
    }
}

#[test]
fn distance_zero_is_the_word() {
    let lev = LevenshteinAutomata::new("abc", true);
    let a = lev.to_automaton(0).unwrap();
    let words: Vec<String> = language(&a).into_iter().collect();
    assert_eq!(vec!["abc".to_string()], words);
}

#[test]
fn deterministic_and_minimizes_to_same_language() {
    for word in ["search", "automaton", "aaaa"] {
        for n in 1..=MAXIMUM_SUPPORTED_DISTANCE {
            for &t in &[false, true] {
                let a = LevenshteinAutomata::new(word, t).to_automaton(n).unwrap();
                assert!(a.is_deterministic());
                let live = operations::remove_dead_states(&a);
                let min = operations::minimize(&live, 10_000).unwrap();
                assert!(operations::same_language(
                    &operations::remove_dead_states(&min),
                    &live
                ));
            }
        }
    }
}

#[test]
fn empty_word() {
    let a = LevenshteinAutomata::new("", false).to_automaton(2).unwrap();
    for s in ["", "a", "ab", "☃☃"] {
        assert!(operations::run(&a, s), "{:?}", s);
    }
    assert!(!operations::run(&a, "abc"));
}

#[test]
fn compiled_over_utf8() {
    let a = LevenshteinAutomata::new("naïve", true).to_automaton(1).unwrap();
    let c = CompiledAutomaton::new(&a);
    assert!(c.run("naïve".as_bytes()));
    assert!(c.run("naive".as_bytes()));
    assert!(!c.run("aïnve".as_bytes()));
    assert!(!c.run("niave".as_bytes()));
    assert!(c.run("naïev".as_bytes()));
    assert!(!c.run(b"nave\xFF"));
    // One insertion away from "naïve" and the greatest such term below the
    // probe, since "naïwe" < "naïwve" < "naïwz".
    assert_eq!(Some("naïwve".as_bytes().to_vec()), c.floor("naïwz".as_bytes()));
}
