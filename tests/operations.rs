use std::collections::BTreeSet;

use quickcheck::quickcheck;
use term_automata::{
    automata,
    operations::{self, DEFAULT_DETERMINIZE_WORK_LIMIT as LIMIT},
    Automaton,
};

use crate::util::{all_strings, canonical, language, words};

fn union_of(words: &[String]) -> Automaton {
    let refs: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
    automata::make_string_union(&refs)
}

fn set(words: &[String]) -> BTreeSet<String> {
    words.iter().cloned().collect()
}

quickcheck! {
    fn prop_union(a: Vec<Vec<u8>>, b: Vec<Vec<u8>>) -> bool {
        let (a, b) = (words(&a), words(&b));
        let got = language(&operations::union(&[union_of(&a), union_of(&b)]));
        got == set(&a).union(&set(&b)).cloned().collect()
    }

    fn prop_intersection(a: Vec<Vec<u8>>, b: Vec<Vec<u8>>) -> bool {
        let (a, b) = (words(&a), words(&b));
        let got = language(&operations::intersection(&union_of(&a), &union_of(&b)));
        got == set(&a).intersection(&set(&b)).cloned().collect()
    }

    fn prop_minus(a: Vec<Vec<u8>>, b: Vec<Vec<u8>>) -> bool {
        let (a, b) = (words(&a), words(&b));
        let got = operations::minus(&union_of(&a), &union_of(&b), LIMIT).unwrap();
        language(&got) == set(&a).difference(&set(&b)).cloned().collect()
    }

    fn prop_concatenate(a: Vec<Vec<u8>>, b: Vec<Vec<u8>>) -> bool {
        let (a, b) = (words(&a), words(&b));
        let got = language(&operations::concatenate(&[union_of(&a), union_of(&b)]));
        let mut expected = BTreeSet::new();
        for x in a.iter() {
            for y in b.iter() {
                expected.insert(format!("{}{}", x, y));
            }
        }
        got == expected
    }

    fn prop_reverse_twice(a: Vec<Vec<u8>>) -> bool {
        let a = union_of(&words(&a));
        let twice = operations::reverse(&operations::reverse(&a));
        operations::same_language(&canonical(&a), &canonical(&twice))
    }

    fn prop_minimize_is_minimal(a: Vec<Vec<u8>>) -> bool {
        // A string union is already minimal, so minimizing a redundant
        // union of it with itself must give back the same number of live
        // states.
        let a = union_of(&words(&a));
        let doubled = operations::union(&[a.clone(), a.clone()]);
        let min = canonical(&doubled);
        operations::same_language(&canonical(&a), &min)
            && min.num_states() == canonical(&a).num_states()
    }

    fn prop_complement_twice(a: Vec<Vec<u8>>) -> bool {
        let a = union_of(&words(&a));
        let once = operations::complement(&a, LIMIT).unwrap();
        let twice = operations::complement(&once, LIMIT).unwrap();
        operations::same_language(&canonical(&a), &canonical(&twice))
    }

    fn prop_subset_of_union(a: Vec<Vec<u8>>, b: Vec<Vec<u8>>) -> bool {
        let (a, b) = (union_of(&words(&a)), union_of(&words(&b)));
        let u = canonical(&operations::union(&[a.clone(), b]));
        operations::subset_of(&canonical(&a), &u)
    }
}

#[test]
fn repeat_range_languages() {
    let a = automata::make_string("ab");
    let r = operations::repeat_range(&a, 1, 3);
    let expected: BTreeSet<String> =
        ["ab", "abab", "ababab"].iter().map(|s| s.to_string()).collect();
    assert_eq!(expected, language(&r));

    let r = operations::repeat_range(&a, 0, 0);
    assert_eq!(vec![String::new()], language(&r).into_iter().collect::<Vec<_>>());

    let r = operations::repeat_min(&a, 2);
    assert!(!operations::run(&r, "ab"));
    assert!(operations::run(&r, "ababababab"));
    assert!(!operations::is_finite(&r));
}

#[test]
fn repeat_of_empty_language_is_empty_string() {
    let r = operations::repeat(&automata::make_empty());
    assert!(operations::run(&r, ""));
    assert!(!operations::run(&r, "a"));
}

#[test]
fn emptiness_and_totality() {
    assert!(operations::is_empty(&automata::make_empty()));
    assert!(!operations::is_empty(&automata::make_empty_string()));
    let any = automata::make_any_string();
    assert!(operations::is_total(&any));
    assert!(!operations::is_total(&automata::make_any_char()));
    let complement = operations::complement(&any, LIMIT).unwrap();
    assert!(operations::is_empty(&complement));
}

#[test]
fn determinize_matches_nfa() {
    let a = operations::union(&[
        automata::make_string("abc"),
        operations::concatenate(&[
            automata::make_char_range('a' as u32, 'b' as u32),
            operations::repeat(&automata::make_char('c' as u32)),
        ]),
    ]);
    assert!(!a.is_deterministic());
    let d = operations::determinize(&a, LIMIT).unwrap();
    assert!(d.is_deterministic());
    for s in all_strings(&['a', 'b', 'c'], 5) {
        assert_eq!(operations::run(&a, &s), operations::run(&d, &s), "{:?}", s);
    }
}

#[test]
fn determinize_work_limit() {
    // The classic exponential blowup: the n-th character from the end is
    // an 'a'.
    let a = operations::concatenate(&[
        automata::make_any_string(),
        automata::make_char('a' as u32),
        operations::repeat_range(&automata::make_any_char(), 12, 12),
    ]);
    let err = operations::determinize(&a, 100).unwrap_err();
    assert_eq!(100, err.limit());
    assert!(err.automaton().is_some());
    assert!(err.to_string().contains("100"));
}

#[test]
fn common_prefix_and_suffix() {
    let a = automata::make_string_union(&["foobar", "foobaz", "fooqux"]);
    assert_eq!("foo", operations::common_prefix_string(&a));
    let a = automata::make_string_union(&["running", "jumping"]);
    assert_eq!(b"ing".to_vec(), operations::common_suffix_bytes(&a));
}

#[test]
fn singleton_and_finite_strings() {
    let a = automata::make_string("héllo");
    let labels: Vec<u32> = "héllo".chars().map(|c| c as u32).collect();
    assert_eq!(Some(labels), operations::singleton(&a));
    let a = automata::make_string_union(&["a", "b"]);
    assert_eq!(None, operations::singleton(&a));
    assert!(operations::is_finite(&a));
}
