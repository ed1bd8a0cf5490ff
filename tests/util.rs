use std::collections::BTreeSet;

use term_automata::{
    operations::{self, FiniteStrings, DEFAULT_DETERMINIZE_WORK_LIMIT},
    Automaton,
};

/// Maps arbitrary bytes onto words over a three letter alphabet, so that
/// randomly generated word sets overlap often and stay small.
pub fn words(raw: &[Vec<u8>]) -> Vec<String> {
    raw.iter()
        .map(|bytes| {
            bytes.iter().take(6).map(|&b| (b'a' + b % 3) as char).collect()
        })
        .collect()
}

/// Returns the language of a finite automaton as a set of strings.
pub fn language(a: &Automaton) -> BTreeSet<String> {
    FiniteStrings::new(&canonical(a))
        .map(|labels| labels.into_iter().filter_map(char::from_u32).collect())
        .collect()
}

/// Returns the minimal deterministic automaton for `a` without dead states,
/// as required by `operations::same_language`.
pub fn canonical(a: &Automaton) -> Automaton {
    let min = operations::minimize(a, DEFAULT_DETERMINIZE_WORK_LIMIT)
        .expect("minimization within default limit");
    operations::remove_dead_states(&min)
}

/// Returns every string over `alphabet` of at most `max_len` characters.
pub fn all_strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut start = 0;
    for _ in 0..max_len {
        let end = all.len();
        for i in start..end {
            for &c in alphabet {
                let mut s = all[i].clone();
                s.push(c);
                all.push(s);
            }
        }
        start = end;
    }
    all
}
