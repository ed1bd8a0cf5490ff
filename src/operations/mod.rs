/*!
Algorithms that combine, transform and analyze automata.

Every operation here takes its inputs by reference and returns a new
automaton. Operations that need a deterministic input determinize it first,
and those that may blow up exponentially take a work limit and return a
[`TooComplexToDeterminize`] error when it is exceeded. A reasonable default
limit is [`DEFAULT_DETERMINIZE_WORK_LIMIT`].

Composition never introduces real epsilon transitions. Instead, an epsilon
transition from `p` to `q` is emulated by copying the finished transitions
of `q` into `p` and making `p` accept when `q` does.
*/

use std::collections::VecDeque;

use crate::{
    automata,
    automaton::{self, Automaton, MAX_CODE_POINT},
    util::{fnv, sparse_set::SparseSet},
};

pub use self::{
    determinize::determinize, error::TooComplexToDeterminize,
    finite::FiniteStrings, minimize::minimize,
};

mod determinize;
mod error;
mod finite;
mod minimize;

/// The default maximum effort that determinization may spend before giving
/// up.
pub const DEFAULT_DETERMINIZE_WORK_LIMIT: usize = 10_000;

/// Returns an automaton accepting the concatenation of the languages of the
/// given automata, in order.
///
/// If any of the automata accepts nothing, then so does the result.
pub fn concatenate(automata: &[Automaton]) -> Automaton {
    let mut result = Automaton::new();
    for a in automata.iter() {
        if a.num_states() == 0 {
            result.finish_state();
            return result;
        }
        for _ in 0..a.num_states() {
            result.create_state();
        }
    }

    let mut offset = 0;
    for (i, a) in automata.iter().enumerate() {
        let n = a.num_states();
        for s in 0..n {
            for e in a.edges(s) {
                result.add_transition(offset + s, offset + e.dest, e.min, e.max);
            }
            if !a.is_accept(s) {
                continue;
            }
            // Chain virtual epsilon transitions into each following automaton
            // for as long as they accept the empty string.
            let mut follow_offset = offset + n;
            let mut upto = i + 1;
            loop {
                let follow = match automata.get(upto) {
                    None => {
                        result.set_accept(offset + s, true);
                        break;
                    }
                    Some(follow) => follow,
                };
                for e in follow.edges(0) {
                    result.add_transition(
                        offset + s,
                        follow_offset + e.dest,
                        e.min,
                        e.max,
                    );
                }
                if !follow.is_accept(0) {
                    break;
                }
                follow_offset += follow.num_states();
                upto += 1;
            }
        }
        offset += n;
    }
    if result.num_states() == 0 {
        result.create_state();
    }
    result.finish_state();
    result
}

/// Returns an automaton accepting the union of the languages of the given
/// automata. The result has no dead states.
pub fn union(automata: &[Automaton]) -> Automaton {
    let mut result = Automaton::new();
    result.create_state();
    for a in automata.iter() {
        result.copy(a);
    }
    let mut offset = 1;
    for a in automata.iter() {
        if a.num_states() == 0 {
            continue;
        }
        result.add_epsilon(0, offset);
        offset += a.num_states();
    }
    result.finish_state();
    remove_dead_states(&result)
}

/// Returns an automaton accepting the language of `a` plus the empty string.
pub fn optional(a: &Automaton) -> Automaton {
    if a.num_states() == 0 {
        return automata::make_empty_string();
    }
    if a.is_accept(0) {
        return a.clone();
    }
    if !has_inbound(a, 0) {
        let mut result = a.clone();
        result.set_accept(0, true);
        return result;
    }
    let mut result = Automaton::new();
    result.create_state();
    result.set_accept(0, true);
    result.copy(a);
    result.add_epsilon(0, 1);
    result.finish_state();
    result
}

/// Returns an automaton accepting the Kleene star of the language of `a`,
/// that is, zero or more concatenated repetitions.
///
/// The Kleene star of the empty language is the empty string.
pub fn repeat(a: &Automaton) -> Automaton {
    if a.num_states() == 0 {
        return automata::make_empty_string();
    }
    if a.is_accept(0) && a.accept_states().count() == 1 {
        // Every accepted string returns to the initial state, so the
        // language already repeats itself.
        return a.clone();
    }
    let mut b = automaton::Builder::new();
    if !has_inbound(a, 0) {
        b.copy(a);
        b.set_accept(0, true);
        for s in a.accept_states().filter(|&s| s != 0) {
            for e in a.edges(0) {
                b.add_transition(s, e.dest, e.min, e.max);
            }
        }
        return b.finish();
    }
    b.create_state();
    b.set_accept(0, true);
    b.copy(a);
    for e in a.edges(0) {
        b.add_transition(0, e.dest + 1, e.min, e.max);
    }
    for s in a.accept_states() {
        for e in a.edges(0) {
            b.add_transition(s + 1, e.dest + 1, e.min, e.max);
        }
    }
    b.finish()
}

/// Returns an automaton accepting `min` or more concatenated repetitions of
/// the language of `a`.
pub fn repeat_min(a: &Automaton, min: usize) -> Automaton {
    if min == 0 {
        return repeat(a);
    }
    let mut parts: Vec<Automaton> = vec![a.clone(); min];
    parts.push(repeat(a));
    concatenate(&parts)
}

/// Returns an automaton accepting between `min` and `max` (inclusive)
/// concatenated repetitions of the language of `a`.
///
/// If `min > max`, the result accepts nothing.
pub fn repeat_range(a: &Automaton, min: usize, max: usize) -> Automaton {
    if min > max {
        return automata::make_empty();
    }
    if a.num_states() == 0 {
        return if min == 0 {
            automata::make_empty_string()
        } else {
            automata::make_empty()
        };
    }
    let b = match min {
        0 => automata::make_empty_string(),
        1 => a.clone(),
        _ => concatenate(&vec![a.clone(); min]),
    };
    let mut prev_accept: Vec<usize> = b.accept_states().collect();
    let mut builder = automaton::Builder::new();
    builder.copy(&b);
    for _ in min..max {
        let offset = builder.num_states();
        builder.copy(a);
        for &s in prev_accept.iter() {
            builder.add_epsilon(s, offset);
        }
        prev_accept = a.accept_states().map(|s| s + offset).collect();
    }
    builder.finish()
}

/// Returns true if some transition leads into `state`.
fn has_inbound(a: &Automaton, state: usize) -> bool {
    (0..a.num_states()).any(|s| a.edges(s).iter().any(|e| e.dest == state))
}

/// Returns a deterministic automaton accepting every string not accepted by
/// `a`. The result has no dead states.
pub fn complement(
    a: &Automaton,
    work_limit: usize,
) -> Result<Automaton, TooComplexToDeterminize> {
    let mut result = totalize(&determinize(a, work_limit)?);
    for s in 0..result.num_states() {
        let accept = result.is_accept(s);
        result.set_accept(s, !accept);
    }
    Ok(remove_dead_states(&result))
}

/// Returns an automaton accepting the strings accepted by `a1` but not by
/// `a2`.
pub fn minus(
    a1: &Automaton,
    a2: &Automaton,
    work_limit: usize,
) -> Result<Automaton, TooComplexToDeterminize> {
    if is_empty(a1) {
        return Ok(automata::make_empty());
    }
    if is_empty(a2) {
        return Ok(a1.clone());
    }
    Ok(intersection(a1, &complement(a2, work_limit)?))
}

/// Returns an automaton accepting the intersection of the languages of `a1`
/// and `a2`, built with the product construction over reachable state
/// pairs. The result has no dead states, and is deterministic when both
/// inputs are.
pub fn intersection(a1: &Automaton, a2: &Automaton) -> Automaton {
    if a1.num_states() == 0 || a2.num_states() == 0 {
        return automata::make_empty();
    }
    let mut c = Automaton::new();
    let mut pairs: fnv::HashMap<(usize, usize), usize> = fnv::new_map();
    let mut worklist = VecDeque::new();
    c.create_state();
    pairs.insert((0, 0), 0);
    worklist.push_back((0, 0, 0));
    while let Some((s1, s2, s)) = worklist.pop_front() {
        c.set_accept(s, a1.is_accept(s1) && a2.is_accept(s2));
        let (t1, t2) = (a1.edges(s1), a2.edges(s2));
        let mut b2 = 0;
        for e1 in t1.iter() {
            while b2 < t2.len() && t2[b2].max < e1.min {
                b2 += 1;
            }
            for e2 in t2[b2..].iter().take_while(|e2| e1.max >= e2.min) {
                if e2.max < e1.min {
                    continue;
                }
                let dest = *pairs.entry((e1.dest, e2.dest)).or_insert_with(|| {
                    let id = c.create_state();
                    worklist.push_back((e1.dest, e2.dest, id));
                    id
                });
                c.add_transition(
                    s,
                    dest,
                    e1.min.max(e2.min),
                    e1.max.min(e2.max),
                );
            }
        }
    }
    c.finish_state();
    remove_dead_states(&c)
}

/// Returns an automaton accepting the same language as `a`, in which every
/// state has a transition on every codepoint.
///
/// Missing transitions lead to a new non-accepting sink state. This only
/// preserves the language of a deterministic automaton with respect to
/// rejected strings, so callers determinize first.
pub fn totalize(a: &Automaton) -> Automaton {
    let mut result = Automaton::new();
    for s in 0..a.num_states() {
        let id = result.create_state();
        result.set_accept(id, a.is_accept(s));
    }
    let dead = result.create_state();
    result.add_transition(dead, dead, 0, MAX_CODE_POINT);
    for s in 0..a.num_states() {
        let mut next_min = 0u32;
        let mut covered_all = false;
        for e in a.edges(s) {
            result.add_transition(s, e.dest, e.min, e.max);
            if !covered_all && e.min > next_min {
                result.add_transition(s, dead, next_min, e.min - 1);
            }
            if e.max >= MAX_CODE_POINT {
                covered_all = true;
            } else if e.max + 1 > next_min {
                next_min = e.max + 1;
            }
        }
        if !covered_all {
            result.add_transition(s, dead, next_min, MAX_CODE_POINT);
        }
    }
    result.finish_state();
    result
}

/// Returns an automaton accepting the reverse of every string accepted by
/// `a`.
///
/// The initial state of `a` becomes the only accepting state, and a new
/// initial state has virtual epsilon transitions to every old accepting
/// state. The result is generally not deterministic.
pub fn reverse(a: &Automaton) -> Automaton {
    if is_empty(a) {
        return Automaton::new();
    }
    let mut b = automaton::Builder::new();
    b.create_state();
    for _ in 0..a.num_states() {
        b.create_state();
    }
    b.set_accept(1, true);
    for s in 0..a.num_states() {
        for e in a.edges(s) {
            b.add_transition(e.dest + 1, s + 1, e.min, e.max);
        }
    }
    let mut result = b.finish();
    for s in a.accept_states() {
        result.add_epsilon(0, s + 1);
    }
    result.finish_state();
    result
}

/// Returns an automaton with the same language as `a` and no dead states:
/// every state is reachable from the initial state and can reach an
/// accepting state.
///
/// If `a` accepts nothing, the result has no states at all.
pub fn remove_dead_states(a: &Automaton) -> Automaton {
    let live = live_states(a);
    let mut map = vec![usize::MAX; a.num_states()];
    let mut result = Automaton::new();
    for s in (0..a.num_states()).filter(|&s| live[s]) {
        map[s] = result.create_state();
        result.set_accept(map[s], a.is_accept(s));
    }
    for s in (0..a.num_states()).filter(|&s| live[s]) {
        for e in a.edges(s).iter().filter(|e| live[e.dest]) {
            result.add_transition(map[s], map[e.dest], e.min, e.max);
        }
    }
    result.finish_state();
    result
}

/// Returns, for each state, whether it is reachable from the initial state
/// and can reach an accepting state.
pub fn live_states(a: &Automaton) -> Vec<bool> {
    let from_initial = live_states_from_initial(a);
    let to_accept = live_states_to_accept(a);
    from_initial.iter().zip(to_accept.iter()).map(|(&x, &y)| x && y).collect()
}

/// Returns true if `a` has any state that is not live.
pub fn has_dead_states(a: &Automaton) -> bool {
    live_states(a).iter().any(|&live| !live)
}

/// Returns true if some state reachable from the initial state cannot
/// reach an accepting state.
pub fn has_dead_states_from_initial(a: &Automaton) -> bool {
    let from_initial = live_states_from_initial(a);
    let to_accept = live_states_to_accept(a);
    from_initial.iter().zip(to_accept.iter()).any(|(&x, &y)| x && !y)
}

/// Returns true if some state that can reach an accepting state is not
/// reachable from the initial state.
pub fn has_dead_states_to_accept(a: &Automaton) -> bool {
    let from_initial = live_states_from_initial(a);
    let to_accept = live_states_to_accept(a);
    from_initial.iter().zip(to_accept.iter()).any(|(&x, &y)| !x && y)
}

fn live_states_from_initial(a: &Automaton) -> Vec<bool> {
    let mut live = vec![false; a.num_states()];
    if a.num_states() == 0 {
        return live;
    }
    let mut stack = vec![0];
    live[0] = true;
    while let Some(s) = stack.pop() {
        for e in a.edges(s) {
            if !live[e.dest] {
                live[e.dest] = true;
                stack.push(e.dest);
            }
        }
    }
    live
}

fn live_states_to_accept(a: &Automaton) -> Vec<bool> {
    let mut incoming: Vec<Vec<usize>> = vec![vec![]; a.num_states()];
    for s in 0..a.num_states() {
        for e in a.edges(s) {
            incoming[e.dest].push(s);
        }
    }
    let mut live = vec![false; a.num_states()];
    let mut stack: Vec<usize> = a.accept_states().collect();
    for &s in stack.iter() {
        live[s] = true;
    }
    while let Some(s) = stack.pop() {
        for &from in incoming[s].iter() {
            if !live[from] {
                live[from] = true;
                stack.push(from);
            }
        }
    }
    live
}

/// Returns true if `a` accepts no strings at all.
pub fn is_empty(a: &Automaton) -> bool {
    if a.num_states() == 0 {
        return true;
    }
    if a.is_accept(0) {
        return false;
    }
    if a.num_transitions(0) == 0 {
        return true;
    }
    let mut seen = vec![false; a.num_states()];
    let mut stack = vec![0];
    seen[0] = true;
    while let Some(s) = stack.pop() {
        if a.is_accept(s) {
            return false;
        }
        for e in a.edges(s) {
            if !seen[e.dest] {
                seen[e.dest] = true;
                stack.push(e.dest);
            }
        }
    }
    true
}

/// Returns true if `a` accepts every string of codepoints.
///
/// See [`is_total_range`].
pub fn is_total(a: &Automaton) -> bool {
    is_total_range(a, 0, MAX_CODE_POINT)
}

/// Returns true if `a` accepts every string over the alphabet `min..=max`.
///
/// The check is that every state reachable from the initial state accepts
/// and has transitions covering the whole alphabet. This is exact for
/// deterministic automata. A non-deterministic automaton accepting
/// everything may be reported as not total.
pub fn is_total_range(a: &Automaton, min: u32, max: u32) -> bool {
    if a.num_states() == 0 {
        return false;
    }
    let mut seen = vec![false; a.num_states()];
    let mut stack = vec![0];
    seen[0] = true;
    while let Some(s) = stack.pop() {
        if !a.is_accept(s) {
            return false;
        }
        let mut next = min;
        let mut covered = false;
        for e in a.edges(s) {
            if e.max < next {
                continue;
            }
            if e.min > next {
                break;
            }
            if e.max >= max {
                covered = true;
                break;
            }
            next = e.max + 1;
        }
        if !covered {
            return false;
        }
        for e in a.edges(s) {
            if e.max < min || e.min > max {
                continue;
            }
            if !seen[e.dest] {
                seen[e.dest] = true;
                stack.push(e.dest);
            }
        }
    }
    true
}

/// Returns true if the language of `a1` is a subset of the language of
/// `a2`.
///
/// # Panics
///
/// When either automaton is not deterministic, or has a state reachable
/// from its initial state that cannot reach an accepting state. Call
/// [`remove_dead_states`] first if necessary.
pub fn subset_of(a1: &Automaton, a2: &Automaton) -> bool {
    assert!(a1.is_deterministic(), "a1 must be deterministic");
    assert!(a2.is_deterministic(), "a2 must be deterministic");
    assert!(!has_dead_states_from_initial(a1), "a1 has dead states");
    assert!(!has_dead_states_from_initial(a2), "a2 has dead states");
    if a1.num_states() == 0 {
        return true;
    }
    if a2.num_states() == 0 {
        return is_empty(a1);
    }
    let mut visited: fnv::HashMap<(usize, usize), ()> = fnv::new_map();
    let mut worklist = VecDeque::new();
    visited.insert((0, 0), ());
    worklist.push_back((0, 0));
    while let Some((s1, s2)) = worklist.pop_front() {
        if a1.is_accept(s1) && !a2.is_accept(s2) {
            return false;
        }
        let (t1, t2) = (a1.edges(s1), a2.edges(s2));
        let mut b2 = 0;
        for e1 in t1.iter() {
            while b2 < t2.len() && t2[b2].max < e1.min {
                b2 += 1;
            }
            // The next label of e1 not yet covered by a transition of a2.
            let mut uncovered = Some(e1.min);
            for e2 in t2[b2..].iter().take_while(|e2| e1.max >= e2.min) {
                match uncovered {
                    Some(label) if e2.min > label => return false,
                    _ => {}
                }
                uncovered = if e2.max < MAX_CODE_POINT {
                    Some(e2.max + 1)
                } else {
                    None
                };
                if visited.insert((e1.dest, e2.dest), ()).is_none() {
                    worklist.push_back((e1.dest, e2.dest));
                }
            }
            if uncovered.map_or(false, |label| label <= e1.max) {
                return false;
            }
        }
    }
    true
}

/// Returns true if `a1` and `a2` accept exactly the same strings.
///
/// # Panics
///
/// Under the same conditions as [`subset_of`].
pub fn same_language(a1: &Automaton, a2: &Automaton) -> bool {
    std::ptr::eq(a1, a2) || (subset_of(a2, a1) && subset_of(a1, a2))
}

/// Returns true if the language of `a` is finite, that is, if no cycle is
/// reachable from the initial state.
///
/// Cycles among states that cannot reach an accepting state still count,
/// so remove dead states first for an exact answer.
pub fn is_finite(a: &Automaton) -> bool {
    if a.num_states() == 0 {
        return true;
    }
    find_cycle_free_order(a).is_some()
}

/// Returns the single string accepted by `a`, if it accepts exactly one.
///
/// This walks single-label transitions from the initial state and gives up
/// as soon as a state branches, accepts before the end or revisits a state.
/// The result is only reliable if `a` has no dead states.
///
/// # Panics
///
/// When `a` is not deterministic.
pub fn singleton(a: &Automaton) -> Option<Vec<u32>> {
    assert!(a.is_deterministic(), "input automaton must be deterministic");
    if a.num_states() == 0 {
        return None;
    }
    let mut visited = vec![false; a.num_states()];
    let mut string = vec![];
    let mut s = 0;
    loop {
        visited[s] = true;
        let edges = a.edges(s);
        if a.is_accept(s) {
            return if edges.is_empty() { Some(string) } else { None };
        }
        match edges {
            [e] if e.min == e.max && !visited[e.dest] => {
                string.push(e.min);
                s = e.dest;
            }
            _ => return None,
        }
    }
}

/// Returns true if `a` accepts the codepoints of `s`.
pub fn run(a: &Automaton, s: &str) -> bool {
    let labels: Vec<u32> = s.chars().map(|c| c as u32).collect();
    run_labels(a, &labels)
}

/// Returns true if `a` accepts the given sequence of labels.
///
/// This works on non-deterministic automata by tracking the set of all
/// states reachable on the input so far.
pub fn run_labels(a: &Automaton, labels: &[u32]) -> bool {
    if a.num_states() == 0 {
        return false;
    }
    if a.is_deterministic() {
        let mut s = 0;
        for &label in labels {
            match a.step(s, label) {
                None => return false,
                Some(next) => s = next,
            }
        }
        return a.is_accept(s);
    }
    let mut current = SparseSet::new(a.num_states());
    let mut next = SparseSet::new(a.num_states());
    current.insert(0);
    for &label in labels {
        next.clear();
        for s in current.iter() {
            for e in a.edges(s) {
                if e.min > label {
                    break;
                }
                if label <= e.max {
                    next.insert(e.dest);
                }
            }
        }
        if next.is_empty() {
            return false;
        }
        std::mem::swap(&mut current, &mut next);
    }
    current.iter().any(|s| a.is_accept(s))
}

/// Returns the states reachable from the initial state in topological
/// order, so that every transition leads from an earlier to a later state.
///
/// This uses an iterative depth first search, so long chains of states do
/// not grow the call stack.
///
/// # Panics
///
/// When a cycle is reachable from the initial state.
pub fn topo_sort_states(a: &Automaton) -> Vec<usize> {
    if a.num_states() == 0 {
        return vec![];
    }
    match find_cycle_free_order(a) {
        Some(order) => order,
        None => panic!("input automaton has cycles"),
    }
}

/// Returns the reverse post order of the states reachable from the initial
/// state, or `None` if one of them is on a cycle.
fn find_cycle_free_order(a: &Automaton) -> Option<Vec<usize>> {
    const UNVISITED: u8 = 0;
    const ON_PATH: u8 = 1;
    const DONE: u8 = 2;

    let mut color = vec![UNVISITED; a.num_states()];
    let mut order = vec![];
    // Each entry is a state and the index of its next transition to visit.
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
    color[0] = ON_PATH;
    while let Some(top) = stack.last_mut() {
        let s = top.0;
        let edges = a.edges(s);
        if top.1 == edges.len() {
            color[s] = DONE;
            order.push(s);
            stack.pop();
            continue;
        }
        let dest = edges[top.1].dest;
        top.1 += 1;
        match color[dest] {
            ON_PATH => return None,
            UNVISITED => {
                color[dest] = ON_PATH;
                stack.push((dest, 0));
            }
            _ => {}
        }
    }
    order.reverse();
    Some(order)
}

/// Returns the longest string that is a prefix of every string accepted by
/// `a`.
///
/// # Panics
///
/// When a state reachable from the initial state cannot reach an accepting
/// state. Call [`remove_dead_states`] first if necessary.
pub fn common_prefix(a: &Automaton) -> Vec<u32> {
    assert!(
        !has_dead_states_from_initial(a),
        "input automaton has dead states"
    );
    let mut prefix = vec![];
    if is_empty(a) {
        return prefix;
    }
    let mut current = SparseSet::new(a.num_states());
    let mut next = SparseSet::new(a.num_states());
    current.insert(0);
    'steps: loop {
        let mut label = None;
        for s in current.iter() {
            if a.is_accept(s) {
                break 'steps;
            }
            for e in a.edges(s) {
                if e.min != e.max || label.map_or(false, |l| l != e.min) {
                    break 'steps;
                }
                label = Some(e.min);
                next.insert(e.dest);
            }
        }
        match label {
            // Unreachable without dead states, but stop regardless.
            None => break,
            Some(label) => prefix.push(label),
        }
        std::mem::swap(&mut current, &mut next);
        next.clear();
    }
    prefix
}

/// Like [`common_prefix`], but returns the prefix as a string.
///
/// Labels that are not valid codepoints are replaced with `U+FFFD`.
pub fn common_prefix_string(a: &Automaton) -> String {
    common_prefix(a)
        .into_iter()
        .map(|label| char::from_u32(label).unwrap_or('\u{FFFD}'))
        .collect()
}

/// Returns the longest byte string that is a suffix of every string
/// accepted by the byte automaton `a`.
///
/// # Panics
///
/// When the common suffix contains a label greater than `255`.
pub fn common_suffix_bytes(a: &Automaton) -> Vec<u8> {
    let reversed = remove_dead_states(&reverse(a));
    let mut suffix: Vec<u8> = common_prefix(&reversed)
        .into_iter()
        .map(|label| {
            assert!(label <= 0xFF, "label {} is not a byte", label);
            label as u8
        })
        .collect();
    suffix.reverse();
    suffix
}
