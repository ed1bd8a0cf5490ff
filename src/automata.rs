/*!
Constructors for common automata.

These are the building blocks that regular expressions and other queries
are compiled from: the empty language, single characters and ranges,
literal strings, numeric intervals and unions of many literal strings.
Unless noted otherwise, every automaton built here is deterministic and
has no dead states.
*/

use crate::{
    automaton::{self, Automaton, MAX_BYTE, MAX_CODE_POINT},
    operations,
    strings::StringsToAutomaton,
};

/// Returns an automaton that accepts nothing. It has no states.
pub fn make_empty() -> Automaton {
    let mut a = Automaton::new();
    a.finish_state();
    a
}

/// Returns an automaton that accepts only the empty string.
pub fn make_empty_string() -> Automaton {
    let mut a = Automaton::new();
    a.create_state();
    a.set_accept(0, true);
    a
}

/// Returns an automaton that accepts every string of codepoints.
pub fn make_any_string() -> Automaton {
    let mut a = Automaton::new();
    let s = a.create_state();
    a.set_accept(s, true);
    a.add_transition(s, s, 0, MAX_CODE_POINT);
    a.finish_state();
    a
}

/// Returns a byte automaton that accepts every byte string.
pub fn make_any_binary() -> Automaton {
    let mut a = Automaton::new();
    let s = a.create_state();
    a.set_accept(s, true);
    a.add_transition(s, s, 0, MAX_BYTE);
    a.finish_state();
    a
}

/// Returns a byte automaton that accepts every non-empty byte string.
pub fn make_non_empty_binary() -> Automaton {
    let mut a = Automaton::new();
    let s0 = a.create_state();
    let s1 = a.create_state();
    a.set_accept(s1, true);
    a.add_transition(s0, s1, 0, MAX_BYTE);
    a.add_transition(s1, s1, 0, MAX_BYTE);
    a.finish_state();
    a
}

/// Returns an automaton that accepts any single codepoint.
pub fn make_any_char() -> Automaton {
    make_char_range(0, MAX_CODE_POINT)
}

/// Returns an automaton that accepts the single label `c`.
pub fn make_char(c: u32) -> Automaton {
    make_char_range(c, c)
}

/// Returns an automaton that accepts any single label in `min..=max`.
///
/// # Panics
///
/// When `min > max`.
pub fn make_char_range(min: u32, max: u32) -> Automaton {
    assert!(min <= max, "invalid range: min ({}) > max ({})", min, max);
    let mut a = Automaton::new();
    let s0 = a.create_state();
    let s1 = a.create_state();
    a.set_accept(s1, true);
    a.add_transition(s0, s1, min, max);
    a.finish_state();
    a
}

/// Returns an automaton that accepts any single label in the given set.
pub fn make_char_set(labels: &[u32]) -> Automaton {
    let mut labels = labels.to_vec();
    labels.sort_unstable();
    labels.dedup();
    let mut a = Automaton::new();
    let s0 = a.create_state();
    let s1 = a.create_state();
    a.set_accept(s1, true);
    let mut i = 0;
    while i < labels.len() {
        let min = labels[i];
        let mut max = min;
        while i + 1 < labels.len()
            && Some(labels[i + 1]) == max.checked_add(1)
        {
            max += 1;
            i += 1;
        }
        a.add_transition(s0, s1, min, max);
        i += 1;
    }
    a.finish_state();
    a
}

/// Returns an automaton that accepts only the codepoints of `s`.
pub fn make_string(s: &str) -> Automaton {
    let labels: Vec<u32> = s.chars().map(|c| c as u32).collect();
    make_labels(&labels)
}

/// Returns a byte automaton that accepts only `bytes`.
pub fn make_binary(bytes: &[u8]) -> Automaton {
    let labels: Vec<u32> = bytes.iter().map(|&b| b as u32).collect();
    make_labels(&labels)
}

/// Returns an automaton that accepts only the given label sequence.
pub fn make_labels(labels: &[u32]) -> Automaton {
    let mut a = Automaton::new();
    let mut last = a.create_state();
    for &label in labels {
        let next = a.create_state();
        a.add_transition_label(last, next, label);
        last = next;
    }
    a.set_accept(last, true);
    a.finish_state();
    a
}

/// Returns the minimal automaton accepting exactly the given strings, in
/// any order. Duplicates are ignored.
pub fn make_string_union(strings: &[&str]) -> Automaton {
    let mut sorted = strings.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    StringsToAutomaton::build(sorted)
}

/// Returns the minimal byte automaton accepting exactly the given byte
/// strings, in any order. Duplicates are ignored.
pub fn make_binary_string_union(strings: &[&[u8]]) -> Automaton {
    let mut sorted = strings.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    StringsToAutomaton::build_binary(sorted)
}

/// Returns an automaton that accepts the decimal representations of the
/// integers in `min..=max`.
///
/// When `digits > 0`, exactly that many digits are accepted, with leading
/// zeros as needed. Otherwise any number of leading zeros is accepted.
///
/// # Panics
///
/// When `min > max`, or when `digits > 0` and `max` has more than `digits`
/// digits.
pub fn make_decimal_interval(min: u32, max: u32, digits: usize) -> Automaton {
    let x = min.to_string();
    let y = max.to_string();
    assert!(min <= max, "invalid interval: min ({}) > max ({})", min, max);
    assert!(
        digits == 0 || y.len() <= digits,
        "{} does not fit in {} digits",
        max,
        digits
    );
    let width = if digits > 0 { digits } else { y.len() };
    let x = format!("{:0>width$}", x, width = width).into_bytes();
    let y = format!("{:0>width$}", y, width = width).into_bytes();

    let mut d = Decimal {
        builder: automaton::Builder::new(),
        initials: vec![],
    };
    if digits == 0 {
        // Reserve the real initial state, which consumes leading zeros.
        d.builder.create_state();
    }
    d.between(&x, &y, 0, digits == 0);
    let mut a = d.builder.finish();
    if digits == 0 {
        a.add_transition_label(0, 0, '0' as u32);
        for &s in d.initials.iter() {
            a.add_epsilon(0, s);
        }
        a.finish_state();
    }
    a
}

/// Builds the digit-by-digit automaton for a decimal interval whose bounds
/// are padded to the same width.
struct Decimal {
    builder: automaton::Builder,
    /// States that may be reached after consuming only leading zeros.
    initials: Vec<usize>,
}

impl Decimal {
    fn any_of_right_length(&mut self, x: &[u8], n: usize) -> usize {
        let s = self.builder.create_state();
        if x.len() == n {
            self.builder.set_accept(s, true);
        } else {
            let next = self.any_of_right_length(x, n + 1);
            self.builder.add_transition(s, next, '0' as u32, '9' as u32);
        }
        s
    }

    fn at_least(&mut self, x: &[u8], n: usize, zeros: bool) -> usize {
        let s = self.builder.create_state();
        if x.len() == n {
            self.builder.set_accept(s, true);
            return s;
        }
        if zeros {
            self.initials.push(s);
        }
        let c = x[n];
        let next = self.at_least(x, n + 1, zeros && c == b'0');
        self.builder.add_transition_label(s, next, c as u32);
        if c < b'9' {
            let any = self.any_of_right_length(x, n + 1);
            self.builder.add_transition(s, any, c as u32 + 1, '9' as u32);
        }
        s
    }

    fn at_most(&mut self, x: &[u8], n: usize) -> usize {
        let s = self.builder.create_state();
        if x.len() == n {
            self.builder.set_accept(s, true);
            return s;
        }
        let c = x[n];
        let next = self.at_most(x, n + 1);
        self.builder.add_transition_label(s, next, c as u32);
        if c > b'0' {
            let any = self.any_of_right_length(x, n + 1);
            self.builder.add_transition(s, any, '0' as u32, c as u32 - 1);
        }
        s
    }

    fn between(&mut self, x: &[u8], y: &[u8], n: usize, zeros: bool) -> usize {
        let s = self.builder.create_state();
        if x.len() == n {
            self.builder.set_accept(s, true);
            return s;
        }
        if zeros {
            self.initials.push(s);
        }
        let (cx, cy) = (x[n], y[n]);
        if cx == cy {
            let next = self.between(x, y, n + 1, zeros && cx == b'0');
            self.builder.add_transition_label(s, next, cx as u32);
        } else {
            let low = self.at_least(x, n + 1, zeros && cx == b'0');
            self.builder.add_transition_label(s, low, cx as u32);
            let high = self.at_most(y, n + 1);
            self.builder.add_transition_label(s, high, cy as u32);
            if cx + 1 < cy {
                let any = self.any_of_right_length(x, n + 1);
                self.builder.add_transition(
                    s,
                    any,
                    cx as u32 + 1,
                    cy as u32 - 1,
                );
            }
        }
        s
    }
}

/// Returns a byte automaton accepting every byte string between `min` and
/// `max` in lexicographic (unsigned byte) order.
///
/// A bound of `None` is unbounded. Each bound is included or excluded
/// according to its flag. If the interval is empty, so is the language.
pub fn make_binary_interval(
    min: Option<&[u8]>,
    min_inclusive: bool,
    max: Option<&[u8]>,
    max_inclusive: bool,
) -> Automaton {
    let low = match min {
        None => make_any_binary(),
        Some(min) => binary_at_least(min, min_inclusive),
    };
    let high = match max {
        None => make_any_binary(),
        Some(max) => binary_at_most(max, max_inclusive),
    };
    operations::intersection(&low, &high)
}

/// Returns a byte automaton accepting every byte string greater than (or
/// equal to, if `inclusive`) `min`.
fn binary_at_least(min: &[u8], inclusive: bool) -> Automaton {
    let mut a = Automaton::new();
    let states: Vec<usize> = (0..=min.len()).map(|_| a.create_state()).collect();
    let all = a.create_state();
    a.set_accept(all, true);
    a.set_accept(min.len(), inclusive);
    for (i, &b) in min.iter().enumerate() {
        a.add_transition_label(states[i], states[i + 1], b as u32);
        if (b as u32) < MAX_BYTE {
            a.add_transition(states[i], all, b as u32 + 1, MAX_BYTE);
        }
    }
    a.add_transition(states[min.len()], all, 0, MAX_BYTE);
    a.add_transition(all, all, 0, MAX_BYTE);
    a.finish_state();
    a
}

/// Returns a byte automaton accepting every byte string less than (or equal
/// to, if `inclusive`) `max`.
fn binary_at_most(max: &[u8], inclusive: bool) -> Automaton {
    let mut a = Automaton::new();
    let states: Vec<usize> = (0..=max.len()).map(|_| a.create_state()).collect();
    let all = a.create_state();
    a.set_accept(all, true);
    for (i, &b) in max.iter().enumerate() {
        // Every proper prefix of max sorts before it.
        a.set_accept(states[i], true);
        if b > 0 {
            a.add_transition(states[i], all, 0, b as u32 - 1);
        }
        a.add_transition_label(states[i], states[i + 1], b as u32);
    }
    a.set_accept(states[max.len()], inclusive);
    a.add_transition(all, all, 0, MAX_BYTE);
    a.finish_state();
    a
}
