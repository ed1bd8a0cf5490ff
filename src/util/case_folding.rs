/*!
Unicode simple case folding lookups.

This is a thin layer over the case folding tables that ship with
`regex-syntax`. A codepoint's alternates are every other codepoint that
simple case folds to the same equivalence class, which is broader than a
plain upper/lower toggle. For example, `k` has the alternates `K` and
`U+212A KELVIN SIGN`.
*/

use regex_syntax::hir::{ClassUnicode, ClassUnicodeRange};

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_END: u32 = 0xDFFF;

/// Returns every codepoint that is case-equivalent to `cp`, excluding `cp`
/// itself, in ascending order.
///
/// The result is empty when `cp` has no case alternates, including for
/// surrogate codepoints and values beyond `U+10FFFF`.
pub fn alternates(cp: u32) -> Vec<u32> {
    let c = match char::from_u32(cp) {
        None => return vec![],
        Some(c) => c,
    };
    let mut class = ClassUnicode::new(vec![ClassUnicodeRange::new(c, c)]);
    class.case_fold_simple();
    let mut alts = vec![];
    for r in class.ranges() {
        for alt in (r.start() as u32)..=(r.end() as u32) {
            if alt != cp {
                alts.push(alt);
            }
        }
    }
    alts
}

/// Closes the given codepoint ranges under simple case folding.
///
/// The returned ranges are sorted and non-overlapping. Surrogate codepoints
/// in the input are carried through as they are, since they have no case.
pub fn fold_ranges(ranges: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let mut surrogates = vec![];
    let mut class_ranges = vec![];
    for &(min, max) in ranges {
        assert!(min <= max, "invalid range {}..={}", min, max);
        if min < SURROGATE_START {
            push_char_range(&mut class_ranges, min, max.min(SURROGATE_START - 1));
        }
        if max >= SURROGATE_START && min <= SURROGATE_END {
            surrogates
                .push((min.max(SURROGATE_START), max.min(SURROGATE_END)));
        }
        if max > SURROGATE_END {
            push_char_range(&mut class_ranges, min.max(SURROGATE_END + 1), max);
        }
    }
    let mut class = ClassUnicode::new(class_ranges);
    class.case_fold_simple();

    let mut out: Vec<(u32, u32)> = class
        .ranges()
        .iter()
        .map(|r| (r.start() as u32, r.end() as u32))
        .chain(surrogates)
        .collect();
    out.sort_unstable();
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(out.len());
    for (min, max) in out {
        match merged.last_mut() {
            Some(last) if min <= last.1.saturating_add(1) => {
                last.1 = last.1.max(max);
            }
            _ => merged.push((min, max)),
        }
    }
    merged
}

fn push_char_range(ranges: &mut Vec<ClassUnicodeRange>, min: u32, max: u32) {
    if let (Some(start), Some(end)) = (char::from_u32(min), char::from_u32(max))
    {
        ranges.push(ClassUnicodeRange::new(start, end));
    }
}
