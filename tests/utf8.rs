use quickcheck::{quickcheck, TestResult};
use term_automata::{
    automata,
    automaton::MAX_CODE_POINT,
    operations,
    run::{ByteRunAutomaton, ByteRunnable},
    utf8::Utf32ToUtf8,
};

fn byte_run(a: &term_automata::Automaton) -> ByteRunAutomaton {
    ByteRunAutomaton::new(a, false, 10_000).unwrap()
}

#[test]
fn every_codepoint() {
    let run = byte_run(&automata::make_any_char());
    let mut buf = [0; 4];
    for cp in 0..=MAX_CODE_POINT {
        let c = match char::from_u32(cp) {
            None => continue,
            Some(c) => c,
        };
        let bytes = c.encode_utf8(&mut buf).as_bytes();
        assert!(run.run(bytes), "U+{:04X} rejected", cp);
    }
}

#[test]
fn invalid_encodings_rejected() {
    let run = byte_run(&automata::make_any_char());
    let invalid: &[&[u8]] = &[
        b"\xC0\x80",
        b"\xC1\xBF",
        b"\xE0\x80\x80",
        b"\xED\xA0\x80",
        b"\xED\xBF\xBF",
        b"\xF0\x80\x80\x80",
        b"\xF4\x90\x80\x80",
        b"\xF5\x80\x80\x80",
        b"\x80",
        b"\xFF",
        b"\xE2\x98",
    ];
    for bytes in invalid {
        assert!(!run.run(bytes), "{:?} accepted", bytes);
    }
}

#[test]
fn determinized_conversion_accepts_encodings() {
    let a = automata::make_string_union(&["aé", "aè", "b☃"]);
    let utf8 = Utf32ToUtf8::new().convert(&a);
    let d = operations::determinize(&utf8, 10_000).unwrap();
    for term in ["aé", "aè", "b☃"] {
        assert!(operations::run_labels(
            &d,
            &term.bytes().map(u32::from).collect::<Vec<_>>()
        ));
    }
    assert!(!operations::run_labels(&d, &[b'a' as u32, 0xC3]));
}

quickcheck! {
    fn prop_char_range(min: u32, max: u32, probe: u32) -> TestResult {
        let (min, max, probe) = (
            min % (MAX_CODE_POINT + 1),
            max % (MAX_CODE_POINT + 1),
            probe % (MAX_CODE_POINT + 1),
        );
        if min > max {
            return TestResult::discard();
        }
        let c = match char::from_u32(probe) {
            None => return TestResult::discard(),
            Some(c) => c,
        };
        let run = byte_run(&automata::make_char_range(min, max));
        let mut buf = [0; 4];
        let check = |c: char| {
            let expected = min <= c as u32 && c as u32 <= max;
            run.run(c.encode_utf8(&mut [0; 4]).as_bytes()) == expected
        };
        let bounds = [min, max]
            .iter()
            .filter_map(|&b| char::from_u32(b))
            .all(|b| run.run(b.encode_utf8(&mut buf).as_bytes()));
        TestResult::from_bool(check(c) && bounds)
    }
}
