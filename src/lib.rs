/*!
This crate provides finite automata over Unicode codepoints and bytes,
along with the algorithms needed to build them from queries and to match
them efficiently against a sorted dictionary of terms.

An [`Automaton`] is a graph of integer states with transitions labeled by
ranges of codepoints (or bytes). Automata come from a handful of sources:

* [`automata`] has constructors for characters, strings, numeric intervals
  and unions of many strings.
* [`regexp`] parses a small regular expression syntax with intersection and
  complement, and compiles it to an automaton.
* [`levenshtein`] builds automata accepting every string within an edit
  distance of one or two of a word.

The [`operations`] module combines and analyzes automata: union,
concatenation, repetition, intersection, complement, determinization,
minimization, emptiness and finiteness checks, and more.

For matching, an automaton is compiled into a table driven runner. A
[`run::CharacterRunAutomaton`] matches strings, a
[`run::ByteRunAutomaton`] matches UTF-8 bytes, and a
[`compiled::CompiledAutomaton`] adds the classification and `floor`
search used to intersect an automaton with a term dictionary.

# Example

This example builds a Levenshtein automaton and compiles it for matching
UTF-8 terms.

```
use term_automata::{compiled::CompiledAutomaton, levenshtein::LevenshteinAutomata};

let lev = LevenshteinAutomata::new("search", true);
let a = lev.to_automaton(1).unwrap();
let compiled = CompiledAutomaton::new(&a);
assert!(compiled.run(b"search"));
assert!(compiled.run(b"saerch"));
assert!(!compiled.run(b"sea"));
```

# Crate features

* **std** - Enabled by default. This crate currently always requires the
  standard library.
* **logging** - Emits `debug` and `trace` messages through the
  [`log`](https://docs.rs/log) crate while compiling automata.
* **transducer** - Implements the `fst::Automaton` trait for run automata
  and compiled automata, so that they can search an
  [`fst`](https://docs.rs/fst) set or map directly.
*/

#[cfg(not(any(
    target_pointer_width = "16",
    target_pointer_width = "32",
    target_pointer_width = "64"
)))]
compile_error!("term-automata currently not supported on non-{16,32,64}");

pub use crate::automaton::{Automaton, Transition, TransitionAccessor};

#[macro_use]
mod macros;

pub mod automata;
pub mod automaton;
pub mod compiled;
pub mod levenshtein;
pub mod operations;
pub mod regexp;
pub mod run;
pub mod strings;
pub mod util;
pub mod utf8;
