use std::error;
use std::fmt;

use crate::automaton::Automaton;

/// An error that occurs when determinizing an automaton would exceed the
/// configured work limit.
///
/// This is a deterministic failure: retrying with the same input and limit
/// always fails again. Callers can either reject the input or retry with a
/// larger limit. The error carries the limit that was exceeded along with
/// either the automaton being determinized or, when produced while
/// compiling a regular expression, the pattern.
#[derive(Clone, Debug)]
pub struct TooComplexToDeterminize {
    limit: usize,
    automaton: Option<Box<Automaton>>,
    regexp: Option<String>,
}

impl TooComplexToDeterminize {
    pub(crate) fn new(
        automaton: &Automaton,
        limit: usize,
    ) -> TooComplexToDeterminize {
        TooComplexToDeterminize {
            limit,
            automaton: Some(Box::new(automaton.clone())),
            regexp: None,
        }
    }

    /// Attaches the regular expression whose compilation failed.
    pub(crate) fn with_regexp(
        mut self,
        regexp: &str,
    ) -> TooComplexToDeterminize {
        self.regexp = Some(regexp.to_string());
        self
    }

    /// Returns the work limit that was exceeded.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the automaton that was too complex to determinize.
    pub fn automaton(&self) -> Option<&Automaton> {
        self.automaton.as_deref()
    }

    /// Returns the regular expression being compiled, if any.
    pub fn regexp(&self) -> Option<&str> {
        self.regexp.as_deref()
    }
}

impl error::Error for TooComplexToDeterminize {}

impl fmt::Display for TooComplexToDeterminize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref regexp) = self.regexp {
            return write!(
                f,
                "determinizing {} would require more than {} effort",
                regexp, self.limit,
            );
        }
        match self.automaton {
            Some(ref a) => write!(
                f,
                "determinizing automaton with {} states and {} transitions \
                 would require more than {} effort",
                a.num_states(),
                a.num_total_transitions(),
                self.limit,
            ),
            None => write!(
                f,
                "determinizing would require more than {} effort",
                self.limit
            ),
        }
    }
}
