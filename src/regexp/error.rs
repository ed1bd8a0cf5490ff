use std::error;
use std::fmt;

use crate::operations::TooComplexToDeterminize;

/// An error that occurred while parsing or compiling a regular expression.
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
}

#[derive(Clone, Debug)]
enum ErrorKind {
    /// A syntax error at a byte offset of the pattern.
    Syntax { offset: usize, msg: String },
    /// Groups, complements or repetitions were nested too deeply.
    NestLimitExceeded { offset: usize, limit: u32 },
    /// A `<name>` referred to an automaton that isn't known.
    UnknownAutomaton { offset: usize, name: String },
    /// Compiling a complement required too much determinization effort.
    TooComplex(TooComplexToDeterminize),
}

impl Error {
    pub(crate) fn syntax<M: Into<String>>(offset: usize, msg: M) -> Error {
        Error { kind: ErrorKind::Syntax { offset, msg: msg.into() } }
    }

    pub(crate) fn nest_limit_exceeded(offset: usize, limit: u32) -> Error {
        Error { kind: ErrorKind::NestLimitExceeded { offset, limit } }
    }

    pub(crate) fn unknown_automaton(offset: usize, name: &str) -> Error {
        Error {
            kind: ErrorKind::UnknownAutomaton {
                offset,
                name: name.to_string(),
            },
        }
    }

    pub(crate) fn too_complex(
        err: TooComplexToDeterminize,
        pattern: &str,
    ) -> Error {
        Error { kind: ErrorKind::TooComplex(err.with_regexp(pattern)) }
    }

    /// Returns the byte offset into the pattern at which this error
    /// occurred, if it has one.
    ///
    /// Offsets count UTF-8 bytes, not characters, so they can be used to
    /// slice the pattern directly. Errors from determinization have no
    /// offset.
    pub fn offset(&self) -> Option<usize> {
        match self.kind {
            ErrorKind::Syntax { offset, .. } => Some(offset),
            ErrorKind::NestLimitExceeded { offset, .. } => Some(offset),
            ErrorKind::UnknownAutomaton { offset, .. } => Some(offset),
            ErrorKind::TooComplex(_) => None,
        }
    }

    /// Returns true if this error occurred because compiling the pattern
    /// was too expensive, rather than because the pattern is invalid.
    pub fn is_too_complex(&self) -> bool {
        matches!(self.kind, ErrorKind::TooComplex(_))
    }

    /// Returns the underlying determinization failure, if that is what
    /// this error is.
    pub fn too_complex_to_determinize(
        &self,
    ) -> Option<&TooComplexToDeterminize> {
        match self.kind {
            ErrorKind::TooComplex(ref err) => Some(err),
            _ => None,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind {
            ErrorKind::TooComplex(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::Syntax { offset, ref msg } => {
                write!(f, "regex parse error at offset {}: {}", offset, msg)
            }
            ErrorKind::NestLimitExceeded { offset, limit } => write!(
                f,
                "regex parse error at offset {}: exceeded nest limit of {}",
                offset, limit,
            ),
            ErrorKind::UnknownAutomaton { offset, ref name } => write!(
                f,
                "regex error at offset {}: automaton '{}' not found",
                offset, name,
            ),
            ErrorKind::TooComplex(ref err) => write!(f, "{}", err),
        }
    }
}
