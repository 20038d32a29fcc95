//! Parse-pass errors.
//!
//! A failed pass reports the furthest input offset any alternative
//! reached, what would have been accepted there, and which registered
//! types were being matched at the time.

use std::fmt;

use nls_diagnostic::{Diagnostic, ErrorCode};
use nls_ir::Span;
use nls_pattern::{Builtin, CompileError};

use crate::registry::RegistryError;

/// Something the matcher would have accepted at the failure position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expected {
    /// The rest of a literal, from the mismatching character on.
    Literal(String),
    Builtin(Builtin),
    /// A character class, as written in the pattern.
    CharClass(String),
    /// A placeholder referred to a type that is not registered.
    UndefinedType(String),
    /// Whitespace between two sentences.
    SentenceBreak,
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Literal(text) => write!(f, "`{text}`"),
            Expected::Builtin(Builtin::Float) => f.write_str("a number"),
            Expected::Builtin(Builtin::Int) => f.write_str("an integer"),
            Expected::Builtin(builtin) => write!(f, "a {builtin}"),
            Expected::CharClass(class) => write!(f, "a character in {class}"),
            Expected::UndefinedType(name) => write!(f, "`{name}` (type is not defined)"),
            Expected::SentenceBreak => f.write_str("whitespace before the next sentence"),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// No sentence arrangement consumed the whole input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoMatch {
    /// Byte offset of the furthest failure.
    pub position: usize,
    /// Alternatives viable at `position`, deduplicated, in discovery order.
    pub expected: Vec<Expected>,
    /// Character at `position`, `None` at end of input.
    pub found: Option<char>,
    /// Registered types being matched when the furthest failure happened,
    /// outermost first.
    pub context: Vec<String>,
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected ")?;
        match self.expected.as_slice() {
            [] => f.write_str("a sentence")?,
            [only] => write!(f, "{only}")?,
            [init @ .., last] => {
                for (i, item) in init.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, " or {last}")?;
            }
        }
        match self.found {
            Some(c) => write!(f, ", found `{}`", c.escape_debug())?,
            None => f.write_str(", found end of input")?,
        }
        write!(f, " at offset {}", self.position)
    }
}

/// Failure to define or redefine grammar: a bad pattern or an unknown type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GrammarError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GrammarError::Compile(err) => err.code(),
            GrammarError::Registry(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GrammarError::Compile(err) => err.to_diagnostic(),
            GrammarError::Registry(err) => err.to_diagnostic(),
        }
    }
}

/// A parse pass failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{0}")]
    NoMatch(NoMatch),
    /// A parse-start listener failed; the registry is unchanged.
    #[error("parse-start listener #{index} failed: {source}")]
    HookFailed {
        index: usize,
        #[source]
        source: GrammarError,
    },
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::NoMatch(_) => ErrorCode::E1001,
            ParseError::HookFailed { .. } => ErrorCode::E1002,
        }
    }

    /// Offset of the furthest failure, if the pass got as far as matching.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::NoMatch(no_match) => Some(no_match.position),
            ParseError::HookFailed { .. } => None,
        }
    }

    /// Expected alternatives at the failure position.
    pub fn expected(&self) -> &[Expected] {
        match self {
            ParseError::NoMatch(no_match) => &no_match.expected,
            ParseError::HookFailed { .. } => &[],
        }
    }

    /// Diagnostic whose spans point into the parsed text.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::NoMatch(no_match) => {
                let span = Span::from_range(no_match.position..no_match.position);
                let label = match no_match.found {
                    Some(_) => "unexpected input",
                    None => "input ends here",
                };
                let mut diag = Diagnostic::error(self.code())
                    .with_message(self.to_string())
                    .with_label(span, label);
                if let Some(innermost) = no_match.context.last() {
                    diag = diag.with_note(format!("while matching type `{innermost}`"));
                }
                diag
            }
            ParseError::HookFailed { source, .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_note(format!("caused by {}", source.code())),
        }
    }
}
