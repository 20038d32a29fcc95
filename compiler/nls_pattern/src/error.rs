//! Pattern compilation errors.

use nls_diagnostic::{Diagnostic, ErrorCode};
use nls_ir::Span;

/// What was wrong with a pattern.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileErrorKind {
    #[error("unclosed placeholder: `{{` has no matching `}}`")]
    UnclosedPlaceholder,
    #[error("unmatched `}}` outside of a placeholder")]
    UnmatchedCloseBrace,
    #[error("placeholder has no variable name")]
    EmptyName,
    #[error("invalid variable name `{0}`")]
    InvalidName(String),
    #[error("placeholder `{name}` has no type")]
    EmptyType { name: String },
    #[error("unknown quantifier `{0}`")]
    UnknownQuantifier(String),
    #[error("malformed character class: {0}")]
    MalformedCharClass(String),
    #[error("invalid type name `{0}`")]
    InvalidTypeName(String),
    #[error("`{0}` is a built-in type and cannot be redefined")]
    ReservedTypeName(String),
}

impl CompileErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            CompileErrorKind::UnclosedPlaceholder => ErrorCode::E0001,
            CompileErrorKind::UnmatchedCloseBrace => ErrorCode::E0002,
            CompileErrorKind::EmptyName | CompileErrorKind::InvalidName(_) => ErrorCode::E0003,
            CompileErrorKind::EmptyType { .. } => ErrorCode::E0004,
            CompileErrorKind::UnknownQuantifier(_) => ErrorCode::E0005,
            CompileErrorKind::MalformedCharClass(_) => ErrorCode::E0006,
            CompileErrorKind::InvalidTypeName(_) | CompileErrorKind::ReservedTypeName(_) => {
                ErrorCode::E0007
            }
        }
    }
}

/// A pattern could not be compiled.
///
/// Fatal to the one definition that carried the pattern; the registry is
/// left as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} in pattern `{pattern}`")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    /// Location inside `pattern`.
    pub span: Span,
    pub pattern: String,
}

impl CompileError {
    pub(crate) fn new(kind: CompileErrorKind, span: Span, pattern: &str) -> Self {
        CompileError {
            kind,
            span,
            pattern: pattern.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Diagnostic whose spans point into [`CompileError::pattern`].
    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match &self.kind {
            CompileErrorKind::UnclosedPlaceholder => "placeholder opened here",
            CompileErrorKind::UnmatchedCloseBrace => "no `{` before this",
            CompileErrorKind::UnknownQuantifier(_) => "expected `?`, `*`, `+`, `n` or `n-m`",
            _ => "here",
        };
        Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, label)
            .with_note(self.code().description())
    }
}
