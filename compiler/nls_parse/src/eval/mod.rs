//! Evaluation of parse trees.
//!
//! Every node evaluates lazily, at most once: an alternative with an
//! evaluator runs it, everything else falls back to a default value
//! derived from its kind. Evaluators pull the values of their named
//! descendants through [`ParsedNode::evaluate`].

use nls_diagnostic::{Diagnostic, ErrorCode};
use nls_ir::{Span, Value, ValueTypeError};

use crate::node::ParsedNode;

/// Computes the value of an alternative from its parsed node.
///
/// Closures `Fn(&ParsedNode) -> Result<Value, EvalError>` implement this.
pub trait Evaluator {
    fn evaluate(&self, node: &ParsedNode) -> Result<Value, EvalError>;
}

impl<F> Evaluator for F
where
    F: Fn(&ParsedNode) -> Result<Value, EvalError>,
{
    fn evaluate(&self, node: &ParsedNode) -> Result<Value, EvalError> {
        self(node)
    }
}

/// Evaluation failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("no variable `{name}` below `{parent}`")]
    UnknownVariable {
        name: String,
        /// Text of the node the lookup started from.
        parent: String,
        span: Span,
    },
    #[error("`{text}` is not a valid {kind}")]
    InvalidNumber {
        text: String,
        kind: &'static str,
        span: Span,
    },
    #[error("variable `{name}`: {source}")]
    TypeMismatch {
        name: String,
        #[source]
        source: ValueTypeError,
    },
    #[error("{message}")]
    Failed { message: String },
}

impl EvalError {
    /// An evaluator-reported failure.
    pub fn failed(message: impl Into<String>) -> Self {
        EvalError::Failed {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::UnknownVariable { .. } => ErrorCode::E3001,
            EvalError::InvalidNumber { .. } => ErrorCode::E3002,
            EvalError::TypeMismatch { .. } => ErrorCode::E3003,
            EvalError::Failed { .. } => ErrorCode::E3004,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            EvalError::UnknownVariable { span, .. } => diag.with_label(*span, "looked up here"),
            EvalError::InvalidNumber { span, .. } => diag.with_label(*span, "this number"),
            EvalError::TypeMismatch { .. } | EvalError::Failed { .. } => diag,
        }
    }
}
