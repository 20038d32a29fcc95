//! Error codes for all engine diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that produced it.

use std::fmt;
use std::str::FromStr;

/// Error codes for all engine diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Pattern compilation errors
/// - E1xxx: Parse errors
/// - E2xxx: Registry errors
/// - E3xxx: Evaluation errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Pattern Errors (E0xxx)
    /// `{` without a closing `}`
    E0001,
    /// `}` without an opening `{`
    E0002,
    /// Placeholder without a valid variable name
    E0003,
    /// Placeholder without a type
    E0004,
    /// Unknown quantifier symbol
    E0005,
    /// Malformed character class
    E0006,
    /// Invalid or reserved type name in a definition
    E0007,

    // Parse Errors (E1xxx)
    /// Input does not match any sentence
    E1001,
    /// A parse-start listener failed
    E1002,

    // Registry Errors (E2xxx)
    /// Undefining a type that does not exist
    E2001,

    // Evaluation Errors (E3xxx)
    /// No variable with that name in the parse tree
    E3001,
    /// Numeric literal could not be converted
    E3002,
    /// Value has the wrong type for the requested coercion
    E3003,
    /// A caller-supplied evaluator failed
    E3004,
}

impl ErrorCode {
    /// Every known code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E2001,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
        }
    }

    /// One-line explanation, shown by `nlsc explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "a `{` in a pattern is never closed by `}`",
            ErrorCode::E0002 => "a `}` in a pattern has no matching `{`; escape it as `\\}`",
            ErrorCode::E0003 => {
                "a placeholder needs a variable name of letters, digits, `-` or `_`: `{name:type}`"
            }
            ErrorCode::E0004 => "a placeholder needs a type after the name: `{name:type}`",
            ErrorCode::E0005 => "quantifiers are `?`, `*`, `+`, a count `n` or a range `n-m`",
            ErrorCode::E0006 => "a character class must look like `[a-zA-Z()]` and be closed",
            ErrorCode::E0007 => {
                "type names are identifiers of letters, digits, `-` and `_`, and may not shadow a built-in type"
            }
            ErrorCode::E1001 => "the text does not match any defined sentence",
            ErrorCode::E1002 => "a parse-start listener failed; the grammar was left unchanged",
            ErrorCode::E2001 => "only defined types can be undefined",
            ErrorCode::E3001 => "the requested variable is not bound in this part of the parse tree",
            ErrorCode::E3002 => "the matched text is not a valid number",
            ErrorCode::E3003 => "the evaluated value has a different type than requested",
            ErrorCode::E3004 => "an evaluator reported an error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A string did not name a known error code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseErrorCodeError(pub String);

impl fmt::Display for ParseErrorCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error code `{}`", self.0)
    }
}

impl std::error::Error for ParseErrorCodeError {}

/// Parse an error code string like `"E1001"` (case-insensitive).
impl FromStr for ErrorCode {
    type Err = ParseErrorCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| ParseErrorCodeError(s.to_string()))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
