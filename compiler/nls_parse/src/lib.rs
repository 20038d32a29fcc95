//! Typed sentence grammars with incremental parsing and autocompletion.
//!
//! A [`Parser`] owns a [`Registry`] of named types and top-level
//! sentences, each defined by a pattern (see `nls_pattern`) plus an
//! optional evaluator and autocompleter. On every pass, parse-start
//! listeners may redefine types; then the text is matched by a memoized
//! backtracking matcher that either produces a [`ParsedNode`] tree or a
//! [`ParseError`] at the furthest offset reached. The same matcher, run on
//! the text before the cursor, yields partial trees from which
//! [`Suggestion`]s are computed.
//!
//! ```text
//! let mut parser = Parser::new();
//! parser.define_type("units", "pixel(s)", |_: &ParsedNode| Ok(Value::Bool(false)))?;
//! parser.define_type("units", "mm", |_: &ParsedNode| Ok(Value::Bool(true)))?;
//! parser.define_sentence("Blur by {stddev:float} {units:units}.", |pn: &ParsedNode| {
//!     let sigma: f64 = pn.evaluate_as("stddev")?;
//!     Ok(Value::Float(sigma))
//! })?;
//!
//! let tree = parser.parse("Blur by 3.0 mm.")?;
//! assert_eq!(tree.evaluate("units")?, Value::Bool(true));
//! ```

mod completion;
mod config;
mod engine;
mod error;
mod eval;
mod node;
mod parser;
mod registry;

pub use completion::{Autocompleter, Completion, CompletionStatus, Suggestion, SuggestionKind};
pub use config::{ParserConfig, RepetitionPolicy};
pub use error::{Expected, GrammarError, NoMatch, ParseError};
pub use eval::{EvalError, Evaluator};
pub use node::{NodeKind, ParsedNode};
pub use parser::{ParseStartListener, Parser};
pub use registry::{Alternative, Registry, RegistryError, TypeDefinition, UndefinedReference};

pub use nls_ir::{Span, Value};
pub use nls_pattern::{CompileError, CompileErrorKind};
