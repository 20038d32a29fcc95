//! Compiler for the sentence pattern mini-language.
//!
//! A pattern is literal text interleaved with typed placeholders:
//!
//! ```text
//! Apply Gaussian blurring with a standard deviation of {stddev:float} pixel(s).
//! Enhance local contrast using {image:[a-z-]:+} as a mask.
//! {stddev:float} {units:units}
//! ```
//!
//! A placeholder is `{name:type}` or `{name:type:quantifier}` where `type`
//! is a built-in (`float`, `int`, `digit`, `letter`, `whitespace`), a
//! bracketed character class, or the name of a registered type, and the
//! quantifier is `?`, `*`, `+`, a count `n` or a range `n-m`.
//!
//! Compilation is purely syntactic. Registered type names are kept as
//! names and resolved by the parse engine at match time, so patterns may
//! refer to types that are defined later (or recursively).

mod builtin;
mod char_class;
mod compiler;
mod error;
mod pattern;
mod quantifier;

pub use builtin::Builtin;
pub use char_class::CharClass;
pub use compiler::{compile, validate_type_name};
pub use error::{CompileError, CompileErrorKind};
pub use pattern::{Item, Literal, Pattern, Placeholder, TypeRef};
pub use quantifier::Quantifier;
