//! Shared data model for the nls grammar engine.
//!
//! Holds the types every other crate agrees on: byte [`Span`]s into the
//! parsed text and the dynamically typed [`Value`] that evaluators return.

mod span;
mod value;

pub use span::Span;
pub use value::{Value, ValueTypeError};
