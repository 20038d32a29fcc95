//! Diagnostic system for grammar, parse and evaluation errors.
//!
//! Every error the engine returns can be turned into a [`Diagnostic`]:
//! - Error codes for searchability (`nlsc explain E0005`)
//! - Clear messages (what went wrong)
//! - Labeled spans (where in the pattern or script it went wrong)
//! - Notes (what was being matched at the time)

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::{ErrorCode, ParseErrorCodeError};
