//! The `nlsc` command-line front end.
//!
//! Hosts the image-preprocessing language from the tutorials
//! ([`preprocessing`]) and the commands that check, run and complete
//! scripts written in it.

pub mod commands;
pub mod preprocessing;
mod tracing_setup;

pub use tracing_setup::{init_tracing, LOG_ENV};
