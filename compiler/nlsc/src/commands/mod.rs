//! Command implementations for the `nlsc` binary.
//!
//! Each handler prints its result and exits with status 1 on failure; the
//! pure parts they are built from are public for tests.

mod check;
mod complete;
mod explain;
mod grammar;
mod options;
mod run;

pub use check::{check_script, check_summary, sentence_count};
pub use complete::{complete_text, render_suggestions};
pub use explain::explain_error;
pub use grammar::{grammar_listing, print_grammar};
pub use options::{parse_options, Options};
pub use run::run_script;

use std::io::{IsTerminal, Read};

use nls_diagnostic::{Diagnostic, DiagnosticEmitter, TerminalEmitter};

use crate::preprocessing::Preprocessing;

/// Read a script from `path`, or from stdin when `path` is `-`.
pub(super) fn read_script(path: &str) -> String {
    if path == "-" {
        let mut text = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut text) {
            eprintln!("error reading stdin: {e}");
            std::process::exit(1);
        }
        return text;
    }

    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// The preprocessing language configured from the command line.
pub(super) fn load_language(options: &Options) -> Preprocessing {
    match Preprocessing::with_config(options.calibration.clone(), options.parser_config()) {
        Ok(pre) => pre,
        Err(e) => {
            report(options, &e.to_diagnostic(), None);
            std::process::exit(1);
        }
    }
}

/// Print `diagnostic` to stderr, with a snippet when the script is known.
pub(super) fn report(options: &Options, diagnostic: &Diagnostic, script: Option<(&str, &str)>) {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::with_color_mode(std::io::stderr(), options.color, is_tty);
    if let Some((name, text)) = script {
        emitter = emitter.with_source(name, text);
    }
    emitter.emit(diagnostic);
    emitter.flush();
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
