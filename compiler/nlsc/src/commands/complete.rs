//! The `complete` command: suggestions at a cursor.

use nls_parse::{CompletionStatus, Suggestion};

use super::{load_language, report, Options};

/// One line per suggestion: the text still to insert, then the full
/// completion when part of it was already typed.
pub fn render_suggestions(suggestions: &[Suggestion]) -> Vec<String> {
    suggestions
        .iter()
        .map(|s| {
            if s.already_entered.is_empty() {
                s.completion.clone()
            } else {
                format!("{}\t({})", s.remainder(), s.completion)
            }
        })
        .collect()
}

pub fn complete_text(text: &str, options: &Options) {
    let mut language = load_language(options);
    let cursor = options.cursor.unwrap_or(text.len());
    let parser = language.parser_mut();
    let suggestions = match parser.autocomplete(text, cursor) {
        Ok(suggestions) => suggestions,
        Err(e) => {
            report(options, &e.to_diagnostic(), Some(("<input>", text)));
            std::process::exit(1);
        }
    };

    if suggestions.is_empty() {
        let status = parser
            .check_completion(text, cursor)
            .unwrap_or(CompletionStatus::Empty);
        match status {
            CompletionStatus::Vetoed => eprintln!("no suggestions (type the value)"),
            CompletionStatus::Empty | CompletionStatus::Available => {
                eprintln!("no suggestions");
            }
        }
        return;
    }
    for line in render_suggestions(&suggestions) {
        println!("{line}");
    }
}
