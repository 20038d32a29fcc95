//! The `grammar` command: list what the language accepts.

use nls_parse::Parser;

use super::{load_language, Options};

/// One line per sentence, then one line per type alternative as
/// `name := pattern`.
pub fn grammar_listing(parser: &Parser) -> Vec<String> {
    let registry = parser.registry();
    let mut lines: Vec<String> = registry
        .sentences()
        .iter()
        .map(|sentence| sentence.pattern().to_string())
        .collect();
    for name in registry.type_names() {
        for alternative in registry.alternatives(name) {
            lines.push(format!("{name} := {}", alternative.pattern()));
        }
    }
    lines
}

pub fn print_grammar(options: &Options) {
    let language = load_language(options);
    for line in grammar_listing(language.parser()) {
        println!("{line}");
    }
}
