//! The `check` command: parse a script without running it.

use nls_parse::{NodeKind, ParsedNode};

use super::{load_language, read_script, report, Options};

/// Number of sentences in a parsed script.
pub fn sentence_count(root: &ParsedNode) -> usize {
    root.children()
        .iter()
        .filter(|child| !matches!(child.kind(), NodeKind::Gap))
        .count()
}

/// The success message, followed by the parse tree with `--tree`.
pub fn check_summary(path: &str, root: &ParsedNode, tree: bool) -> String {
    let count = sentence_count(root);
    let plural = if count == 1 { "" } else { "s" };
    let mut out = format!("OK: {path} ({count} sentence{plural})\n");
    if tree {
        out.push_str(&root.dump());
    }
    out
}

/// Parse the script at `path` and report the first error, if any.
pub fn check_script(path: &str, options: &Options) {
    let text = read_script(path);
    let mut language = load_language(options);
    match language.parser_mut().parse(&text) {
        Ok(root) => print!("{}", check_summary(path, &root, options.tree)),
        Err(e) => {
            report(options, &e.to_diagnostic(), Some((path, text.as_str())));
            std::process::exit(1);
        }
    }
}
