//! Autocompletion from partial parse trees.
//!
//! Each partial tree is a chain of incomplete nodes ending in the terminal
//! the cursor is in. The chain is walked from the sentence inward; the
//! first alternative with an autocompleter (type-level ones first) decides,
//! unless it defers. Without a decision, the terminal's default applies.
//! A veto on any chain suppresses every suggestion.

use std::fmt;
use std::ops::Range;

use rustc_hash::FxHashSet;
use tracing::trace;

use nls_pattern::Item;

use crate::config::ParserConfig;
use crate::node::{NodeKind, ParsedNode};
use crate::registry::{Alternative, Registry};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    /// Literal text to type.
    Literal,
    /// A marker standing for a value the user must supply.
    Placeholder,
    /// A whole alternative, literals and markers.
    Sequence,
}

/// One completion candidate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Suggestion {
    /// Full text of the completed element.
    pub completion: String,
    /// The part of `completion` already typed before the cursor.
    pub already_entered: String,
    /// Byte range inside `completion` to select after inserting, e.g. the
    /// first placeholder marker.
    pub selection: Option<Range<usize>>,
    pub kind: SuggestionKind,
}

impl Suggestion {
    pub fn literal(completion: impl Into<String>, already_entered: impl Into<String>) -> Self {
        Suggestion {
            completion: completion.into(),
            already_entered: already_entered.into(),
            selection: None,
            kind: SuggestionKind::Literal,
        }
    }

    /// A marker, selected entirely so typing replaces it.
    pub fn placeholder(marker: impl Into<String>) -> Self {
        let completion = marker.into();
        let selection = Some(0..completion.len());
        Suggestion {
            completion,
            already_entered: String::new(),
            selection,
            kind: SuggestionKind::Placeholder,
        }
    }

    /// What remains to be inserted at the cursor.
    pub fn remainder(&self) -> &str {
        self.completion
            .strip_prefix(self.already_entered.as_str())
            .unwrap_or(&self.completion)
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.completion)
    }
}

/// An autocompleter's answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Suggest(Vec<Suggestion>),
    /// A marker for the named value, written with the parser's
    /// placeholder delimiters.
    Placeholder(String),
    /// Suppress all suggestions at this position.
    Veto,
    /// Let the nodes further in decide.
    Defer,
}

impl Completion {
    /// Literal options for `node`, reporting what was typed so far.
    pub fn literals<I, S>(node: &ParsedNode, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entered = node.parsed_string();
        Completion::Suggest(
            options
                .into_iter()
                .map(|option| Suggestion::literal(option, entered))
                .collect(),
        )
    }

    /// A marker for `name`, e.g. `${radius}` with the default delimiters.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Completion::Placeholder(name.into())
    }

    pub fn veto() -> Self {
        Completion::Veto
    }
}

/// Custom completion for an alternative or a whole type.
///
/// `just_check` is set when the caller only wants to know whether
/// completion is possible; expensive lookups may be skipped then.
/// Closures `Fn(&ParsedNode, bool) -> Completion` implement this.
pub trait Autocompleter {
    fn autocomplete(&self, node: &ParsedNode, just_check: bool) -> Completion;
}

impl<F> Autocompleter for F
where
    F: Fn(&ParsedNode, bool) -> Completion,
{
    fn autocomplete(&self, node: &ParsedNode, just_check: bool) -> Completion {
        self(node, just_check)
    }
}

/// Whether completion is possible at a cursor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompletionStatus {
    Available,
    Vetoed,
    Empty,
}

/// Result of completing over every partial tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Completed {
    Vetoed,
    Suggestions(Vec<Suggestion>),
}

pub(crate) fn complete(
    registry: &Registry,
    config: &ParserConfig,
    roots: &[ParsedNode],
    just_check: bool,
) -> Completed {
    let mut seen = FxHashSet::default();
    let mut suggestions = Vec::new();
    for root in roots {
        match complete_chain(registry, config, root, just_check) {
            Completion::Veto => {
                trace!("completion vetoed");
                return Completed::Vetoed;
            }
            Completion::Suggest(found) => {
                for suggestion in found {
                    if seen.insert(suggestion.completion.clone()) {
                        suggestions.push(suggestion);
                    }
                }
            }
            Completion::Placeholder(name) => {
                let suggestion = Suggestion::placeholder(config.marker(&name));
                if seen.insert(suggestion.completion.clone()) {
                    suggestions.push(suggestion);
                }
            }
            Completion::Defer => {}
        }
    }
    Completed::Suggestions(suggestions)
}

fn complete_chain(
    registry: &Registry,
    config: &ParserConfig,
    root: &ParsedNode,
    just_check: bool,
) -> Completion {
    let mut node = root;
    loop {
        if let Some(alternative) = node.alternative() {
            let completer = alternative
                .type_name()
                .and_then(|name| registry.type_autocompleter(name))
                .or_else(|| alternative.autocompleter());
            if let Some(completer) = completer {
                match completer.autocomplete(node, just_check) {
                    Completion::Defer => {}
                    decided => return decided,
                }
            }
            if alternative.insert_whole() && node.parsed_string().is_empty() {
                return Completion::Suggest(vec![whole_sequence(alternative, config)]);
            }
        }
        match node.children().last() {
            Some(child) if !child.is_complete() => node = child,
            _ => return terminal_default(node),
        }
    }
}

fn terminal_default(node: &ParsedNode) -> Completion {
    let entered = node.parsed_string();
    let marker = || Completion::placeholder(node.name().unwrap_or("value"));
    match node.kind() {
        NodeKind::Literal(text) => {
            Completion::Suggest(vec![Suggestion::literal(&**text, entered)])
        }
        NodeKind::Builtin(builtin) if builtin.is_numeric() => {
            if entered.is_empty() {
                marker()
            } else {
                Completion::Veto
            }
        }
        NodeKind::Builtin(_) | NodeKind::Run if entered.is_empty() => marker(),
        _ => Completion::Suggest(Vec::new()),
    }
}

/// The whole alternative: literals verbatim, placeholders as markers,
/// the first marker selected.
fn whole_sequence(alternative: &Alternative, config: &ParserConfig) -> Suggestion {
    let mut completion = String::new();
    let mut selection = None;
    for item in alternative.pattern().items() {
        match item {
            Item::Literal(literal) => completion.push_str(&literal.text),
            Item::Placeholder(placeholder) => {
                let start = completion.len();
                completion.push_str(&config.marker(&placeholder.name));
                selection.get_or_insert(start..completion.len());
            }
        }
    }
    Suggestion {
        completion,
        already_entered: String::new(),
        selection,
        kind: SuggestionKind::Sequence,
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
