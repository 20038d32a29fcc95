//! The parser facade: a registry, parse-start listeners and configuration.

use std::fmt;

use tracing::{debug, instrument, warn};

use nls_ir::Value;
use nls_pattern::CompileError;

use crate::completion::{self, Completed, Completion, CompletionStatus, Suggestion};
use crate::config::ParserConfig;
use crate::engine;
use crate::error::{GrammarError, ParseError};
use crate::eval::EvalError;
use crate::node::ParsedNode;
use crate::registry::{Registry, RegistryError, TypeDefinition};

/// Called at the start of every pass, before matching; may redefine types.
pub type ParseStartListener = Box<dyn FnMut(&mut Registry) -> Result<(), GrammarError>>;

/// Parses and completes text against a sentence grammar.
#[derive(Default)]
pub struct Parser {
    registry: Registry,
    listeners: Vec<ParseStartListener>,
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Parser {
            config,
            ..Parser::default()
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn define(&mut self, definition: TypeDefinition) -> Result<(), CompileError> {
        self.registry.define(definition)
    }

    pub fn define_type<F>(
        &mut self,
        name: &str,
        pattern: &str,
        evaluator: F,
    ) -> Result<(), CompileError>
    where
        F: Fn(&ParsedNode) -> Result<Value, EvalError> + 'static,
    {
        self.registry.define_type(name, pattern, evaluator)
    }

    pub fn define_sentence<F>(&mut self, pattern: &str, evaluator: F) -> Result<(), CompileError>
    where
        F: Fn(&ParsedNode) -> Result<Value, EvalError> + 'static,
    {
        self.registry.define_sentence(pattern, evaluator)
    }

    pub fn undefine_type(&mut self, name: &str) -> Result<(), RegistryError> {
        self.registry.undefine_type(name)
    }

    pub fn set_autocompleter<F>(
        &mut self,
        name: &str,
        autocompleter: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&ParsedNode, bool) -> Completion + 'static,
    {
        self.registry.set_autocompleter(name, autocompleter)
    }

    /// Register a listener run at the start of every parse or completion
    /// pass, in registration order.
    pub fn add_parse_start_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&mut Registry) -> Result<(), GrammarError> + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Run the listeners on a staged copy of the registry; commit it only
    /// if all of them succeed.
    fn start_pass(&mut self) -> Result<(), ParseError> {
        if self.listeners.is_empty() {
            return Ok(());
        }
        let mut staged = self.registry.clone();
        for (index, listener) in self.listeners.iter_mut().enumerate() {
            if let Err(source) = listener(&mut staged) {
                warn!(index, error = %source, "parse-start listener failed");
                return Err(ParseError::HookFailed { index, source });
            }
        }
        self.registry = staged;
        Ok(())
    }

    /// Parse `text` as a whitespace-separated sequence of sentences.
    #[instrument(level = "debug", skip_all)]
    pub fn parse(&mut self, text: &str) -> Result<ParsedNode, ParseError> {
        self.start_pass()?;
        engine::parse(&self.registry, &self.config, text)
    }

    /// Partial trees for the text before `cursor`.
    pub fn parse_partial(
        &mut self,
        text: &str,
        cursor: usize,
    ) -> Result<Vec<ParsedNode>, ParseError> {
        self.start_pass()?;
        let prefix = &text[..clamp_cursor(text, cursor)];
        engine::partial_trees(&self.registry, &self.config, prefix)
    }

    /// Suggestions for the text before `cursor`.
    ///
    /// Empty when a veto applies or nothing can follow.
    #[instrument(level = "debug", skip(self, text))]
    pub fn autocomplete(
        &mut self,
        text: &str,
        cursor: usize,
    ) -> Result<Vec<Suggestion>, ParseError> {
        let roots = self.parse_partial(text, cursor)?;
        match completion::complete(&self.registry, &self.config, &roots, false) {
            Completed::Vetoed => Ok(Vec::new()),
            Completed::Suggestions(suggestions) => {
                debug!(count = suggestions.len(), "suggestions");
                Ok(suggestions)
            }
        }
    }

    /// Whether anything could be suggested at `cursor`, asking
    /// autocompleters with `just_check` set.
    pub fn check_completion(
        &mut self,
        text: &str,
        cursor: usize,
    ) -> Result<CompletionStatus, ParseError> {
        let roots = self.parse_partial(text, cursor)?;
        let status = match completion::complete(&self.registry, &self.config, &roots, true) {
            Completed::Vetoed => CompletionStatus::Vetoed,
            Completed::Suggestions(found) if found.is_empty() => CompletionStatus::Empty,
            Completed::Suggestions(_) => CompletionStatus::Available,
        };
        Ok(status)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("registry", &self.registry)
            .field("listeners", &self.listeners.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Clamp `cursor` to `text` and down to a char boundary.
fn clamp_cursor(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
