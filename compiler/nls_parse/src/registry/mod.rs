//! The grammar: named types, each a list of alternatives, plus the
//! top-level sentences.
//!
//! Alternatives are tried in registration order; the first one that lets
//! the whole input match wins. Defining an existing type name appends an
//! alternative. Cloning a registry is cheap (alternatives are shared), which
//! lets parse-start listeners work on a staged copy.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use nls_diagnostic::{Diagnostic, ErrorCode};
use nls_ir::{Span, Value};
use nls_pattern::{compile, validate_type_name, CompileError, Pattern, TypeRef};

use crate::completion::{Autocompleter, Completion};
use crate::eval::{EvalError, Evaluator};
use crate::node::ParsedNode;

/// Registry lookup failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("type `{0}` is not defined")]
    UnknownType(String),
}

impl RegistryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::UnknownType(_) => ErrorCode::E2001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code()).with_message(self.to_string())
    }
}

/// A placeholder naming a type that is not registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndefinedReference {
    pub name: String,
    /// Placeholder location inside `pattern`.
    pub span: Span,
    pub pattern: String,
}

/// One way of matching a type (or one sentence).
pub struct Alternative {
    type_name: Option<Rc<str>>,
    pattern: Pattern,
    evaluator: Option<Rc<dyn Evaluator>>,
    autocompleter: Option<Rc<dyn Autocompleter>>,
    insert_whole: bool,
}

impl Alternative {
    /// Owning type, `None` for sentences.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn is_sentence(&self) -> bool {
        self.type_name.is_none()
    }

    /// Suggest the whole pattern, placeholders as markers, once nothing of
    /// it has been typed yet.
    pub fn insert_whole(&self) -> bool {
        self.insert_whole
    }

    pub(crate) fn evaluator(&self) -> Option<&dyn Evaluator> {
        self.evaluator.as_deref()
    }

    pub(crate) fn autocompleter(&self) -> Option<&dyn Autocompleter> {
        self.autocompleter.as_deref()
    }
}

impl fmt::Debug for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alternative")
            .field("type_name", &self.type_name)
            .field("pattern", &self.pattern.source())
            .field("evaluator", &self.evaluator.is_some())
            .field("autocompleter", &self.autocompleter.is_some())
            .field("insert_whole", &self.insert_whole)
            .finish()
    }
}

/// Builder for a type alternative or a sentence.
///
/// ```text
/// TypeDefinition::new("filter-size", "{stddev:float} {units:units}")
///     .evaluator(filter_size)
///     .insert_whole(true)
/// ```
pub struct TypeDefinition {
    name: Option<String>,
    pattern: String,
    evaluator: Option<Rc<dyn Evaluator>>,
    autocompleter: Option<Rc<dyn Autocompleter>>,
    insert_whole: bool,
}

impl TypeDefinition {
    /// An alternative for the type `name`.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        TypeDefinition {
            name: Some(name.into()),
            pattern: pattern.into(),
            evaluator: None,
            autocompleter: None,
            insert_whole: false,
        }
    }

    /// A top-level sentence.
    pub fn sentence(pattern: impl Into<String>) -> Self {
        TypeDefinition {
            name: None,
            pattern: pattern.into(),
            evaluator: None,
            autocompleter: None,
            insert_whole: false,
        }
    }

    #[must_use]
    pub fn evaluator<F>(self, evaluator: F) -> Self
    where
        F: Fn(&ParsedNode) -> Result<Value, EvalError> + 'static,
    {
        self.shared_evaluator(Rc::new(evaluator))
    }

    /// An evaluator shared with other definitions.
    #[must_use]
    pub fn shared_evaluator(mut self, evaluator: Rc<dyn Evaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    #[must_use]
    pub fn autocompleter<F>(self, autocompleter: F) -> Self
    where
        F: Fn(&ParsedNode, bool) -> Completion + 'static,
    {
        self.shared_autocompleter(Rc::new(autocompleter))
    }

    /// An autocompleter shared with other definitions.
    #[must_use]
    pub fn shared_autocompleter(mut self, autocompleter: Rc<dyn Autocompleter>) -> Self {
        self.autocompleter = Some(autocompleter);
        self
    }

    #[must_use]
    pub fn insert_whole(mut self, insert_whole: bool) -> Self {
        self.insert_whole = insert_whole;
        self
    }
}

/// Types and sentences known to a parser.
#[derive(Clone, Default)]
pub struct Registry {
    types: FxHashMap<Rc<str>, Vec<Rc<Alternative>>>,
    /// Autocompleters attached to a type as a whole.
    completers: FxHashMap<Rc<str>, Rc<dyn Autocompleter>>,
    sentences: Vec<Rc<Alternative>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Compile and register a definition.
    ///
    /// On error the registry is unchanged.
    pub fn define(&mut self, definition: TypeDefinition) -> Result<(), CompileError> {
        let pattern = compile(&definition.pattern)?;
        let type_name: Option<Rc<str>> = match definition.name {
            Some(name) => {
                validate_type_name(&name)?;
                Some(Rc::from(name))
            }
            None => None,
        };
        let alternative = Rc::new(Alternative {
            type_name: type_name.clone(),
            pattern,
            evaluator: definition.evaluator,
            autocompleter: definition.autocompleter,
            insert_whole: definition.insert_whole,
        });
        match type_name {
            Some(name) => {
                debug!(r#type = %name, pattern = %definition.pattern, "define type alternative");
                self.types.entry(name).or_default().push(alternative);
            }
            None => {
                debug!(pattern = %definition.pattern, "define sentence");
                self.sentences.push(alternative);
            }
        }
        Ok(())
    }

    /// Shorthand for a type alternative with an evaluator.
    pub fn define_type<F>(
        &mut self,
        name: &str,
        pattern: &str,
        evaluator: F,
    ) -> Result<(), CompileError>
    where
        F: Fn(&ParsedNode) -> Result<Value, EvalError> + 'static,
    {
        self.define(TypeDefinition::new(name, pattern).evaluator(evaluator))
    }

    /// Shorthand for a sentence with an evaluator.
    pub fn define_sentence<F>(&mut self, pattern: &str, evaluator: F) -> Result<(), CompileError>
    where
        F: Fn(&ParsedNode) -> Result<Value, EvalError> + 'static,
    {
        self.define(TypeDefinition::sentence(pattern).evaluator(evaluator))
    }

    /// Remove every alternative of `name`, and its type-level autocompleter.
    ///
    /// Patterns that refer to `name` stay registered; they just stop
    /// matching until the type is defined again.
    pub fn undefine_type(&mut self, name: &str) -> Result<(), RegistryError> {
        match self.types.remove(name) {
            Some(alternatives) => {
                debug!(r#type = name, alternatives = alternatives.len(), "undefine type");
                self.completers.remove(name);
                Ok(())
            }
            None => Err(RegistryError::UnknownType(name.to_string())),
        }
    }

    /// Attach an autocompleter to every alternative of `name`.
    ///
    /// It takes precedence over per-alternative autocompleters.
    pub fn set_autocompleter<F>(
        &mut self,
        name: &str,
        autocompleter: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&ParsedNode, bool) -> Completion + 'static,
    {
        let Some((key, _)) = self.types.get_key_value(name) else {
            return Err(RegistryError::UnknownType(name.to_string()));
        };
        let key = Rc::clone(key);
        self.completers.insert(key, Rc::new(autocompleter));
        Ok(())
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Alternatives of `name` in registration order.
    pub fn alternatives(&self, name: &str) -> &[Rc<Alternative>] {
        self.types.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn sentences(&self) -> &[Rc<Alternative>] {
        &self.sentences
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(|name| &**name).collect();
        names.sort_unstable();
        names
    }

    /// The shared key for `name`, if registered.
    pub(crate) fn type_key(&self, name: &str) -> Option<Rc<str>> {
        self.types.get_key_value(name).map(|(key, _)| Rc::clone(key))
    }

    pub(crate) fn type_autocompleter(&self, name: &str) -> Option<&dyn Autocompleter> {
        self.completers.get(name).map(|completer| &**completer)
    }

    /// Type references that no registered type satisfies.
    pub fn undefined_references(&self) -> Vec<UndefinedReference> {
        let mut names: Vec<&Rc<str>> = self.types.keys().collect();
        names.sort_unstable();
        let all = names
            .into_iter()
            .flat_map(|name| self.types[name].iter())
            .chain(self.sentences.iter());
        let mut missing = Vec::new();
        for alternative in all {
            for placeholder in alternative.pattern.placeholders() {
                if let TypeRef::Named(target) = &placeholder.target {
                    if !self.types.contains_key(target.as_str()) {
                        missing.push(UndefinedReference {
                            name: target.clone(),
                            span: placeholder.span,
                            pattern: alternative.pattern.source().to_string(),
                        });
                    }
                }
            }
        }
        missing
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.type_names())
            .field("sentences", &self.sentences.len())
            .finish_non_exhaustive()
    }
}
