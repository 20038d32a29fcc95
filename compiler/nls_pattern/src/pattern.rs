//! Compiled pattern representation.

use std::fmt;

use nls_ir::Span;

use crate::{Builtin, CharClass, Quantifier};

/// A compiled pattern: literal segments and placeholders, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    items: Vec<Item>,
}

/// One element of a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Literal(Literal),
    Placeholder(Placeholder),
}

/// Text matched verbatim, case-sensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    /// Text after escape processing.
    pub text: String,
    /// Location in the pattern source.
    pub span: Span,
}

/// A named, typed, quantified slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub target: TypeRef,
    pub quantifier: Quantifier,
    /// Location in the pattern source, braces included.
    pub span: Span,
}

/// What a placeholder matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Builtin(Builtin),
    CharClass(CharClass),
    /// A registry type, resolved at match time.
    Named(String),
}

impl Pattern {
    pub(crate) fn new(source: &str, items: Vec<Item>) -> Self {
        Pattern {
            source: source.to_string(),
            items,
        }
    }

    /// The pattern text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.items.iter().filter_map(|item| match item {
            Item::Placeholder(p) => Some(p),
            Item::Literal(_) => None,
        })
    }

    /// Names of registry types this pattern refers to.
    pub fn referenced_types(&self) -> impl Iterator<Item = &str> {
        self.placeholders().filter_map(|p| match &p.target {
            TypeRef::Named(name) => Some(name.as_str()),
            TypeRef::Builtin(_) | TypeRef::CharClass(_) => None,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Builtin(b) => write!(f, "{b}"),
            TypeRef::CharClass(class) => write!(f, "{class}"),
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantifier.is_one() {
            write!(f, "{{{}:{}}}", self.name, self.target)
        } else {
            write!(f, "{{{}:{}:{}}}", self.name, self.target, self.quantifier)
        }
    }
}
