//! Pattern string to [`Pattern`] compilation.
//!
//! Single pass over the pattern's chars: literal text accumulates until a
//! `{`, which starts a placeholder that must close with `}` before the
//! next literal can begin.

use nls_ir::Span;

use crate::error::{CompileError, CompileErrorKind};
use crate::pattern::{Item, Literal, Pattern, Placeholder, TypeRef};
use crate::{Builtin, CharClass, Quantifier};

/// Compile a pattern string.
///
/// Registered type names are not checked against any registry here.
pub fn compile(pattern: &str) -> Result<Pattern, CompileError> {
    Compiler::new(pattern).run()
}

/// Check that `name` can be used as a registry type name.
///
/// Names are non-empty identifiers of letters, digits, `-` and `_`, and
/// may not shadow a built-in type.
pub fn validate_type_name(name: &str) -> Result<(), CompileError> {
    let span = Span::from_range(0..name.len());
    if !is_identifier(name) {
        return Err(CompileError::new(
            CompileErrorKind::InvalidTypeName(name.to_string()),
            span,
            name,
        ));
    }
    if Builtin::from_name(name).is_some() {
        return Err(CompileError::new(
            CompileErrorKind::ReservedTypeName(name.to_string()),
            span,
            name,
        ));
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

struct Compiler<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    items: Vec<Item>,
    literal: String,
    literal_start: usize,
}

impl<'a> Compiler<'a> {
    fn new(source: &'a str) -> Self {
        Compiler {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
            items: Vec::new(),
            literal: String::new(),
            literal_start: 0,
        }
    }

    /// Byte offset of the current char (or end of source).
    fn offset(&self) -> usize {
        self.chars.get(self.pos).map_or(self.source.len(), |&(i, _)| i)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn error(&self, kind: CompileErrorKind, span: std::ops::Range<usize>) -> CompileError {
        CompileError::new(kind, Span::from_range(span), self.source)
    }

    fn run(mut self) -> Result<Pattern, CompileError> {
        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    self.bump();
                    match self.bump() {
                        Some(escaped @ ('{' | '}' | '\\')) => self.literal.push(escaped),
                        Some(other) => {
                            self.literal.push('\\');
                            self.literal.push(other);
                        }
                        None => self.literal.push('\\'),
                    }
                }
                '{' => {
                    self.flush_literal();
                    let placeholder = self.placeholder()?;
                    self.items.push(Item::Placeholder(placeholder));
                    self.literal_start = self.offset();
                }
                '}' => {
                    let at = self.offset();
                    return Err(self.error(CompileErrorKind::UnmatchedCloseBrace, at..at + 1));
                }
                _ => {
                    self.bump();
                    self.literal.push(c);
                }
            }
        }
        self.flush_literal();
        Ok(Pattern::new(self.source, self.items))
    }

    fn flush_literal(&mut self) {
        if self.literal.is_empty() {
            return;
        }
        let span = Span::from_range(self.literal_start..self.offset());
        self.items.push(Item::Literal(Literal {
            text: std::mem::take(&mut self.literal),
            span,
        }));
    }

    /// Parse `{name:type[:quantifier]}` starting at the `{`.
    fn placeholder(&mut self) -> Result<Placeholder, CompileError> {
        let open = self.offset();
        self.bump();

        let name = self.take_until(open, &[':', '}'])?.trim().to_string();
        if name.is_empty() {
            let at = self.offset();
            return Err(self.error(CompileErrorKind::EmptyName, open..at));
        }
        if !is_identifier(&name) {
            let at = self.offset();
            return Err(self.error(CompileErrorKind::InvalidName(name), open..at));
        }

        if self.bump() == Some('}') {
            let at = self.offset();
            return Err(self.error(CompileErrorKind::EmptyType { name }, open..at));
        }

        let type_start = self.offset();
        let target = if self.peek() == Some('[') {
            TypeRef::CharClass(self.char_class(open)?)
        } else {
            let type_name = self.take_until(open, &[':', '}'])?.trim().to_string();
            let type_end = self.offset();
            if type_name.is_empty() {
                return Err(self.error(CompileErrorKind::EmptyType { name }, open..type_end));
            }
            if let Some(builtin) = Builtin::from_name(&type_name) {
                TypeRef::Builtin(builtin)
            } else if is_identifier(&type_name) {
                TypeRef::Named(type_name)
            } else {
                return Err(self.error(
                    CompileErrorKind::InvalidTypeName(type_name),
                    type_start..type_end,
                ));
            }
        };

        let quantifier = match self.bump() {
            Some('}') => Quantifier::ONE,
            Some(':') => {
                let quant_start = self.offset();
                let text = self.take_until(open, &['}'])?;
                let quant_end = self.offset();
                self.bump();
                Quantifier::parse(text.trim()).ok_or_else(|| {
                    self.error(
                        CompileErrorKind::UnknownQuantifier(text.clone()),
                        quant_start..quant_end,
                    )
                })?
            }
            Some(_) => {
                // Only reachable after a char class followed by stray text.
                let at = self.offset();
                return Err(self.error(
                    CompileErrorKind::MalformedCharClass(
                        "unexpected text after `]`".to_string(),
                    ),
                    type_start..at,
                ));
            }
            None => {
                let end = self.source.len();
                return Err(self.error(CompileErrorKind::UnclosedPlaceholder, open..end));
            }
        };

        Ok(Placeholder {
            name,
            target,
            quantifier,
            span: Span::from_range(open..self.offset()),
        })
    }

    /// Collect chars up to (not including) one of `stops`.
    ///
    /// Hitting the end of the pattern or a nested `{` means the placeholder
    /// opened at `open` was never closed.
    fn take_until(&mut self, open: usize, stops: &[char]) -> Result<String, CompileError> {
        let mut text = String::new();
        loop {
            match self.peek() {
                Some(c) if stops.contains(&c) => return Ok(text),
                Some('{') | None => {
                    let end = self.offset();
                    return Err(self.error(CompileErrorKind::UnclosedPlaceholder, open..end));
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                }
            }
        }
    }

    /// Parse `[...]` up to the first unescaped `]`.
    fn char_class(&mut self, open: usize) -> Result<CharClass, CompileError> {
        let start = self.offset();
        self.bump();
        let mut body = String::new();
        loop {
            match self.bump() {
                Some('\\') => {
                    body.push('\\');
                    if let Some(next) = self.bump() {
                        body.push(next);
                    }
                }
                Some(']') => break,
                Some(c) => body.push(c),
                None => {
                    let end = self.source.len();
                    return Err(self.error(CompileErrorKind::UnclosedPlaceholder, open..end));
                }
            }
        }
        let end = self.offset();
        CharClass::parse(&body)
            .map_err(|reason| self.error(CompileErrorKind::MalformedCharClass(reason), start..end))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
