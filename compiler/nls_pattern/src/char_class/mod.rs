//! Bracketed character classes: `[a-zA-Z()]`, `[^0-9]`, `[a-z-]`.

use smallvec::SmallVec;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum ClassItem {
    Single(char),
    Range(char, char),
}

/// A set of characters written as a bracket expression.
///
/// Supports ranges (`a-z`), a leading `^` for negation, a literal `-` at
/// either end, and backslash escapes for `]`, `\`, `-` and `^`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CharClass {
    negated: bool,
    items: SmallVec<[ClassItem; 4]>,
    /// The bracket expression as written, including brackets.
    source: String,
}

impl CharClass {
    /// Parse the text between `[` and `]`.
    ///
    /// Returns a human-readable reason on failure.
    pub fn parse(body: &str) -> Result<Self, String> {
        let mut chars: Vec<char> = Vec::with_capacity(body.len());
        let mut escaped: Vec<bool> = Vec::with_capacity(body.len());
        let mut iter = body.chars();
        while let Some(c) = iter.next() {
            if c == '\\' {
                let Some(next) = iter.next() else {
                    return Err("dangling `\\` at end of character class".to_string());
                };
                chars.push(next);
                escaped.push(true);
            } else {
                chars.push(c);
                escaped.push(false);
            }
        }

        let mut i = 0;
        let negated = chars.first() == Some(&'^') && escaped.first() == Some(&false);
        if negated {
            i = 1;
        }
        if i >= chars.len() {
            return Err("character class is empty".to_string());
        }

        let mut items = SmallVec::new();
        while i < chars.len() {
            let c = chars[i];
            // `-` is a range operator only between two chars and when unescaped.
            let is_range = i + 2 < chars.len() && chars[i + 1] == '-' && !escaped[i + 1];
            if is_range {
                let end = chars[i + 2];
                if c > end {
                    return Err(format!("range `{c}-{end}` is out of order"));
                }
                items.push(ClassItem::Range(c, end));
                i += 3;
            } else {
                items.push(ClassItem::Single(c));
                i += 1;
            }
        }

        Ok(CharClass {
            negated,
            items,
            source: format!("[{body}]"),
        })
    }

    /// Whether `c` belongs to the class.
    pub fn contains(&self, c: char) -> bool {
        let hit = self.items.iter().any(|item| match *item {
            ClassItem::Single(s) => s == c,
            ClassItem::Range(lo, hi) => (lo..=hi).contains(&c),
        });
        hit != self.negated
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The bracket expression as written.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
