//! Placeholder quantifiers.

use std::fmt;

/// How many times a placeholder's type may repeat.
///
/// `?`, `*` and `+` are the common cases; `n` and `n-m` give exact bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quantifier {
    pub min: u32,
    /// `None` means unbounded.
    pub max: Option<u32>,
}

impl Quantifier {
    /// Exactly one (no quantifier written).
    pub const ONE: Quantifier = Quantifier {
        min: 1,
        max: Some(1),
    };
    /// `?`
    pub const OPTIONAL: Quantifier = Quantifier {
        min: 0,
        max: Some(1),
    };
    /// `*`
    pub const ZERO_OR_MORE: Quantifier = Quantifier { min: 0, max: None };
    /// `+`
    pub const ONE_OR_MORE: Quantifier = Quantifier { min: 1, max: None };

    /// Parse the text after the second `:` of a placeholder.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "?" => return Some(Self::OPTIONAL),
            "*" => return Some(Self::ZERO_OR_MORE),
            "+" => return Some(Self::ONE_OR_MORE),
            _ => {}
        }

        if let Some((lo, hi)) = text.split_once('-') {
            let min = parse_count(lo)?;
            let max = parse_count(hi)?;
            return (min <= max && max > 0).then_some(Quantifier {
                min,
                max: Some(max),
            });
        }

        let n = parse_count(text)?;
        (n > 0).then_some(Quantifier { min: n, max: Some(n) })
    }

    pub fn is_one(self) -> bool {
        self == Self::ONE
    }

    pub fn is_optional(self) -> bool {
        self == Self::OPTIONAL
    }

    /// Whether zero occurrences satisfy the quantifier.
    pub fn accepts_zero(self) -> bool {
        self.min == 0
    }

    /// Whether another repetition is allowed after `done` of them.
    pub fn allows_more(self, done: u32) -> bool {
        self.max.map_or(true, |max| done < max)
    }
}

fn parse_count(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl Default for Quantifier {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (1, Some(1)) => Ok(()),
            (0, Some(1)) => write!(f, "?"),
            (0, None) => write!(f, "*"),
            (1, None) => write!(f, "+"),
            (n, Some(m)) if n == m => write!(f, "{n}"),
            (n, Some(m)) => write!(f, "{n}-{m}"),
            (n, None) => write!(f, "{n}-"),
        }
    }
}
