//! Built-in primitive types.

use std::fmt;

/// A primitive type matched directly by the engine, without registry lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Decimal number: `2`, `-0.5`, `.25`, `1e-3`.
    Float,
    /// Integer: `3`, `-12`.
    Int,
    /// One ASCII digit.
    Digit,
    /// One alphabetic character.
    Letter,
    /// One whitespace character.
    Whitespace,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Float,
        Builtin::Int,
        Builtin::Digit,
        Builtin::Letter,
        Builtin::Whitespace,
    ];

    /// Look up a built-in by its pattern name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "float" => Some(Builtin::Float),
            "int" => Some(Builtin::Int),
            "digit" => Some(Builtin::Digit),
            "letter" => Some(Builtin::Letter),
            "whitespace" => Some(Builtin::Whitespace),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Float => "float",
            Builtin::Int => "int",
            Builtin::Digit => "digit",
            Builtin::Letter => "letter",
            Builtin::Whitespace => "whitespace",
        }
    }

    /// Numbers get a placeholder marker but no suggestions once typing started.
    pub fn is_numeric(self) -> bool {
        matches!(self, Builtin::Float | Builtin::Int)
    }

    /// Single-character built-ins.
    pub fn single_char(self) -> Option<fn(char) -> bool> {
        match self {
            Builtin::Digit => Some(|c| c.is_ascii_digit()),
            Builtin::Letter => Some(char::is_alphabetic),
            Builtin::Whitespace => Some(char::is_whitespace),
            Builtin::Float | Builtin::Int => None,
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
