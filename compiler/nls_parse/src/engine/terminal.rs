//! Terminal scanners: literals and numbers.
//!
//! Each scanner reports every accepted end offset (longest first) and
//! whether it stopped because the text ran out, which is what makes a
//! terminal eligible for autocompletion.

use smallvec::SmallVec;

use nls_pattern::Builtin;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum LiteralScan {
    /// The literal matched and ends here.
    Full(usize),
    /// The text ended inside the literal.
    Truncated,
    /// First differing byte offset.
    Mismatch(usize),
}

pub(super) fn scan_literal(text: &str, pos: usize, literal: &str) -> LiteralScan {
    let rest = &text[pos..];
    if rest.starts_with(literal) {
        return LiteralScan::Full(pos + literal.len());
    }
    let common: usize = rest
        .chars()
        .zip(literal.chars())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a.len_utf8())
        .sum();
    if common == rest.len() {
        LiteralScan::Truncated
    } else {
        LiteralScan::Mismatch(pos + common)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct NumberScan {
    /// Accepted end offsets, longest first.
    pub ends: SmallVec<[usize; 8]>,
    /// Where scanning stopped.
    pub reached: usize,
    /// Scanning stopped at the end of the text.
    pub at_eof: bool,
}

/// Scan an `int` (`[+-]?[0-9]+`) or a `float`
/// (`[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?`).
pub(super) fn scan_number(text: &str, pos: usize, builtin: Builtin) -> NumberScan {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let digits_from = |mut i: usize, ends: &mut SmallVec<[usize; 8]>| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
            ends.push(i);
        }
        i
    };

    let mut ends = SmallVec::new();
    let mut i = pos;
    if i < len && matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }
    let int_start = i;
    i = digits_from(i, &mut ends);
    let has_int = i > int_start;

    if builtin == Builtin::Float {
        if i < len && bytes[i] == b'.' {
            i += 1;
            if has_int {
                ends.push(i);
            }
            i = digits_from(i, &mut ends);
        }
        if !ends.is_empty() && i < len && matches!(bytes[i], b'e' | b'E') {
            let mut j = i + 1;
            if j < len && matches!(bytes[j], b'+' | b'-') {
                j += 1;
            }
            i = digits_from(j, &mut ends);
        }
    }

    ends.reverse();
    NumberScan {
        ends,
        reached: i,
        at_eof: i == len,
    }
}
