//! Parser configuration.

/// How repetitions (`*`, `+`, `n-m`) of registered and numeric types are
/// delimited in the input.
///
/// Character classes and single-character built-ins always repeat
/// adjacently: `{unit:[a-z]:+}` matches `mm`, not `m m`.
///
/// Either policy keeps every possible repetition count while matching, as
/// right-recursive list types do, so parsing a list grows quadratically
/// with its length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RepetitionPolicy {
    /// Repetitions follow each other directly, matched greedily.
    #[default]
    Adjacent,
    /// Repetitions are separated by this literal, e.g. `", "`.
    Separated(String),
}

impl RepetitionPolicy {
    /// The literal expected between two repetitions, if any.
    pub fn separator(&self) -> Option<&str> {
        match self {
            RepetitionPolicy::Adjacent => None,
            RepetitionPolicy::Separated(sep) if sep.is_empty() => None,
            RepetitionPolicy::Separated(sep) => Some(sep),
        }
    }
}

/// Options for a [`Parser`](crate::Parser).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    pub repetition: RepetitionPolicy,
    /// Accept several whitespace-separated sentences in one text.
    pub allow_multiple_sentences: bool,
    /// Opening delimiter of placeholder markers in suggestions.
    pub placeholder_open: String,
    /// Closing delimiter of placeholder markers in suggestions.
    pub placeholder_close: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            repetition: RepetitionPolicy::Adjacent,
            allow_multiple_sentences: true,
            placeholder_open: "${".to_string(),
            placeholder_close: "}".to_string(),
        }
    }
}

impl ParserConfig {
    /// The marker suggested for a placeholder named `name`, e.g. `${stddev}`.
    pub fn marker(&self, name: &str) -> String {
        format!("{}{name}{}", self.placeholder_open, self.placeholder_close)
    }

    /// Builder-style setter for the repetition policy.
    #[must_use]
    pub fn with_repetition(mut self, repetition: RepetitionPolicy) -> Self {
        self.repetition = repetition;
        self
    }

    /// Builder-style setter for the marker delimiters, e.g. `<` and `>`.
    #[must_use]
    pub fn with_placeholder_delimiters(
        mut self,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        self.placeholder_open = open.into();
        self.placeholder_close = close.into();
        self
    }

    /// Builder-style setter for multi-sentence scripts.
    #[must_use]
    pub fn with_multiple_sentences(mut self, allow: bool) -> Self {
        self.allow_multiple_sentences = allow;
        self
    }
}
