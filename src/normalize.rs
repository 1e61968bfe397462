//! Name normalization
//!
//! Turns a raw Business Partner name into the canonical form that the
//! scorer compares: lowercase, punctuation replaced by word breaks, and
//! ignore-words (titles, legal suffixes, stopwords) removed.

use ahash::AHashSet;

/// Words dropped by [`Normalizer::default`].
pub const DEFAULT_IGNORE_WORDS: &[&str] = &[
    // Titles
    "mrs", "ms", "mr", "dr", "prof",
    // Corporate suffixes
    "company", "co", "ltd", "llc", "inc", "corp", "corporation", "limited", "plc", "gmbh", "ag",
    "sa", "srl",
    // Stopwords
    "the", "and", "&",
];

/// Canonicalizes names before comparison.
///
/// Normalization is a total function: any input, including the empty
/// string, produces a defined (possibly empty) output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    ignore_words: AHashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_ignore_words(DEFAULT_IGNORE_WORDS.iter().copied())
    }
}

impl Normalizer {
    /// Normalizer using the built-in [`DEFAULT_IGNORE_WORDS`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizer with a custom ignore list.
    ///
    /// Entries are trimmed and lowercased; blank entries are discarded and
    /// duplicates collapse. An empty list ignores nothing.
    pub fn with_ignore_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ignore_words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { ignore_words }
    }

    /// Build from an optional list: `None` selects the defaults.
    pub fn from_optional<S: AsRef<str>>(words: Option<&[S]>) -> Self {
        match words {
            Some(words) => Self::with_ignore_words(words),
            None => Self::default(),
        }
    }

    /// The active ignore set, lowercased.
    pub fn ignore_words(&self) -> &AHashSet<String> {
        &self.ignore_words
    }

    /// Whether `token` is dropped during normalization (case-insensitive).
    pub fn is_ignored(&self, token: &str) -> bool {
        if self.ignore_words.contains(token) {
            return true;
        }
        self.ignore_words.contains(&token.to_lowercase())
    }

    /// Normalize a name for comparison.
    ///
    /// # Examples
    /// ```
    /// use bp_dupcheck::normalize::Normalizer;
    /// let normalizer = Normalizer::default();
    /// assert_eq!(normalizer.normalize("Mr. John  Doe"), "john doe");
    /// assert_eq!(normalizer.normalize("ABC Company Ltd."), "abc");
    /// ```
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();

        // Punctuation becomes a space so adjacent words stay separate
        let cleaned: String = lowered
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| !self.is_ignored(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split a comma-separated ignore list as typed into a text field.
///
/// # Examples
/// ```
/// use bp_dupcheck::normalize::parse_ignore_list;
/// assert_eq!(parse_ignore_list("Mr, Ltd,, Inc "), vec!["Mr", "Ltd", "Inc"]);
/// ```
pub fn parse_ignore_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
