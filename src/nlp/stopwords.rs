//! Stopword filtering
//!
//! Stopword lists come from the `stop-words` crate. A filter is built once per
//! [`Summarizer`](crate::pipeline::runner::Summarizer) and shared read-only
//! across requests.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A filter for removing stopwords from normalized terms
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Create a new stopword filter for the given language
    ///
    /// Unknown languages fall back to English.
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
        }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Build the filter a request configuration asks for: the language list
    /// extended with any extra words.
    pub fn for_language_with_extras<S: AsRef<str>>(language: &str, extras: &[S]) -> Self {
        let mut filter = Self::new(language);
        for word in extras {
            filter.stopwords.insert(word.as_ref().to_lowercase());
        }
        filter
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.remove(&word.to_lowercase());
        }
    }

    /// Check if a normalized (lowercase) term is a stopword
    pub fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.contains(term)
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: &str) -> FxHashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            _ => LANGUAGE::English,
        };

        get(lang).iter().map(|s| s.to_lowercase()).collect()
    }
}
