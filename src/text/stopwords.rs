//! Stopword sets used by the word-frequency counter.
//!
//! The built-in list covers the English function words that dominate a
//! translated text. A `stop-words` list for another language and extra words
//! from configuration can be merged in.

use crate::utils::AnalysisConfig;
use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

const ENGLISH_STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "him", "his", "how", "its", "who", "did", "she", "they", "them",
    "their", "theirs", "this", "that", "with", "from", "have", "having", "were", "been", "being",
    "what", "when", "where", "which", "while", "there", "then", "than", "into", "also", "just",
    "over", "such", "some", "very", "will", "would", "could", "should", "shall", "about",
    "after", "again", "before", "because", "these", "those", "your", "yours", "each", "only",
    "other", "more", "most", "does", "doing", "here", "both", "few", "own", "same", "too",
    "under", "until", "why", "nor", "off", "once", "above", "below", "between", "through",
    "during", "against", "itself", "himself", "herself", "themselves", "ourselves", "myself",
    "yourself", "yourselves", "whom", "may", "might", "must", "upon", "ours", "hers", "let",
];

/// A set of lowercase words excluded from frequency counting.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: FxHashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordSet {
    /// The built-in English list.
    pub fn english() -> Self {
        Self::from_list(ENGLISH_STOPWORDS)
    }

    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// The `stop-words` list for a language code or name.
    ///
    /// Returns `None` for languages the crate has no list for.
    pub fn for_language(language: &str) -> Option<Self> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "es" | "spanish" => LANGUAGE::Spanish,
            "fr" | "french" => LANGUAGE::French,
            "de" | "german" => LANGUAGE::German,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            _ => return None,
        };

        Some(Self {
            words: get(lang).iter().map(|s| s.to_lowercase()).collect(),
        })
    }

    /// Built-in list, plus the configured language list and extra words.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let mut set = Self::english();

        if let Some(language) = &config.stopword_language {
            match Self::for_language(language) {
                Some(extra) => set.words.extend(extra.words),
                None => tracing::warn!(
                    language = %language,
                    "No stopword list for language, using built-in list only"
                ),
            }
        }

        set.extend(&config.extra_stopwords);
        set
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Expects an already-lowercased word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
