//! Word-frequency counting.
//!
//! Tokens are runs of Unicode word characters in the lowercased text. Stopwords
//! and tokens of `min_token_length` characters or fewer are dropped. There is
//! no stemming: `run` and `runs` are different tokens.

use crate::text::stopwords::StopwordSet;
use crate::utils::AnalysisConfig;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static WORD_PATTERN: OnceLock<Regex> = OnceLock::new();

// Unicode \w also matches combining marks, so decomposed "cafe\u{301}" stays
// one token. Translator output is NFC in practice.
fn word_pattern() -> &'static Regex {
    WORD_PATTERN.get_or_init(|| Regex::new(r"\b\w+\b").expect("word regex must compile"))
}

/// One entry of a frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Token counts ordered by count descending. Equal counts keep the order in
/// which the tokens were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequency {
    entries: Vec<WordCount>,
}

impl WordFrequency {
    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }

    pub fn top(&self, n: usize) -> &[WordCount] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.word == word)
            .map(|entry| entry.count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|entry| (entry.word.as_str(), entry.count))
    }
}

/// Frequencies plus the filtered tokens in text order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCounts {
    pub frequencies: WordFrequency,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct WordCounter {
    stopwords: StopwordSet,
    min_token_length: usize,
}

impl Default for WordCounter {
    fn default() -> Self {
        Self::new(StopwordSet::english(), 2)
    }
}

impl WordCounter {
    pub fn new(stopwords: StopwordSet, min_token_length: usize) -> Self {
        Self {
            stopwords,
            min_token_length,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(StopwordSet::from_config(config), config.min_token_length)
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Lowercased word tokens that survive the stopword and length filters.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        word_pattern()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|word| self.keeps(word))
            .map(str::to_string)
            .collect()
    }

    pub fn count(&self, text: &str) -> WordCounts {
        let tokens = self.tokenize(text);

        let mut entries: Vec<WordCount> = Vec::new();
        {
            let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
            for token in &tokens {
                match positions.get(token.as_str()) {
                    Some(&idx) => entries[idx].count += 1,
                    None => {
                        positions.insert(token.as_str(), entries.len());
                        entries.push(WordCount {
                            word: token.clone(),
                            count: 1,
                        });
                    }
                }
            }
        }

        // sort_by is stable: ties stay in first-seen order
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        WordCounts {
            frequencies: WordFrequency { entries },
            tokens,
        }
    }

    fn keeps(&self, word: &str) -> bool {
        word.chars().count() > self.min_token_length && !self.stopwords.contains(word)
    }
}

/// Counts words with the built-in English stopwords.
pub fn count_words(text: &str) -> WordCounts {
    WordCounter::default().count(text)
}
