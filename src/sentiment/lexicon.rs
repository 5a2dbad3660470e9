use crate::sentiment::{Sentiment, SentimentModel};
use crate::utils::{AnalyzerError, Result};
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

static LEXICON_WORD: OnceLock<Regex> = OnceLock::new();

fn lexicon_word() -> &'static Regex {
    LEXICON_WORD.get_or_init(|| Regex::new(r"[\w']+").expect("lexicon word regex must compile"))
}

/// Words after a negation that can still be flipped by it.
const NEGATION_REACH: usize = 3;
/// Negated polarity is reversed and halved: "not good" is mildly negative.
const NEGATION_FACTOR: f64 = -0.5;

const NEGATIONS: &[&str] = &["not", "never", "no", "nothing", "neither", "nor", "without"];

// (word, polarity, subjectivity, intensity)
const DEFAULT_LEXICON: &[(&str, f64, f64, f64)] = &[
    // modifiers
    ("very", 0.0, 0.0, 1.3),
    ("really", 0.0, 0.0, 1.2),
    ("extremely", 0.0, 0.0, 1.5),
    ("incredibly", 0.0, 0.0, 1.4),
    ("so", 0.0, 0.0, 1.2),
    ("too", 0.0, 0.0, 1.2),
    ("quite", 0.0, 0.0, 1.1),
    ("slightly", 0.0, 0.0, 0.6),
    ("somewhat", 0.0, 0.0, 0.7),
    ("barely", 0.0, 0.0, 0.5),
    // positive
    ("good", 0.7, 0.6, 1.0),
    ("great", 0.8, 0.75, 1.0),
    ("excellent", 1.0, 1.0, 1.0),
    ("wonderful", 1.0, 1.0, 1.0),
    ("beautiful", 0.85, 1.0, 1.0),
    ("lovely", 0.5, 0.75, 1.0),
    ("happy", 0.8, 1.0, 1.0),
    ("joy", 0.8, 0.9, 1.0),
    ("joyful", 0.8, 0.9, 1.0),
    ("love", 0.5, 0.6, 1.0),
    ("loved", 0.7, 0.8, 1.0),
    ("nice", 0.6, 1.0, 1.0),
    ("bright", 0.7, 0.75, 1.0),
    ("warm", 0.6, 0.6, 1.0),
    ("gentle", 0.5, 0.7, 1.0),
    ("kind", 0.6, 0.9, 1.0),
    ("hope", 0.4, 0.6, 1.0),
    ("hopeful", 0.5, 0.7, 1.0),
    ("peaceful", 0.6, 0.8, 1.0),
    ("calm", 0.3, 0.75, 1.0),
    ("free", 0.4, 0.8, 1.0),
    ("sweet", 0.35, 0.65, 1.0),
    ("best", 1.0, 0.3, 1.0),
    ("better", 0.5, 0.5, 1.0),
    ("perfect", 1.0, 1.0, 1.0),
    ("amazing", 0.6, 0.9, 1.0),
    ("brilliant", 0.9, 1.0, 1.0),
    ("glad", 0.5, 1.0, 1.0),
    ("fast", 0.2, 0.6, 1.0),
    ("alive", 0.1, 0.5, 1.0),
    // negative
    ("bad", -0.7, 0.67, 1.0),
    ("worse", -0.4, 0.6, 1.0),
    ("worst", -1.0, 1.0, 1.0),
    ("terrible", -1.0, 1.0, 1.0),
    ("awful", -1.0, 1.0, 1.0),
    ("horrible", -1.0, 1.0, 1.0),
    ("ugly", -0.7, 1.0, 1.0),
    ("sad", -0.5, 1.0, 1.0),
    ("unhappy", -0.6, 0.9, 1.0),
    ("sorrow", -0.5, 0.8, 1.0),
    ("pain", -0.5, 0.7, 1.0),
    ("painful", -0.7, 0.9, 1.0),
    ("hate", -0.8, 0.9, 1.0),
    ("cruel", -1.0, 1.0, 1.0),
    ("cold", -0.6, 1.0, 1.0),
    ("dark", -0.15, 0.4, 1.0),
    ("lonely", -0.5, 0.9, 1.0),
    ("alone", -0.1, 0.5, 1.0),
    ("angry", -0.5, 1.0, 1.0),
    ("afraid", -0.6, 0.9, 1.0),
    ("fear", -0.5, 0.8, 1.0),
    ("tired", -0.4, 0.7, 1.0),
    ("broken", -0.4, 0.4, 1.0),
    ("dead", -0.2, 0.4, 1.0),
    ("poor", -0.4, 0.6, 1.0),
    ("slow", -0.3, 0.4, 1.0),
    ("boring", -1.0, 1.0, 1.0),
    ("wrong", -0.5, 0.9, 1.0),
    ("difficult", -0.5, 1.0, 1.0),
    // neutral but opinionated
    ("strange", 0.0, 0.15, 1.0),
    ("important", 0.4, 1.0, 1.0),
    ("old", 0.1, 0.2, 1.0),
    ("new", 0.14, 0.45, 1.0),
];

/// Scoring data for one word. A word with zero polarity and an intensity
/// other than 1 is a modifier: it scales the next scored word instead of
/// being scored itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
}

fn default_intensity() -> f64 {
    1.0
}

impl LexiconEntry {
    pub fn new(polarity: f64, subjectivity: f64, intensity: f64) -> Self {
        Self {
            polarity,
            subjectivity,
            intensity,
        }
    }

    fn is_modifier(&self) -> bool {
        self.polarity == 0.0 && self.intensity != 1.0
    }
}

/// Averages the polarity and subjectivity of every lexicon word found in the
/// text. Texts without lexicon words score as neutral and objective.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    entries: FxHashMap<String, LexiconEntry>,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentiment {
    /// The bundled English lexicon.
    pub fn new() -> Self {
        let entries = DEFAULT_LEXICON
            .iter()
            .map(|&(word, polarity, subjectivity, intensity)| {
                (
                    word.to_string(),
                    LexiconEntry::new(polarity, subjectivity, intensity),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, word: &str, entry: LexiconEntry) {
        self.entries.insert(word.to_lowercase(), entry);
    }

    /// Merges a JSON object of `word -> {polarity, subjectivity, intensity?}`
    /// over the current entries.
    pub fn merge_json(&mut self, json: &str) -> Result<usize> {
        let extra: HashMap<String, LexiconEntry> = serde_json::from_str(json)?;
        let added = extra.len();
        for (word, entry) in extra {
            self.insert(&word, entry);
        }
        Ok(added)
    }

    /// The bundled lexicon extended with the entries in a JSON file.
    pub fn with_lexicon_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyzerError::ConfigError(format!("Cannot read lexicon {}: {}", path.display(), e))
        })?;

        let mut model = Self::new();
        let added = model.merge_json(&content)?;
        tracing::info!(path = %path.display(), entries = added, "Loaded extra lexicon entries");
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SentimentModel for LexiconSentiment {
    fn score(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();

        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();
        let mut intensity = 1.0;
        let mut negation_reach = 0usize;

        for word in lexicon_word().find_iter(&lowered).map(|m| m.as_str()) {
            if NEGATIONS.contains(&word) || word.ends_with("n't") {
                negation_reach = NEGATION_REACH;
                continue;
            }

            match self.entries.get(word) {
                Some(entry) if entry.is_modifier() => {
                    intensity *= entry.intensity;
                }
                Some(entry) => {
                    let mut polarity = entry.polarity * intensity;
                    if negation_reach > 0 {
                        polarity *= NEGATION_FACTOR;
                    }
                    polarities.push(polarity);
                    subjectivities.push(entry.subjectivity * intensity);

                    intensity = 1.0;
                    negation_reach = 0;
                }
                None => {
                    intensity = 1.0;
                    negation_reach = negation_reach.saturating_sub(1);
                }
            }
        }

        if polarities.is_empty() {
            return Sentiment::neutral();
        }

        let n = polarities.len() as f64;
        Sentiment::new(
            polarities.iter().sum::<f64>() / n,
            subjectivities.iter().sum::<f64>() / n,
        )
    }
}
