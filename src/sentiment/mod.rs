//! Sentiment scoring.
//!
//! The pipeline only sees the [`SentimentModel`] trait. [`LexiconSentiment`]
//! is the bundled implementation: a word lexicon averaged over the text, with
//! intensifiers and negation.

pub mod lexicon;

pub use lexicon::{LexiconEntry, LexiconSentiment};

use serde::{Deserialize, Serialize};

/// Polarity in `[-1, 1]` and subjectivity in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl Sentiment {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }

    pub fn neutral() -> Self {
        Self::default()
    }
}

pub trait SentimentModel: Send + Sync {
    fn score(&self, text: &str) -> Sentiment;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_ranges() {
        let s = Sentiment::new(1.7, -0.2);
        assert_eq!(s.polarity, 1.0);
        assert_eq!(s.subjectivity, 0.0);

        let s = Sentiment::new(-3.0, 4.0);
        assert_eq!(s.polarity, -1.0);
        assert_eq!(s.subjectivity, 1.0);
    }
}
