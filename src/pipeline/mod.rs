//! The analysis pipeline: translate, score, align, count.

use crate::input::{Manuscript, ManuscriptSource};
use crate::sentiment::{Sentiment, SentimentModel};
use crate::text::{align_sentences, SentencePair, WordCounter, WordFrequency};
use crate::translation::{translate_or_fallback, TranslationOutcome, Translator};
use crate::utils::{AnalyzerError, AppConfig, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Everything one analysis produced. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub polarity: f64,
    pub subjectivity: f64,
    pub sentences: Vec<SentencePair>,
    pub word_frequencies: WordFrequency,
    pub tokens: Vec<String>,
    pub original_text: String,
    pub translated_text: String,
    pub translation: TranslationOutcome,
}

impl AnalysisResult {
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::new(self.polarity, self.subjectivity)
    }
}

/// A translated sentence scored on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentScore {
    /// 1-based position in the text.
    pub number: usize,
    pub pair: SentencePair,
    pub sentiment: Sentiment,
}

/// Owns the translation and sentiment collaborators. Construct once and share.
pub struct TextAnalyzer<T, S> {
    translator: T,
    sentiment: S,
    counter: WordCounter,
    source_lang: String,
    target_lang: String,
}

impl<T: Translator, S: SentimentModel> TextAnalyzer<T, S> {
    pub fn new(
        translator: T,
        sentiment: S,
        counter: WordCounter,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            translator,
            sentiment,
            counter,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    pub fn from_config(translator: T, sentiment: S, config: &AppConfig) -> Self {
        Self::new(
            translator,
            sentiment,
            WordCounter::from_config(&config.analysis),
            config.translation.source_lang.clone(),
            config.translation.target_lang.clone(),
        )
    }

    pub fn counter(&self) -> &WordCounter {
        &self.counter
    }

    /// Runs the whole pipeline over typed `text`.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        self.analyze_manuscript(&Manuscript::typed(text)).await
    }

    /// A failed translation does not fail the analysis: the original text is
    /// used in its place and the outcome records why. Blank typed input is
    /// rejected before anything is sent to the translator; an uploaded file is
    /// analyzed whatever it holds.
    pub async fn analyze_manuscript(&self, manuscript: &Manuscript) -> Result<AnalysisResult> {
        match manuscript.source {
            ManuscriptSource::Typed if manuscript.is_blank() => Err(AnalyzerError::EmptyInput),
            _ => self.run(&manuscript.text).await,
        }
    }

    async fn run(&self, text: &str) -> Result<AnalysisResult> {
        let id = Uuid::new_v4();
        info!(analysis_id = %id, chars = text.chars().count(), "Starting analysis");

        let translation =
            translate_or_fallback(&self.translator, text, &self.source_lang, &self.target_lang)
                .await;
        let translated_text = translation.text().to_string();

        let sentiment = self.sentiment.score(&translated_text);
        let sentences = align_sentences(text, &translated_text);
        let counts = self.counter.count(&translated_text);

        info!(
            analysis_id = %id,
            fallback = translation.is_fallback(),
            sentences = sentences.len(),
            tokens = counts.tokens.len(),
            polarity = sentiment.polarity,
            subjectivity = sentiment.subjectivity,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            id,
            polarity: sentiment.polarity,
            subjectivity: sentiment.subjectivity,
            sentences,
            word_frequencies: counts.frequencies,
            tokens: counts.tokens,
            original_text: text.to_string(),
            translated_text,
            translation,
        })
    }

    /// Scores each of the first `limit` translated sentences separately, in
    /// order.
    pub fn annotate_fragments(&self, result: &AnalysisResult, limit: usize) -> Vec<FragmentScore> {
        result
            .sentences
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, pair)| FragmentScore {
                number: i + 1,
                pair: pair.clone(),
                sentiment: self.sentiment.score(&pair.translated),
            })
            .collect()
    }
}
