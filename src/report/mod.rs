//! Display data for one analysis: gauges, the word chart, the parallel text
//! and the annotated fragments.

use crate::pipeline::{AnalysisResult, FragmentScore, TextAnalyzer};
use crate::sentiment::SentimentModel;
use crate::text::WordCount;
use crate::translation::Translator;
use crate::utils::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

impl Tone {
    /// Strict comparison: a polarity exactly on the band edge is neutral.
    pub fn from_polarity(polarity: f64, band: f64) -> Self {
        if polarity > band {
            Tone::Positive
        } else if polarity < -band {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }

    pub fn fragment_marker(&self) -> &'static str {
        match self {
            Tone::Positive => "📗",
            Tone::Negative => "📕",
            Tone::Neutral => "📘",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Positive => "✨ Positive tone",
            Tone::Negative => "🌧️ Negative tone",
            Tone::Neutral => "🕯️ Neutral tone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectivityLevel {
    High,
    Objective,
}

impl SubjectivityLevel {
    pub fn from_score(subjectivity: f64, threshold: f64) -> Self {
        if subjectivity > threshold {
            SubjectivityLevel::High
        } else {
            SubjectivityLevel::Objective
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubjectivityLevel::High => "🎭 High subjectivity",
            SubjectivityLevel::Objective => "🗂️ Mostly objective",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentGauge {
    pub polarity: f64,
    /// `(polarity + 1) / 2`, ready for a 0..1 progress bar.
    pub progress: f64,
    pub tone: Tone,
    pub label: String,
}

impl SentimentGauge {
    pub fn new(polarity: f64, band: f64) -> Self {
        let tone = Tone::from_polarity(polarity, band);
        Self {
            polarity,
            progress: ((polarity + 1.0) / 2.0).clamp(0.0, 1.0),
            tone,
            label: format!("{} ({:.2})", tone.label(), polarity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectivityGauge {
    pub subjectivity: f64,
    pub progress: f64,
    pub level: SubjectivityLevel,
    pub label: String,
}

impl SubjectivityGauge {
    pub fn new(subjectivity: f64, threshold: f64) -> Self {
        let level = SubjectivityLevel::from_score(subjectivity, threshold);
        Self {
            subjectivity,
            progress: subjectivity.clamp(0.0, 1.0),
            level,
            label: format!("{} ({:.2})", level.label(), subjectivity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelText {
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentAnnotation {
    pub number: usize,
    pub marker: String,
    pub tone: Tone,
    pub original: String,
    pub translated: String,
    pub polarity: f64,
}

impl FragmentAnnotation {
    fn from_score(score: FragmentScore, band: f64) -> Self {
        let tone = Tone::from_polarity(score.sentiment.polarity, band);
        Self {
            number: score.number,
            marker: tone.fragment_marker().to_string(),
            tone,
            original: score.pair.original,
            translated: score.pair.translated,
            polarity: score.sentiment.polarity,
        }
    }
}

/// Presentation-ready view of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub sentiment: SentimentGauge,
    pub subjectivity: SubjectivityGauge,
    pub top_words: Vec<WordCount>,
    pub parallel_text: ParallelText,
    pub fragments: Vec<FragmentAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_warning: Option<String>,
}

impl AnalysisReport {
    /// Builds the report, re-scoring each displayed fragment through the
    /// analyzer's sentiment model.
    pub fn build<T: Translator, S: SentimentModel>(
        analyzer: &TextAnalyzer<T, S>,
        result: &AnalysisResult,
        config: &AnalysisConfig,
    ) -> Self {
        let fragments = analyzer
            .annotate_fragments(result, config.max_fragments)
            .into_iter()
            .map(|score| FragmentAnnotation::from_score(score, config.neutral_band))
            .collect();
        let overall = result.sentiment();

        Self {
            id: result.id,
            sentiment: SentimentGauge::new(overall.polarity, config.neutral_band),
            subjectivity: SubjectivityGauge::new(
                overall.subjectivity,
                config.subjectivity_threshold,
            ),
            top_words: result.word_frequencies.top(config.top_words).to_vec(),
            parallel_text: ParallelText {
                original: result.original_text.clone(),
                translated: result.translated_text.clone(),
            },
            fragments,
            translation_warning: result
                .translation
                .fallback_reason()
                .map(|reason| {
                    format!("Translation unavailable, the original text was analyzed ({})", reason)
                }),
        }
    }

    /// Plain-text rendering for terminals and tool output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if let Some(warning) = &self.translation_warning {
            let _ = writeln!(out, "⚠️  {}", warning);
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "Emotional temperature");
        let _ = writeln!(out, "  {} {}", bar(self.sentiment.progress, 30), self.sentiment.label);
        let _ = writeln!(out, "Subjectivity");
        let _ = writeln!(
            out,
            "  {} {}",
            bar(self.subjectivity.progress, 30),
            self.subjectivity.label
        );

        if !self.top_words.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Most resonant words");
            let max = self.top_words.first().map(|w| w.count).unwrap_or(1).max(1);
            let width = self
                .top_words
                .iter()
                .map(|w| w.word.chars().count())
                .max()
                .unwrap_or(0);
            for entry in &self.top_words {
                let _ = writeln!(
                    out,
                    "  {:<width$} {} {}",
                    entry.word,
                    bar(entry.count as f64 / max as f64, 20),
                    entry.count,
                    width = width
                );
            }
        }

        if !self.fragments.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Examined fragments");
            for fragment in &self.fragments {
                let _ = writeln!(
                    out,
                    "  {}. {} \"{}\"",
                    fragment.number, fragment.marker, fragment.original
                );
                let _ = writeln!(
                    out,
                    "     → \"{}\" (emotional index: {:.2})",
                    fragment.translated, fragment.polarity
                );
            }
        }

        out
    }
}

fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}
