use crate::input::Manuscript;
use crate::pipeline::{AnalysisResult, TextAnalyzer};
use crate::report::AnalysisReport;
use crate::sentiment::LexiconSentiment;
use crate::translation::TranslationClient;
use crate::utils::{AppConfig, Result};
use serde::Serialize;
use std::sync::Arc;

pub type Analyzer = TextAnalyzer<TranslationClient, LexiconSentiment>;

/// Shared by every request. Built once at startup; nothing in it is mutated
/// afterwards, so there are no locks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analyzer: Arc<Analyzer>,
}

/// A finished analysis together with its report and, for uploads, the
/// preview shown before the text.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub report: AnalysisReport,
    pub result: AnalysisResult,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let translator = TranslationClient::new(config.translation.clone())?;
        let sentiment = match &config.analysis.lexicon_path {
            Some(path) => LexiconSentiment::with_lexicon_file(path)?,
            None => LexiconSentiment::new(),
        };
        let lexicon_entries = sentiment.len();
        let analyzer = TextAnalyzer::from_config(translator, sentiment, &config);

        tracing::info!(
            provider = ?config.translation.provider,
            stopwords = analyzer.counter().stopwords().len(),
            lexicon_entries,
            "Analyzer ready"
        );

        Ok(Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
        })
    }

    pub async fn analyze(&self, manuscript: &Manuscript) -> Result<AnalysisResponse> {
        let result = self.analyzer.analyze_manuscript(manuscript).await?;
        let report = AnalysisReport::build(&self.analyzer, &result, &self.config.analysis);

        let preview = manuscript
            .file_name()
            .map(|_| manuscript.preview(self.config.analysis.preview_chars));

        Ok(AnalysisResponse {
            file_name: manuscript.file_name().map(str::to_string),
            preview,
            report,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AnalyzerError;

    #[test]
    fn test_state_builds_from_default_config() {
        let state = AppState::from_config(AppConfig::default()).unwrap();
        assert_eq!(state.config.analysis.top_words, 10);
        assert!(state.analyzer.counter().stopwords().contains("the"));
    }

    #[test]
    fn test_missing_lexicon_file_is_config_error() {
        let mut config = AppConfig::default();
        config.analysis.lexicon_path = Some("/no/such/lexicon.json".to_string());
        let err = AppState::from_config(config).err().unwrap();
        assert!(matches!(err, AnalyzerError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_blank_manuscript_never_reaches_translator() {
        let state = AppState::from_config(AppConfig::default()).unwrap();
        let err = state.analyze(&Manuscript::typed("\n\n")).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyInput));
    }
}
