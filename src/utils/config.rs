use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "ESCRUTADOR_TRANSLATION_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub translation: TranslationConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub http_port: u16,
    pub bind_addr: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// The public web endpoint behind Google Translate.
    Google,
    /// Any LibreTranslate-compatible `/translate` endpoint.
    Libre,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub provider: TranslationProvider,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub source_lang: String,
    pub target_lang: String,
    pub timeout_seconds: u64,
    /// Longer texts are sent in several requests split on sentence ends.
    pub max_chunk_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Tokens must be strictly longer than this to be counted.
    pub min_token_length: usize,
    /// Language code for a `stop-words` list merged into the built-in set.
    pub stopword_language: Option<String>,
    pub extra_stopwords: Vec<String>,
    /// JSON file of extra sentiment lexicon entries.
    pub lexicon_path: Option<String>,
    pub top_words: usize,
    pub max_fragments: usize,
    pub preview_chars: usize,
    pub neutral_band: f64,
    pub subjectivity_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "escrutador".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            http_port: 9527,
            bind_addr: "0.0.0.0".to_string(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::Google,
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            api_key: None,
            source_lang: "es".to_string(),
            target_lang: "en".to_string(),
            timeout_seconds: 30,
            max_chunk_chars: 4500,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_token_length: 2,
            stopword_language: None,
            extra_stopwords: Vec::new(),
            lexicon_path: None,
            top_words: 10,
            max_fragments: 10,
            preview_chars: 1000,
            neutral_band: 0.05,
            subjectivity_threshold: 0.5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> crate::utils::errors::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::utils::errors::AnalyzerError::ConfigError(e.to_string()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::utils::errors::Result<Self> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| crate::utils::errors::AnalyzerError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// A missing file means defaults. A file that fails to read, parse or
    /// validate also means defaults, and its error is handed back so the
    /// caller can report it once logging is up.
    pub fn load_or_default(path: Option<&str>) -> (Self, Option<crate::utils::errors::AnalyzerError>) {
        let (mut config, error) = match path {
            Some(p) if std::path::Path::new(p).exists() => match Self::load_from_file(p) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            },
            _ => (Self::default(), None),
        };
        config.apply_env();
        (config, error)
    }

    /// Lets the API key live outside the config file.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.translation.api_key = Some(key);
            }
        }
    }

    fn validate(&mut self) -> crate::utils::errors::Result<()> {
        let analysis = &self.analysis;
        if !(0.0..1.0).contains(&analysis.neutral_band) {
            return Err(crate::utils::errors::AnalyzerError::ConfigError(format!(
                "analysis.neutral_band must be in [0, 1), got {}",
                analysis.neutral_band
            )));
        }
        if !(0.0..=1.0).contains(&analysis.subjectivity_threshold) {
            return Err(crate::utils::errors::AnalyzerError::ConfigError(format!(
                "analysis.subjectivity_threshold must be in [0, 1], got {}",
                analysis.subjectivity_threshold
            )));
        }
        if self.translation.timeout_seconds == 0 {
            self.translation.timeout_seconds = TranslationConfig::default().timeout_seconds;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_display_thresholds() {
        let config = AppConfig::default();
        assert_eq!(config.analysis.top_words, 10);
        assert_eq!(config.analysis.max_fragments, 10);
        assert_eq!(config.analysis.preview_chars, 1000);
        assert_eq!(config.analysis.min_token_length, 2);
        assert_eq!(config.translation.source_lang, "es");
        assert_eq!(config.translation.target_lang, "en");
        assert_eq!(config.translation.provider, TranslationProvider::Google);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [translation]
            provider = "libre"
            endpoint = "http://localhost:5000/translate"

            [analysis]
            extra_stopwords = ["said"]
            "#,
        )
        .unwrap();

        assert_eq!(config.translation.provider, TranslationProvider::Libre);
        assert_eq!(config.translation.source_lang, "es");
        assert_eq!(config.analysis.extra_stopwords, vec!["said".to_string()]);
        assert_eq!(config.analysis.top_words, 10);
        assert_eq!(config.server.http_port, 9527);
    }

    #[test]
    fn test_invalid_band_is_rejected() {
        let err = AppConfig::from_toml("[analysis]\nneutral_band = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("neutral_band"));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let (config, error) = AppConfig::load_or_default(Some("/definitely/not/here.toml"));
        assert_eq!(config.server.name, "escrutador");
        assert!(error.is_none());
    }

    #[test]
    fn test_invalid_file_falls_back_and_reports() {
        let path = std::env::temp_dir().join(format!("escrutador-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[analysis]\ntop_words = 3\nneutral_band = 5.0\n").unwrap();

        let (config, error) = AppConfig::load_or_default(path.to_str());
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.analysis.top_words, 10);
        assert!((config.analysis.neutral_band - 0.05).abs() < 1e-9);
        let error = error.expect("invalid file must be reported");
        assert!(error.to_string().contains("neutral_band"));
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("escrutador-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[analysis]\ntop_words = 3\n").unwrap();

        let (config, error) = AppConfig::load_or_default(path.to_str());
        std::fs::remove_file(&path).unwrap();

        assert!(error.is_none());
        assert_eq!(config.analysis.top_words, 3);
    }
}
