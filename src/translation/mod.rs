pub mod client;
pub mod long_text;

pub use client::{parse_google_response, TranslationClient};
pub use long_text::LongTextHandler;

use crate::utils::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Converts text between two languages.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// What the pipeline actually worked with: a real translation, or the
/// original text standing in for one after the service failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslationOutcome {
    Translated { text: String },
    Fallback { text: String, reason: String },
}

impl TranslationOutcome {
    pub fn text(&self) -> &str {
        match self {
            TranslationOutcome::Translated { text } => text,
            TranslationOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TranslationOutcome::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            TranslationOutcome::Fallback { reason, .. } => Some(reason),
            TranslationOutcome::Translated { .. } => None,
        }
    }
}

/// Translates `text`, or hands it back untouched with the failure reason.
pub async fn translate_or_fallback<T: Translator>(
    translator: &T,
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> TranslationOutcome {
    match translator.translate(text, source_lang, target_lang).await {
        Ok(translated) => TranslationOutcome::Translated { text: translated },
        Err(e) => {
            tracing::warn!(
                error = %e,
                source_lang = source_lang,
                target_lang = target_lang,
                "Translation failed, continuing with original text"
            );
            TranslationOutcome::Fallback {
                text: text.to_string(),
                reason: e.to_string(),
            }
        }
    }
}
