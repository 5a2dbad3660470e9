use crate::translation::long_text::LongTextHandler;
use crate::translation::Translator;
use crate::utils::{AnalyzerError, Result, TranslationConfig, TranslationProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;

/// HTTP translation client, built once at startup and shared by every
/// analysis.
pub struct TranslationClient {
    client: Client,
    config: TranslationConfig,
    long_text: LongTextHandler,
}

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl TranslationClient {
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            long_text: LongTextHandler::new(config.max_chunk_chars),
            config,
        })
    }

    async fn translate_chunk(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        match self.config.provider {
            TranslationProvider::Google => self.call_google(text, source_lang, target_lang).await,
            TranslationProvider::Libre => self.call_libre(text, source_lang, target_lang).await,
        }
    }

    async fn call_google(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::ApiError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let body: JsonValue = response.json().await?;
        parse_google_response(&body)
    }

    async fn call_libre(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let request = LibreRequest {
            q: text,
            source: source_lang,
            target: target_lang,
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::ApiError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let api_response: LibreResponse = response.json().await?;
        Ok(api_response.translated_text)
    }
}

impl Translator for TranslationClient {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        self.long_text
            .translate_with(text, |chunk| self.translate_chunk(chunk, source_lang, target_lang))
            .await
    }
}

/// The web endpoint answers with nested arrays; the first element holds one
/// `[translated, original, ...]` entry per sentence.
pub fn parse_google_response(body: &JsonValue) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(JsonValue::as_array)
        .ok_or_else(|| AnalyzerError::TranslationFailed("No segments in response".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(JsonValue::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(AnalyzerError::TranslationFailed(
            "Empty translation in response".to_string(),
        ));
    }

    Ok(text)
}
