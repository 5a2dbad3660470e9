use crate::utils::Result;
use regex::Regex;
use std::future::Future;
use std::sync::OnceLock;

static SENTENCE_END: OnceLock<Regex> = OnceLock::new();

fn sentence_end() -> &'static Regex {
    SENTENCE_END.get_or_init(|| Regex::new(r"[.!?]+\s*").expect("sentence end regex must compile"))
}

/// Splits text that is too long for a single translation request into pieces
/// that end on sentence boundaries.
pub struct LongTextHandler {
    max_chars: usize,
}

impl LongTextHandler {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    pub fn needs_chunking(&self, content: &str) -> bool {
        content.chars().count() > self.max_chars
    }

    /// Concatenating the returned pieces gives back `content` exactly. A single
    /// sentence longer than the limit is split on character boundaries.
    pub fn chunk_content<'a>(&self, content: &'a str) -> Vec<&'a str> {
        if !self.needs_chunking(content) {
            return vec![content];
        }

        let mut chunks = Vec::new();
        let mut chunk_start = 0;
        let mut chunk_chars = 0;
        let mut sentence_start = 0;

        let mut boundaries: Vec<usize> = sentence_end().find_iter(content).map(|m| m.end()).collect();
        if boundaries.last() != Some(&content.len()) {
            boundaries.push(content.len());
        }

        for end in boundaries {
            let sentence = &content[sentence_start..end];
            let sentence_chars = sentence.chars().count();

            if chunk_chars + sentence_chars > self.max_chars && chunk_chars > 0 {
                chunks.push(&content[chunk_start..sentence_start]);
                chunk_start = sentence_start;
                chunk_chars = 0;
            }

            if sentence_chars > self.max_chars {
                for piece in self.split_by_chars(sentence) {
                    chunks.push(piece);
                }
                chunk_start = end;
                chunk_chars = 0;
            } else {
                chunk_chars += sentence_chars;
            }

            sentence_start = end;
        }

        if chunk_start < content.len() {
            chunks.push(&content[chunk_start..]);
        }

        chunks
    }

    /// Sends each non-blank chunk of `content` through `translate`, in order,
    /// and merges the results. The first failing chunk fails the whole text.
    pub async fn translate_with<'a, F, Fut>(&self, content: &'a str, mut translate: F) -> Result<String>
    where
        F: FnMut(&'a str) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let chunks = self.chunk_content(content);
        if chunks.len() > 1 {
            tracing::debug!(chunks = chunks.len(), "Translating long text in pieces");
        }

        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            if chunk.trim().is_empty() {
                continue;
            }
            translated.push(translate(chunk).await?);
        }

        Ok(self.merge_translations(translated))
    }

    pub fn merge_translations(&self, translated_chunks: Vec<String>) -> String {
        translated_chunks
            .iter()
            .map(|chunk| chunk.trim())
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn split_by_chars<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut count = 0;
        for (idx, _) in text.char_indices() {
            if count == self.max_chars {
                pieces.push(&text[start..idx]);
                start = idx;
                count = 0;
            }
            count += 1;
        }
        if start < text.len() {
            pieces.push(&text[start..]);
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AnalyzerError;

    #[test]
    fn test_short_text_is_one_chunk() {
        let handler = LongTextHandler::new(100);
        assert_eq!(handler.chunk_content("Hola. Adiós."), vec!["Hola. Adiós."]);
    }

    #[test]
    fn test_chunks_end_on_sentence_boundaries() {
        let handler = LongTextHandler::new(13);
        let text = "Uno dos. Tres cuatro. Cinco!";
        let chunks = handler.chunk_content(text);

        assert_eq!(chunks, vec!["Uno dos. ", "Tres cuatro. ", "Cinco!"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_oversized_sentence_split_by_chars() {
        let handler = LongTextHandler::new(4);
        let chunks = handler.chunk_content("añoñaño");
        assert_eq!(chunks, vec!["añoñ", "año"]);
    }

    #[tokio::test]
    async fn test_translate_with_joins_every_chunk() {
        let handler = LongTextHandler::new(13);
        let mut seen = Vec::new();

        let merged = handler
            .translate_with("Uno dos. Tres cuatro. Cinco!", |chunk| {
                seen.push(chunk.to_string());
                async move { Ok::<_, AnalyzerError>(chunk.to_uppercase()) }
            })
            .await
            .unwrap();

        assert_eq!(seen, vec!["Uno dos. ", "Tres cuatro. ", "Cinco!"]);
        assert_eq!(merged, "UNO DOS. TRES CUATRO. CINCO!");
    }

    #[tokio::test]
    async fn test_translate_with_skips_blank_chunks() {
        let handler = LongTextHandler::new(2);
        let mut calls = 0;

        let merged = handler
            .translate_with("     ", |chunk| {
                calls += 1;
                async move { Ok::<_, AnalyzerError>(chunk.to_string()) }
            })
            .await
            .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(merged, "");
    }

    #[tokio::test]
    async fn test_translate_with_stops_on_failure() {
        let handler = LongTextHandler::new(13);
        let mut calls = 0;

        let err = handler
            .translate_with("Uno dos. Tres cuatro. Cinco!", |chunk| {
                calls += 1;
                let fail = calls == 2;
                async move {
                    if fail {
                        Err(AnalyzerError::ApiError("API returned 503".into()))
                    } else {
                        Ok(chunk.to_string())
                    }
                }
            })
            .await
            .unwrap_err();

        assert_eq!(calls, 2);
        assert!(matches!(err, AnalyzerError::ApiError(_)));
    }

    #[test]
    fn test_merge_trims_and_joins() {
        let handler = LongTextHandler::new(10);
        let merged = handler.merge_translations(vec![
            "One two. ".to_string(),
            " ".to_string(),
            "Three.".to_string(),
        ]);
        assert_eq!(merged, "One two. Three.");
    }
}
