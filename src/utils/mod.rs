pub mod config;
pub mod errors;

pub use config::{
    AnalysisConfig, AppConfig, LoggingConfig, ServerConfig, TranslationConfig,
    TranslationProvider,
};
pub use errors::{AnalyzerError, Result};

/// Truncates `text` to at most `max_chars` characters, appending `...` when
/// anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
