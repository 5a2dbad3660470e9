use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Could not decode file {file_name}: {reason}")]
    FileDecodeError { file_name: String, reason: String },

    #[error("Unsupported file type: {0} (accepted: .txt, .csv, .md)")]
    UnsupportedFile(String),

    #[error("Input text is empty")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message_names_file() {
        let err = AnalyzerError::FileDecodeError {
            file_name: "notes.txt".into(),
            reason: "invalid utf-8 sequence".into(),
        };
        assert_eq!(
            err.to_string(),
            "Could not decode file notes.txt: invalid utf-8 sequence"
        );
    }
}
