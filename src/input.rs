use crate::utils::{truncate_chars, AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "csv", "md"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManuscriptSource {
    Typed,
    Upload { file_name: String },
}

/// Text submitted for analysis, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manuscript {
    pub source: ManuscriptSource,
    pub text: String,
}

impl Manuscript {
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            source: ManuscriptSource::Typed,
            text: text.into(),
        }
    }

    /// Decodes uploaded bytes as UTF-8. Only `.txt`, `.csv` and `.md` files
    /// are accepted.
    pub fn from_upload(file_name: &str, bytes: Vec<u8>) -> Result<Self> {
        check_extension(file_name)?;

        let text = String::from_utf8(bytes).map_err(|e| AnalyzerError::FileDecodeError {
            file_name: file_name.to_string(),
            reason: e.utf8_error().to_string(),
        })?;

        Ok(Self {
            source: ManuscriptSource::Upload {
                file_name: file_name.to_string(),
            },
            text,
        })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        check_extension(&file_name)?;
        let bytes = tokio::fs::read(path).await?;
        Self::from_upload(&file_name, bytes)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The first `max_chars` characters, with `...` appended when the text is
    /// longer. Display only: analysis always uses the full text.
    pub fn preview(&self, max_chars: usize) -> String {
        truncate_chars(&self.text, max_chars)
    }

    pub fn file_name(&self) -> Option<&str> {
        match &self.source {
            ManuscriptSource::Upload { file_name } => Some(file_name),
            ManuscriptSource::Typed => None,
        }
    }
}

fn check_extension(file_name: &str) -> Result<()> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(AnalyzerError::UnsupportedFile(file_name.to_string())),
    }
}
