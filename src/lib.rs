pub mod input;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod server;
pub mod state;
pub mod text;
pub mod translation;
pub mod utils;

pub use input::{Manuscript, ManuscriptSource};
pub use pipeline::{AnalysisResult, FragmentScore, TextAnalyzer};
pub use report::AnalysisReport;
pub use sentiment::{LexiconSentiment, Sentiment, SentimentModel};
pub use server::EscrutadorServer;
pub use state::{AnalysisResponse, AppState};
pub use text::{align_sentences, count_words, split_sentences, SentencePair, WordCounter, WordFrequency};
pub use translation::{TranslationClient, TranslationOutcome, Translator};
pub use utils::{AnalyzerError, AppConfig, Result};
