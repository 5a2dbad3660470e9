//! Text processing owned by the crate: stopwords, word frequencies and
//! sentence alignment.

pub mod sentences;
pub mod stopwords;
pub mod tokenizer;

pub use sentences::{align_sentences, split_sentences, SentencePair};
pub use stopwords::StopwordSet;
pub use tokenizer::{count_words, WordCount, WordCounter, WordCounts, WordFrequency};
