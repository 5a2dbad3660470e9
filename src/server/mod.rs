pub mod http;
pub mod tools;

pub use tools::EscrutadorServer;

use crate::text::WordCounter;

/// Word-frequency payload shared by the MCP tool and the HTTP endpoint.
pub fn word_counts_value(counter: &WordCounter, text: &str, top_n: Option<usize>) -> serde_json::Value {
    let counts = counter.count(text);
    let top = counts
        .frequencies
        .top(top_n.unwrap_or(counts.frequencies.len()));

    serde_json::json!({
        "total_tokens": counts.tokens.len(),
        "distinct_words": counts.frequencies.len(),
        "frequencies": top,
    })
}
