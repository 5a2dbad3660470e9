use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static TERMINATOR_PATTERN: OnceLock<Regex> = OnceLock::new();

fn terminator_pattern() -> &'static Regex {
    TERMINATOR_PATTERN
        .get_or_init(|| Regex::new(r"[.!?]+").expect("terminator regex must compile"))
}

/// The i-th sentence of the original text next to the i-th sentence of its
/// translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    pub original: String,
    pub translated: String,
}

/// Splits on runs of `.`, `!` and `?`, trimming each piece and dropping the
/// empty ones.
pub fn split_sentences(text: &str) -> Vec<String> {
    terminator_pattern()
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pairs sentences by position only. When the two texts split into a
/// different number of sentences the surplus on the longer side is dropped.
pub fn align_sentences(original: &str, translated: &str) -> Vec<SentencePair> {
    let originals = split_sentences(original);
    let translations = split_sentences(translated);

    if originals.len() != translations.len() {
        tracing::debug!(
            original = originals.len(),
            translated = translations.len(),
            "Sentence counts differ, truncating alignment"
        );
    }

    originals
        .into_iter()
        .zip(translations)
        .map(|(original, translated)| SentencePair {
            original,
            translated,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_by_position() {
        let pairs = align_sentences(
            "El gato corre. El perro duerme rápido!",
            "The cat runs. The dog sleeps fast!",
        );

        assert_eq!(
            pairs,
            vec![
                SentencePair {
                    original: "El gato corre".into(),
                    translated: "The cat runs".into(),
                },
                SentencePair {
                    original: "El perro duerme rápido".into(),
                    translated: "The dog sleeps fast".into(),
                },
            ]
        );
    }

    #[test]
    fn test_punctuation_runs_are_one_delimiter() {
        assert_eq!(
            split_sentences("¿Qué?! No... ¡Basta!!"),
            vec!["¿Qué", "No", "¡Basta"]
        );
    }

    #[test]
    fn test_empty_fragments_discarded() {
        assert_eq!(split_sentences("  . ! ?  "), Vec::<String>::new());
        assert_eq!(split_sentences(""), Vec::<String>::new());
        assert_eq!(split_sentences("sin final"), vec!["sin final"]);
    }

    #[test]
    fn test_shorter_side_truncates() {
        let pairs = align_sentences("Uno. Dos. Tres.", "One. Two and three.");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].original, "Dos");
        assert_eq!(pairs[1].translated, "Two and three");

        let pairs = align_sentences("Uno.", "One. Two. Three.");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].translated, "One");
    }

    #[test]
    fn test_pair_count_is_minimum_of_sides() {
        let cases = [
            ("", "One. Two."),
            ("Uno! Dos? Tres.", "One! Two? Three."),
            ("A. B. C. D.", "A."),
            ("Sin puntuación", "No punctuation"),
        ];
        for (original, translated) in cases {
            let expected = split_sentences(original)
                .len()
                .min(split_sentences(translated).len());
            assert_eq!(align_sentences(original, translated).len(), expected);
        }
    }
}
