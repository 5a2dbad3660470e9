use escrutador::report::{AnalysisReport, Tone};
use escrutador::text::StopwordSet;
use escrutador::{
    align_sentences, count_words, AnalyzerError, AppConfig, LexiconSentiment, Manuscript, Result,
    TextAnalyzer, Translator, WordCounter,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Translates by looking the whole text up in a fixed table.
struct Phrasebook(&'static [(&'static str, &'static str)]);

impl Translator for Phrasebook {
    async fn translate(&self, text: &str, _: &str, _: &str) -> Result<String> {
        self.0
            .iter()
            .find(|(es, _)| *es == text)
            .map(|(_, en)| en.to_string())
            .ok_or_else(|| AnalyzerError::ApiError("API returned 404 Not Found: ".into()))
    }
}

/// Always fails and counts how often it was asked.
#[derive(Default)]
struct Unreachable {
    calls: Arc<AtomicUsize>,
}

impl Translator for Unreachable {
    async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AnalyzerError::TranslationFailed("connection refused".into()))
    }
}

const PHRASES: &[(&str, &str)] = &[
    (
        "El gato corre. El perro duerme rápido!",
        "The cat runs. The dog sleeps fast!",
    ),
    (
        "La casa era fría y oscura. Nadie volvió. Fue un día hermoso!",
        "The house was cold and dark. Nobody came back. It was a beautiful day!",
    ),
];

fn analyzer<T: Translator>(translator: T) -> TextAnalyzer<T, LexiconSentiment> {
    TextAnalyzer::from_config(translator, LexiconSentiment::new(), &AppConfig::default())
}

#[test]
fn aligns_the_reference_pair() {
    let pairs = align_sentences(
        "El gato corre. El perro duerme rápido!",
        "The cat runs. The dog sleeps fast!",
    );

    let pairs: Vec<(&str, &str)> = pairs
        .iter()
        .map(|p| (p.original.as_str(), p.translated.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("El gato corre", "The cat runs"),
            ("El perro duerme rápido", "The dog sleeps fast"),
        ]
    );
}

#[test]
fn counts_the_reference_sentence() {
    let counter = WordCounter::new(StopwordSet::from_list(&["the", "and"]), 2);
    let counts = counter.count("the cat runs and the cat jumps");

    let ranked: Vec<(&str, usize)> = counts.frequencies.iter().collect();
    assert_eq!(ranked, vec![("cat", 2), ("runs", 1), ("jumps", 1)]);

    let empty = count_words("");
    assert!(empty.frequencies.is_empty());
    assert!(empty.tokens.is_empty());
}

#[tokio::test]
async fn analyzes_a_translated_text() {
    let analyzer = analyzer(Phrasebook(PHRASES));
    let result = analyzer
        .analyze("La casa era fría y oscura. Nadie volvió. Fue un día hermoso!")
        .await
        .unwrap();

    assert!(!result.translation.is_fallback());
    assert_eq!(result.sentences.len(), 3);
    assert_eq!(result.sentences[2].original, "Fue un día hermoso");
    assert_eq!(result.sentences[2].translated, "It was a beautiful day");
    assert_eq!(result.word_frequencies.total(), result.tokens.len());
    assert!(!result.tokens.iter().any(|t| t == "the" || t == "was"));

    let report = AnalysisReport::build(&analyzer, &result, &AppConfig::default().analysis);
    assert!(report.translation_warning.is_none());
    assert_eq!(report.fragments.len(), 3);
    assert_eq!(report.fragments[0].tone, Tone::Negative);
    assert_eq!(report.fragments[0].marker, "📕");
    assert_eq!(report.fragments[1].tone, Tone::Neutral);
    assert_eq!(report.fragments[2].tone, Tone::Positive);
    assert_eq!(report.parallel_text.translated, result.translated_text);
}

#[tokio::test]
async fn failed_translation_still_produces_a_result() {
    let translator = Unreachable::default();
    let analyzer = analyzer(translator);
    let text = "Una tarde triste. Otra mañana.";

    let result = analyzer.analyze(text).await.unwrap();

    assert!(result.translation.is_fallback());
    assert_eq!(result.translated_text, text);
    assert_eq!(result.sentences.len(), 2);
    assert!(result
        .sentences
        .iter()
        .all(|pair| pair.original == pair.translated));

    let report = AnalysisReport::build(&analyzer, &result, &AppConfig::default().analysis);
    let warning = report.translation_warning.unwrap();
    assert!(warning.contains("connection refused"));
}

#[tokio::test]
async fn blank_text_never_reaches_the_translator() {
    let translator = Unreachable::default();
    let calls = Arc::clone(&translator.calls);
    let analyzer = analyzer(translator);

    let err = analyzer.analyze(" \t\n").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::EmptyInput));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    analyzer.analyze("Hola.").await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn uploaded_file_is_previewed_and_analyzed_in_full() {
    let mut text = String::from("El gato corre. El perro duerme rápido!");
    let manuscript = Manuscript::from_upload("cuento.md", text.clone().into_bytes()).unwrap();
    assert_eq!(manuscript.preview(1000), text);

    let analyzer = analyzer(Phrasebook(PHRASES));
    let result = analyzer.analyze_manuscript(&manuscript).await.unwrap();
    assert_eq!(result.translated_text, "The cat runs. The dog sleeps fast!");

    text.push_str(&" palabra".repeat(200));
    let long = Manuscript::from_upload("largo.txt", text.clone().into_bytes()).unwrap();
    let preview = long.preview(1000);
    assert_eq!(preview.chars().count(), 1003);
    assert!(preview.ends_with("..."));
    assert_eq!(long.text, text);
}

#[tokio::test]
async fn blank_upload_is_analyzed_not_rejected() {
    let translator = Unreachable::default();
    let calls = Arc::clone(&translator.calls);
    let analyzer = analyzer(translator);

    let manuscript = Manuscript::from_upload("vacio.md", b"\n\n".to_vec()).unwrap();
    let result = analyzer.analyze_manuscript(&manuscript).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(result.word_frequencies.is_empty());
    assert!(result.sentences.is_empty());
}

#[test]
fn rejected_uploads() {
    let err = Manuscript::from_upload("cuento.docx", b"hola".to_vec()).unwrap_err();
    assert!(matches!(err, AnalyzerError::UnsupportedFile(_)));

    let err = Manuscript::from_upload("cuento.csv", vec![0xC3, 0x28]).unwrap_err();
    assert!(matches!(err, AnalyzerError::FileDecodeError { .. }));
}

#[tokio::test]
async fn config_shapes_the_analysis() {
    let config = AppConfig::from_toml(
        r#"
[analysis]
extra_stopwords = ["cat"]
top_words = 2
max_fragments = 1
"#,
    )
    .unwrap();

    let analyzer =
        TextAnalyzer::from_config(Phrasebook(PHRASES), LexiconSentiment::new(), &config);
    let result = analyzer
        .analyze("El gato corre. El perro duerme rápido!")
        .await
        .unwrap();

    assert_eq!(result.word_frequencies.get("cat"), None);
    assert_eq!(result.word_frequencies.get("dog"), Some(1));

    let report = AnalysisReport::build(&analyzer, &result, &config.analysis);
    assert_eq!(report.top_words.len(), 2);
    assert_eq!(report.top_words[0].word, "runs");
    assert_eq!(report.fragments.len(), 1);
}
