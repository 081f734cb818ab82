//! End-to-end tests through the public API

use review_consensus::{
    GraphMode, ReviewSummarizer, SimilarityGraphBuilder, SummarizerConfig, SummaryError,
    WordVectorTable,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

const VECTORS: &str = "\
dark 1.0 0.0 0.0
moody 0.0 1.0 0.0
intense 0.0 1.0 0.0
guitars 0.0 0.0 1.0
bright 0.6 0.0 0.8
";

fn toy_table() -> Arc<WordVectorTable> {
    Arc::new(WordVectorTable::from_reader(VECTORS.as_bytes(), None).unwrap())
}

fn summarizer() -> ReviewSummarizer {
    ReviewSummarizer::with_table(SummarizerConfig::default(), toy_table()).unwrap()
}

/// Write the vectors to a per-test temp file
fn vectors_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "review-consensus-{}-{name}.txt",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(VECTORS.as_bytes()).unwrap();
    path
}

#[test]
fn test_dark_consensus_ranks_first() {
    let reviews = [
        ("A", "The album is dark. It is moody."),
        ("B", "The record feels dark. It is intense."),
    ];

    let summary = summarizer().summarize_reviews(reviews, Some(1)).unwrap();

    assert_eq!(summary.sentences[0].raw_text, "The album is dark.");
    assert_eq!(summary.sentences[0].source, "A");

    let all = summarizer().summarize_reviews(reviews, None).unwrap();
    let score = |text: &str| {
        all.sentences
            .iter()
            .find(|s| s.raw_text == text)
            .map(|s| s.score)
            .unwrap()
    };
    assert!(score("The album is dark.") >= score("It is moody."));
    assert!(score("The record feels dark.") >= score("It is intense."));
}

#[test]
fn test_album_reviews_dark_pair_outranks_moody_pair() {
    let table = WordVectorTable::from_reader(
        "dark 1.0 0.0\nmoody 0.0 1.0\nrecord 1.0 0.0\nintense 0.0 1.0\n".as_bytes(),
        None,
    )
    .unwrap();
    let summarizer =
        ReviewSummarizer::with_table(SummarizerConfig::default(), Arc::new(table)).unwrap();
    let reviews = [
        ("A", "The album is dark. It is moody."),
        ("B", "The record feels dark. It is also intense."),
    ];

    let top = summarizer.summarize_reviews(reviews, Some(1)).unwrap();
    assert_eq!(top.sentences[0].raw_text, "The album is dark.");
    assert_eq!(top.sentences[0].source, "A");

    let all = summarizer.summarize_reviews(reviews, None).unwrap();
    assert_eq!(all.len(), 4);
    let score = |text: &str| {
        all.sentences
            .iter()
            .find(|s| s.raw_text == text)
            .map(|s| s.score)
            .unwrap()
    };
    let dark = score("The album is dark.").min(score("The record feels dark."));
    let moody = score("It is moody.").max(score("It is also intense."));
    assert!(dark >= moody);
}

#[test]
fn test_shared_theme_beats_unshared() {
    // Only "dark" is echoed by another publication
    let reviews = [
        ("A", "Dark guitars. Bright guitars."),
        ("B", "So dark."),
        ("C", "Moody."),
    ];

    let summary = summarizer().summarize_reviews(reviews, Some(1)).unwrap();

    assert_ne!(summary.sentences[0].raw_text, "Moody.");
}

#[test]
fn test_single_sentence_corpus() {
    let summary = summarizer()
        .summarize_reviews([("A", "The album is dark.")], None)
        .unwrap();

    assert_eq!(summary.len(), 1);
    assert!(summary.sentences[0].score.is_finite());
    assert!(summary.converged);
}

#[test]
fn test_stopword_only_sentence_scores_lowest() {
    let text = "Dark guitars. Dark and moody guitars. It is what it is.";

    let summary = summarizer().summarize_document(text, None).unwrap();

    let last = summary.sentences.last().unwrap();
    assert_eq!(last.raw_text, "It is what it is.");
    let min = summary
        .sentences
        .iter()
        .map(|s| s.score)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(last.score, min);
}

#[test]
fn test_same_source_pairs_have_no_weight() {
    let table = toy_table();
    let vectorizer = review_consensus::SentenceVectorizer::new(table);
    let sentences = vectorizer.vectorize_documents([
        ("A", "Dark guitars. Dark guitars again."),
        ("B", "Dark guitars."),
    ]);

    let graph = SimilarityGraphBuilder::new(GraphMode::MultiDocument).build(&sentences);

    assert_eq!(graph.weight(0, 1), 0.0);
    assert_eq!(graph.weight(1, 0), 0.0);
    assert!(graph.weight(0, 2) > 0.99);
    assert!((0..3).all(|i| graph.weight(i, i) == 0.0));
}

#[test]
fn test_select_zero_is_empty() {
    let summary = summarizer()
        .summarize_reviews([("A", "Dark."), ("B", "Moody.")], Some(0))
        .unwrap();

    assert!(summary.is_empty());
}

#[test]
fn test_summarize_before_load_fails() {
    let summarizer = ReviewSummarizer::new(SummarizerConfig::default()).unwrap();

    let err = summarizer
        .summarize_reviews([("A", "Dark.")], None)
        .unwrap_err();
    assert!(matches!(err, SummaryError::UninitializedState));
}

#[test]
fn test_load_from_file_and_summarize() {
    let path = vectors_file("load");
    let config = SummarizerConfig::new()
        .with_word_vectors_path(&path)
        .with_expected_dimension(3);
    let summarizer = ReviewSummarizer::new(config).unwrap();

    summarizer.load_word_vectors().unwrap();
    let top = summarizer
        .top_sentences("Dark guitars. Moody guitars. Nothing here.", Some(2))
        .unwrap();

    assert_eq!(summarizer.table().unwrap().len(), 5);
    assert_eq!(top.len(), 2);
    assert!(!top.contains(&"Nothing here.".to_string()));
    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_twice_is_idempotent() {
    let path = vectors_file("idempotent");
    let config = SummarizerConfig::new().with_word_vectors_path(&path);
    let reviews = [
        ("A", "The album is dark. It is moody."),
        ("B", "The record feels dark. It is intense."),
    ];

    let once = ReviewSummarizer::new(config.clone()).unwrap();
    once.load_word_vectors().unwrap();
    let expected = once.summarize_reviews(reviews, None).unwrap();

    let twice = ReviewSummarizer::new(config).unwrap();
    twice.load_word_vectors().unwrap();
    let table = twice.table().unwrap();
    twice.load_word_vectors().unwrap();

    assert!(Arc::ptr_eq(&table, &twice.table().unwrap()));
    assert_eq!(twice.summarize_reviews(reviews, None).unwrap(), expected);
    std::fs::remove_file(path).ok();
}

#[test]
fn test_corrupt_vector_file_is_load_error() {
    let path = std::env::temp_dir().join(format!(
        "review-consensus-{}-corrupt.txt",
        std::process::id()
    ));
    std::fs::write(&path, "dark 1.0 0.0\nmoody 0.0 oops\n").unwrap();
    let summarizer =
        ReviewSummarizer::new(SummarizerConfig::new().with_word_vectors_path(&path)).unwrap();

    let err = summarizer.load_word_vectors().unwrap_err();

    assert!(matches!(err, SummaryError::VectorLoad(_)));
    assert!(!summarizer.is_loaded());
    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_vector_file_is_load_error() {
    let config = SummarizerConfig::new().with_word_vectors_path("/nonexistent/glove.txt");
    let summarizer = ReviewSummarizer::new(config).unwrap();

    let err = summarizer.load_word_vectors().unwrap_err();
    assert!(matches!(err, SummaryError::VectorLoad(_)));
}

#[test]
fn test_summary_serializes_to_json() {
    let summary = summarizer()
        .summarize_reviews([("A", "Dark."), ("B", "Dark!")], Some(1))
        .unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["sentences"][0]["raw_text"], "Dark.");
    assert_eq!(json["sentences"][0]["source"], "A");
    assert_eq!(json["num_sentences"], 2);
}

#[test]
fn test_shared_across_threads() {
    let summarizer = Arc::new(summarizer());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let summarizer = Arc::clone(&summarizer);
            std::thread::spawn(move || {
                summarizer
                    .summarize_reviews([("A", "Dark guitars."), ("B", "Dark.")], Some(1))
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}
