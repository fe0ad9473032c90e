//! End-to-end pipeline tests with deterministic stub classifiers.
//!
//! No network traffic: both oracles are in-memory lookup tables keyed by
//! the input text.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use emodash_analysis::{
    resolve_texts, run_analysis, Analysis, AnalysisError, EmotionOracle, EmotionScore, EmotionScores,
    SentimentOracle, SentimentResult, TextItem,
};

/// Sentiment stub: looks each text up in a table; unknown texts are NEUTRAL/0.5.
#[derive(Default)]
struct StubSentiment {
    table: HashMap<String, (String, f64)>,
    calls: AtomicUsize,
}

impl StubSentiment {
    fn with(mut self, text: &str, label: &str, score: f64) -> Self {
        self.table
            .insert(text.to_string(), (label.to_string(), score));
        self
    }
}

impl SentimentOracle for StubSentiment {
    async fn classify_batch(
        &self,
        texts: &[TextItem],
    ) -> Result<Vec<SentimentResult>, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| {
                let (label, score) = self
                    .table
                    .get(t.as_str())
                    .cloned()
                    .unwrap_or_else(|| ("NEUTRAL".to_string(), 0.5));
                SentimentResult { label, score }
            })
            .collect())
    }
}

/// Emotion stub: looks each text up in a table; unknown texts score 0.0 for every label.
#[derive(Default)]
struct StubEmotion {
    vocabulary: Vec<String>,
    table: HashMap<String, Vec<f64>>,
    fail_on: Option<String>,
    calls: AtomicUsize,
}

impl StubEmotion {
    fn new(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|v| (*v).to_string()).collect(),
            ..Self::default()
        }
    }

    fn with(mut self, text: &str, scores: &[f64]) -> Self {
        self.table.insert(text.to_string(), scores.to_vec());
        self
    }

    fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }
}

impl EmotionOracle for StubEmotion {
    async fn classify(&self, text: &TextItem) -> Result<EmotionScores, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.as_deref() == Some(text.as_str()) {
            return Err(AnalysisError::UnexpectedStatus {
                status: 503,
                url: "http://stub/predict".to_string(),
            });
        }
        let zeros = vec![0.0; self.vocabulary.len()];
        let scores = self.table.get(text.as_str()).unwrap_or(&zeros);
        Ok(self
            .vocabulary
            .iter()
            .zip(scores)
            .map(|(label, score)| EmotionScore {
                label: label.clone(),
                score: *score,
            })
            .collect())
    }
}

fn items(texts: &[&str]) -> Vec<TextItem> {
    texts.iter().filter_map(|t| TextItem::new(*t)).collect()
}

fn love_hate_oracles() -> (StubSentiment, StubEmotion) {
    let sentiment = StubSentiment::default()
        .with("I love this!", "POSITIVE", 0.99)
        .with("I hate this.", "NEGATIVE", 0.95);
    let emotion = StubEmotion::new(&["joy", "anger"])
        .with("I love this!", &[0.8, 0.1])
        .with("I hate this.", &[0.2, 0.9]);
    (sentiment, emotion)
}

#[tokio::test]
async fn tally_counts_each_sentiment_label() {
    let (sentiment, emotion) = love_hate_oracles();
    let texts = items(&["I love this!", "I hate this."]);

    let analysis = run_analysis(texts, &sentiment, &emotion)
        .await
        .expect("run should succeed");

    let counts = analysis.summary().sentiment_counts().clone();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts["POSITIVE"], 1);
    assert_eq!(counts["NEGATIVE"], 1);
}

#[tokio::test]
async fn emotion_means_and_top_emotions() {
    let (sentiment, emotion) = love_hate_oracles();
    let texts = items(&["I love this!", "I hate this."]);

    let analysis = run_analysis(texts, &sentiment, &emotion).await.unwrap();

    let means = analysis.summary().emotion_means();
    assert_eq!(means.len(), 2);
    assert!((means["joy"] - 0.5).abs() < 1e-9, "joy mean: {}", means["joy"]);
    assert!((means["anger"] - 0.5).abs() < 1e-9, "anger mean: {}", means["anger"]);

    let tops = analysis.aggregate().top_emotions();
    assert_eq!(tops[0].label, "joy");
    assert_eq!(tops[1].label, "anger");
}

#[tokio::test]
async fn every_label_count_equals_item_count() {
    let sentiment = StubSentiment::default();
    let emotion = StubEmotion::new(&["joy", "anger", "fear", "surprise"])
        .with("one", &[0.1, 0.2, 0.3, 0.4])
        .with("two", &[0.4, 0.3, 0.2, 0.1]);
    let texts = items(&["one", "two", "three", "one", "five"]);

    let analysis = run_analysis(texts, &sentiment, &emotion).await.unwrap();
    let emotions = analysis.aggregate().emotions();

    assert_eq!(emotions.items(), 5);
    for label in ["joy", "anger", "fear", "surprise"] {
        assert_eq!(emotions.total(label).unwrap().count, 5, "label {label}");
    }
    assert_eq!(analysis.aggregate().sentiment().total(), 5);
}

#[tokio::test]
async fn sentiment_is_batched_and_emotions_are_per_item() {
    let (sentiment, emotion) = love_hate_oracles();
    let texts = items(&["I love this!", "I hate this.", "meh", "ok then"]);

    run_analysis(texts, &sentiment, &emotion).await.unwrap();

    assert_eq!(sentiment.calls.load(Ordering::SeqCst), 1);
    assert_eq!(emotion.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn blank_paste_never_reaches_classifiers() {
    let result = resolve_texts(None::<&[u8]>, Some("\n\n  \n"));
    assert!(matches!(result, Err(AnalysisError::NoInputProvided)));

    let (sentiment, emotion) = love_hate_oracles();
    let run = run_analysis(Vec::new(), &sentiment, &emotion).await;
    assert!(matches!(run, Err(AnalysisError::NoInputProvided)));
    assert_eq!(sentiment.calls.load(Ordering::SeqCst), 0);
    assert_eq!(emotion.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upload_without_text_column_is_missing_column() {
    let csv = "comment,rating\nnice,5\n";
    let result = resolve_texts(Some(csv.as_bytes()), None);
    assert!(matches!(result, Err(AnalysisError::MissingColumn { .. })));
}

#[tokio::test]
async fn long_text_is_truncated_only_in_cards() {
    let long = "a".repeat(200);
    let sentiment = StubSentiment::default();
    let emotion = StubEmotion::new(&["joy"]);
    let texts = items(&[long.as_str()]);

    let analysis = run_analysis(texts, &sentiment, &emotion).await.unwrap();
    let cards = analysis.summary().cards(10, 150);

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].text, format!("{}...", "a".repeat(150)));
    assert_eq!(analysis.texts()[0].as_str(), long);
    assert_eq!(analysis.texts()[0].char_len(), 200);
}

#[tokio::test]
async fn cards_are_limited_and_follow_input_order() {
    let sentiment = StubSentiment::default().with("t3", "POSITIVE", 0.75);
    let emotion = StubEmotion::new(&["joy", "anger"]).with("t3", &[0.25, 0.5]);
    let inputs: Vec<String> = (1..=12).map(|i| format!("t{i}")).collect();
    let refs: Vec<&str> = inputs.iter().map(String::as_str).collect();

    let analysis = run_analysis(items(&refs), &sentiment, &emotion)
        .await
        .unwrap();
    let cards = analysis.summary().cards(10, 150);

    assert_eq!(cards.len(), 10);
    assert_eq!(cards[0].text, "t1");
    assert_eq!(cards[9].text, "t10");
    assert_eq!(
        cards[2].to_string(),
        "Text: t3\nSentiment: POSITIVE (0.75)\nTop Emotion: anger (0.50)"
    );
    // All-zero scores tie; the first vocabulary label wins.
    assert_eq!(cards[0].emotion_label, "joy");
}

#[tokio::test]
async fn repeated_runs_are_byte_identical() {
    let (sentiment, emotion) = love_hate_oracles();
    let input = "I love this!\nI hate this.\nsomething else\n";

    let texts = || resolve_texts(None::<&[u8]>, Some(input)).unwrap();

    let first = run_analysis(texts(), &sentiment, &emotion).await.unwrap();
    let second = run_analysis(texts(), &sentiment, &emotion).await.unwrap();

    let tally = |a: &Analysis| serde_json::to_string(a.aggregate().sentiment()).unwrap();
    let state = |a: &Analysis| serde_json::to_string(a.aggregate().emotions()).unwrap();

    assert_eq!(tally(&first), tally(&second));
    assert_eq!(state(&first), state(&second));
    assert_eq!(first, second);
}

#[tokio::test]
async fn failing_emotion_call_aborts_the_run() {
    let (sentiment, emotion) = love_hate_oracles();
    let emotion = emotion.failing_on("I hate this.");
    let texts = items(&["I love this!", "I hate this.", "never classified"]);

    let result = run_analysis(texts, &sentiment, &emotion).await;

    assert!(
        matches!(result, Err(AnalysisError::UnexpectedStatus { status: 503, .. })),
        "expected oracle failure, got: {result:?}"
    );
    assert_eq!(emotion.calls.load(Ordering::SeqCst), 2);
}

/// Sentiment stub that drops the last result.
struct ShortSentiment;

impl SentimentOracle for ShortSentiment {
    async fn classify_batch(
        &self,
        texts: &[TextItem],
    ) -> Result<Vec<SentimentResult>, AnalysisError> {
        Ok(texts
            .iter()
            .skip(1)
            .map(|_| SentimentResult {
                label: "POSITIVE".to_string(),
                score: 1.0,
            })
            .collect())
    }
}

#[tokio::test]
async fn short_sentiment_response_is_alignment_defect() {
    let emotion = StubEmotion::new(&["joy"]);
    let result = run_analysis(items(&["a", "b"]), &ShortSentiment, &emotion).await;

    let err = result.unwrap_err();
    assert!(err.is_defect(), "expected defect, got: {err:?}");
    assert!(matches!(
        err,
        AnalysisError::Alignment {
            expected: 2,
            actual: 1,
            ..
        }
    ));
    assert_eq!(emotion.calls.load(Ordering::SeqCst), 0);
}
