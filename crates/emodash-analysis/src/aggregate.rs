//! Folds per-text classifier output into corpus-wide summaries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::AnalysisError;
use crate::types::{EmotionScore, EmotionScores, SentimentResult, TextItem};

/// Return the first item with the highest score.
///
/// A later item only replaces the current best when strictly greater, so
/// equal scores resolve to encounter order.
pub(crate) fn first_max<I, F>(items: I, score: F) -> Option<I::Item>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> f64,
{
    let mut best: Option<(f64, I::Item)> = None;
    for item in items {
        let s = score(&item);
        if best.as_ref().is_none_or(|(best_score, _)| s > *best_score) {
            best = Some((s, item));
        }
    }
    best.map(|(_, item)| item)
}

/// The emotion with the highest score for one text; ties go to the earlier entry.
#[must_use]
pub fn top_emotion(scores: &[EmotionScore]) -> Option<&EmotionScore> {
    first_max(scores, |s| s.score)
}

/// Occurrence count per sentiment label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SentimentTally(BTreeMap<String, usize>);

impl SentimentTally {
    fn record(&mut self, label: &str) {
        *self.0.entry(label.to_string()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn get(&self, label: &str) -> usize {
        self.0.get(label).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, usize> {
        &self.0
    }
}

/// Running sum and observation count for one emotion label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LabelTotal {
    pub sum: f64,
    pub count: usize,
}

impl LabelTotal {
    #[must_use]
    pub fn mean(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let denom = self.count as f64;
        self.sum / denom
    }
}

/// Per-label running totals over every text's emotion scores.
///
/// Once a fold completes, every label's `count` equals [`Self::items`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmotionAggregate {
    totals: BTreeMap<String, LabelTotal>,
    items: usize,
}

impl EmotionAggregate {
    fn add(&mut self, scores: &[EmotionScore]) {
        for entry in scores {
            let total = self.totals.entry(entry.label.clone()).or_default();
            total.sum += entry.score;
            total.count += 1;
        }
        self.items += 1;
    }

    /// Check that each label was observed exactly once per text.
    fn verify_complete(&self) -> Result<(), AnalysisError> {
        for (label, total) in &self.totals {
            if total.count != self.items {
                return Err(AnalysisError::Vocabulary {
                    label: label.clone(),
                    expected: self.items,
                    actual: total.count,
                });
            }
        }
        Ok(())
    }

    /// Number of texts folded in.
    #[must_use]
    pub fn items(&self) -> usize {
        self.items
    }

    #[must_use]
    pub fn total(&self, label: &str) -> Option<LabelTotal> {
        self.totals.get(label).copied()
    }

    /// Mean score per label.
    #[must_use]
    pub fn means(&self) -> BTreeMap<String, f64> {
        self.totals
            .iter()
            .map(|(label, total)| (label.clone(), total.mean()))
            .collect()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.totals.keys().map(String::as_str)
    }
}

/// Everything the aggregator derives from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub(crate) sentiment: SentimentTally,
    pub(crate) emotions: EmotionAggregate,
    pub(crate) top_emotions: Vec<EmotionScore>,
}

impl Aggregate {
    #[must_use]
    pub fn sentiment(&self) -> &SentimentTally {
        &self.sentiment
    }

    #[must_use]
    pub fn emotions(&self) -> &EmotionAggregate {
        &self.emotions
    }

    /// Top emotion per text, index-aligned with the input texts.
    #[must_use]
    pub fn top_emotions(&self) -> &[EmotionScore] {
        &self.top_emotions
    }
}

/// Fold index-aligned classifier results into an [`Aggregate`].
///
/// # Errors
///
/// - [`AnalysisError::NoInputProvided`] if `texts` is empty.
/// - [`AnalysisError::Alignment`] if `sentiments` or `emotions` differ in length from `texts`.
/// - [`AnalysisError::EmptyPrediction`] if any text has no emotion scores.
/// - [`AnalysisError::Vocabulary`] if some label was not scored exactly once for every text.
pub fn aggregate(
    texts: &[TextItem],
    sentiments: &[SentimentResult],
    emotions: &[EmotionScores],
) -> Result<Aggregate, AnalysisError> {
    if texts.is_empty() {
        return Err(AnalysisError::NoInputProvided);
    }
    check_aligned("sentiment results", texts.len(), sentiments.len())?;
    check_aligned("emotion results", texts.len(), emotions.len())?;

    let mut sentiment = SentimentTally::default();
    let mut totals = EmotionAggregate::default();
    let mut top_emotions = Vec::with_capacity(texts.len());

    for (index, (result, scores)) in sentiments.iter().zip(emotions).enumerate() {
        sentiment.record(&result.label);

        let top = top_emotion(scores).ok_or(AnalysisError::EmptyPrediction { index })?;
        top_emotions.push(top.clone());

        totals.add(scores);
    }

    totals.verify_complete()?;

    tracing::debug!(
        items = totals.items(),
        sentiment_labels = sentiment.as_map().len(),
        emotion_labels = totals.totals.len(),
        "aggregation complete"
    );

    Ok(Aggregate {
        sentiment,
        emotions: totals,
        top_emotions,
    })
}

fn check_aligned(context: &str, expected: usize, actual: usize) -> Result<(), AnalysisError> {
    if expected == actual {
        Ok(())
    } else {
        Err(AnalysisError::Alignment {
            context: context.to_string(),
            expected,
            actual,
        })
    }
}
