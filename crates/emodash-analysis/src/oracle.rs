//! Interfaces to the two external classifiers.
//!
//! The two oracles are invoked differently on purpose. Sentiment is
//! requested in bulk: one call receives the whole ordered text list and
//! answers with a parallel list. Emotions are requested per item: one call
//! per text, returning a score for every label in the model's vocabulary.
//! Batched inference is cheaper, so implementations backed by a real model
//! server should keep the sentiment path batched.

use std::future::Future;

use crate::error::AnalysisError;
use crate::types::{EmotionScores, SentimentResult, TextItem};

/// Single-label polarity classifier, called once per run with every text.
pub trait SentimentOracle {
    /// Classify all `texts`, returning exactly one result per text in the same order.
    fn classify_batch(
        &self,
        texts: &[TextItem],
    ) -> impl Future<Output = Result<Vec<SentimentResult>, AnalysisError>> + Send;
}

/// Multi-label emotion classifier, called once per text.
pub trait EmotionOracle {
    /// Score `text` against every label in the vocabulary.
    fn classify(
        &self,
        text: &TextItem,
    ) -> impl Future<Output = Result<EmotionScores, AnalysisError>> + Send;
}
