//! Analysis pipeline orchestration.

use crate::aggregate::{aggregate, Aggregate};
use crate::error::AnalysisError;
use crate::oracle::{EmotionOracle, SentimentOracle};
use crate::summary::Summary;
use crate::types::{EmotionScores, SentimentResult, TextItem};

/// The complete, immutable outcome of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    texts: Vec<TextItem>,
    sentiments: Vec<SentimentResult>,
    emotions: Vec<EmotionScores>,
    aggregate: Aggregate,
}

impl Analysis {
    /// The normalized input texts, untruncated and in input order.
    #[must_use]
    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    #[must_use]
    pub fn sentiments(&self) -> &[SentimentResult] {
        &self.sentiments
    }

    /// Full per-text emotion scores, in the order the oracle returned them.
    #[must_use]
    pub fn emotions(&self) -> &[EmotionScores] {
        &self.emotions
    }

    #[must_use]
    pub fn aggregate(&self) -> &Aggregate {
        &self.aggregate
    }

    #[must_use]
    pub fn summary(&self) -> Summary<'_> {
        Summary::new(&self.texts, &self.sentiments, &self.aggregate)
    }
}

/// Run both classifiers over `texts` and aggregate the results.
///
/// 1. Classify every text for sentiment in one bulk call.
/// 2. Classify each text for emotions, one call per text, in order.
/// 3. Fold the aligned results into an [`Aggregate`].
///
/// The run is all-or-nothing: the first failure aborts it and nothing
/// partial is returned.
///
/// # Errors
///
/// Returns [`AnalysisError::NoInputProvided`] for an empty `texts`, any
/// error an oracle returns, or an aggregation error (see [`aggregate`]).
pub async fn run_analysis<S, E>(
    texts: Vec<TextItem>,
    sentiment_oracle: &S,
    emotion_oracle: &E,
) -> Result<Analysis, AnalysisError>
where
    S: SentimentOracle,
    E: EmotionOracle,
{
    if texts.is_empty() {
        return Err(AnalysisError::NoInputProvided);
    }

    tracing::info!(items = texts.len(), "analysis started");

    let sentiments = sentiment_oracle.classify_batch(&texts).await?;
    if sentiments.len() != texts.len() {
        return Err(AnalysisError::Alignment {
            context: "sentiment oracle response".to_string(),
            expected: texts.len(),
            actual: sentiments.len(),
        });
    }

    let mut emotions = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
        let scores = emotion_oracle.classify(text).await.inspect_err(|e| {
            tracing::warn!(index, error = %e, "emotion classification failed; aborting run");
        })?;
        emotions.push(scores);
    }

    let aggregate = aggregate(&texts, &sentiments, &emotions)?;

    tracing::info!(
        items = texts.len(),
        sentiment_labels = aggregate.sentiment().as_map().len(),
        "analysis complete"
    );

    Ok(Analysis {
        texts,
        sentiments,
        emotions,
        aggregate,
    })
}
