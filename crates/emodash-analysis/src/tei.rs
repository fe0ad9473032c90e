//! TEI (Text Embeddings Inference) client for sequence-classification models.
//!
//! Both oracles are served by TEI's `/predict` route. Sentiment texts go
//! out in batches of `batch_size`; emotion texts go out one request each.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::aggregate::first_max;
use crate::error::AnalysisError;
use crate::oracle::{EmotionOracle, SentimentOracle};
use crate::types::{EmotionScore, EmotionScores, SentimentResult, TextItem};

/// Model metadata reported by TEI's `/info` route.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub model_id: String,
}

/// HTTP client for one TEI classification server.
#[derive(Debug, Clone)]
pub struct TeiClassifier {
    client: Client,
    base_url: String,
    batch_size: usize,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: PredictInputs<'a>,
    truncate: bool,
}

/// TEI reads a bare array of strings as a sentence pair, so each batch
/// entry is wrapped in its own one-element array.
#[derive(Serialize)]
#[serde(untagged)]
enum PredictInputs<'a> {
    Single(&'a str),
    Batch(Vec<[&'a str; 1]>),
}

#[derive(Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

impl TeiClassifier {
    /// Create a client for the TEI server at `base_url`.
    ///
    /// A `batch_size` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, batch_size: usize) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("emodash/0.1 (text-analysis)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            batch_size: batch_size.max(1),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the served model's metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] on network failure,
    /// [`AnalysisError::UnexpectedStatus`] on a non-2xx response, or
    /// [`AnalysisError::Deserialize`] if the body is not valid model info.
    pub async fn info(&self) -> Result<ModelInfo, AnalysisError> {
        let url = format!("{}/info", self.base_url);
        let response = self.client.get(&url).send().await?;
        decode(response, &url, "TEI /info").await
    }

    async fn predict<T: DeserializeOwned>(
        &self,
        inputs: PredictInputs<'_>,
        context: &str,
    ) -> Result<T, AnalysisError> {
        let url = format!("{}/predict", self.base_url);
        let request = PredictRequest {
            inputs,
            truncate: true,
        };
        let response = self.client.post(&url).json(&request).send().await?;
        decode(response, &url, context).await
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
    context: &str,
) -> Result<T, AnalysisError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AnalysisError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| AnalysisError::Deserialize {
        context: context.to_string(),
        source,
    })
}

impl SentimentOracle for TeiClassifier {
    /// Classify texts in chunks of `batch_size`, keeping the top label per text.
    ///
    /// Ties between labels go to the one TEI listed first.
    async fn classify_batch(
        &self,
        texts: &[TextItem],
    ) -> Result<Vec<SentimentResult>, AnalysisError> {
        let mut results = Vec::with_capacity(texts.len());

        for (chunk_index, chunk) in texts.chunks(self.batch_size).enumerate() {
            let inputs = PredictInputs::Batch(chunk.iter().map(|t| [t.as_str()]).collect());
            let predictions: Vec<Vec<Prediction>> =
                self.predict(inputs, "TEI sentiment batch").await?;

            if predictions.len() != chunk.len() {
                return Err(AnalysisError::Alignment {
                    context: "sentiment batch".to_string(),
                    expected: chunk.len(),
                    actual: predictions.len(),
                });
            }

            let offset = chunk_index * self.batch_size;
            for (i, labels) in predictions.into_iter().enumerate() {
                let top = first_max(labels, |p| p.score)
                    .ok_or(AnalysisError::EmptyPrediction { index: offset + i })?;
                results.push(SentimentResult {
                    label: top.label,
                    score: top.score,
                });
            }

            tracing::debug!(chunk = chunk_index, size = chunk.len(), "sentiment batch classified");
        }

        Ok(results)
    }
}

impl EmotionOracle for TeiClassifier {
    async fn classify(&self, text: &TextItem) -> Result<EmotionScores, AnalysisError> {
        let predictions: Vec<Prediction> = self
            .predict(PredictInputs::Single(text.as_str()), "TEI emotion scores")
            .await?;

        Ok(predictions
            .into_iter()
            .map(|p| EmotionScore {
                label: p.label,
                score: p.score,
            })
            .collect())
    }
}
