//! Process-wide classifier handles.
//!
//! The classifiers are set up once, before the first run, and then shared
//! by every run for the rest of the process. There is no way to replace or
//! tear them down.

use std::sync::OnceLock;

use emodash_core::AppConfig;

use crate::error::AnalysisError;
use crate::tei::TeiClassifier;

static CLASSIFIERS: OnceLock<Classifiers> = OnceLock::new();

/// The sentiment and emotion oracles used by every run.
#[derive(Debug)]
pub struct Classifiers {
    pub sentiment: TeiClassifier,
    pub emotion: TeiClassifier,
    /// Model id reported by the sentiment server.
    pub sentiment_model: String,
    /// Model id reported by the emotion server.
    pub emotion_model: String,
}

impl Classifiers {
    /// Build both clients and confirm each server is up by reading its `/info`.
    ///
    /// A served model id that differs from the configured one is logged
    /// as a warning, not rejected.
    ///
    /// # Errors
    ///
    /// Returns any error from client construction or either `/info` probe.
    pub async fn connect(config: &AppConfig) -> Result<Self, AnalysisError> {
        let sentiment = TeiClassifier::new(
            &config.sentiment_url,
            config.request_timeout_secs,
            config.sentiment_batch_size,
        )?;
        // Emotion requests are never batched.
        let emotion = TeiClassifier::new(&config.emotion_url, config.request_timeout_secs, 1)?;

        let sentiment_model = probe(&sentiment, "sentiment", &config.sentiment_model).await?;
        let emotion_model = probe(&emotion, "emotion", &config.emotion_model).await?;

        Ok(Self {
            sentiment,
            emotion,
            sentiment_model,
            emotion_model,
        })
    }
}

async fn probe(
    client: &TeiClassifier,
    role: &str,
    expected_model: &str,
) -> Result<String, AnalysisError> {
    let info = client.info().await?;
    if info.model_id == expected_model {
        tracing::info!(role, model = %info.model_id, url = client.base_url(), "classifier ready");
    } else {
        tracing::warn!(
            role,
            expected = expected_model,
            served = %info.model_id,
            url = client.base_url(),
            "classifier serves a different model than configured"
        );
    }
    Ok(info.model_id)
}

/// Connect the process-wide classifiers.
///
/// # Errors
///
/// Returns [`AnalysisError::AlreadyInitialized`] if called after a previous
/// successful call, or any error from [`Classifiers::connect`].
pub async fn initialize(config: &AppConfig) -> Result<&'static Classifiers, AnalysisError> {
    if CLASSIFIERS.get().is_some() {
        return Err(AnalysisError::AlreadyInitialized);
    }

    let classifiers = Classifiers::connect(config).await?;
    CLASSIFIERS
        .set(classifiers)
        .map_err(|_| AnalysisError::AlreadyInitialized)?;
    get()
}

/// The process-wide classifiers.
///
/// # Errors
///
/// Returns [`AnalysisError::NotInitialized`] before [`initialize`] has succeeded.
pub fn get() -> Result<&'static Classifiers, AnalysisError> {
    CLASSIFIERS.get().ok_or(AnalysisError::NotInitialized)
}
