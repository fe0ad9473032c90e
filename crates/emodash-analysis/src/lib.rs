//! Sentiment and emotion analysis for batches of short texts.
//!
//! Normalizes uploaded or pasted text, classifies every line with a binary
//! sentiment model (batched) and a multi-label emotion model (per line),
//! and reduces the results to a sentiment tally, mean emotion scores and
//! per-line display cards.

pub mod aggregate;
pub mod classifiers;
pub mod error;
pub mod normalize;
pub mod oracle;
pub mod pipeline;
pub mod summary;
pub mod tei;
pub mod types;

pub use aggregate::{aggregate, top_emotion, Aggregate, EmotionAggregate, LabelTotal, SentimentTally};
pub use classifiers::Classifiers;
pub use error::AnalysisError;
pub use normalize::{resolve_texts, texts_from_csv, texts_from_paste, TEXT_COLUMN};
pub use oracle::{EmotionOracle, SentimentOracle};
pub use pipeline::{run_analysis, Analysis};
pub use summary::{truncate_for_display, DisplayCard, Report, Summary};
pub use tei::{ModelInfo, TeiClassifier};
pub use types::{EmotionScore, EmotionScores, SentimentResult, TextItem};
