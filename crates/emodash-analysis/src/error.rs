use thiserror::Error;

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Neither an upload nor any non-blank pasted text was supplied.
    #[error("no input provided: upload a CSV file or paste some text to begin")]
    NoInputProvided,

    /// The uploaded table has no column with the required header.
    #[error("uploaded file has no \"{column}\" column")]
    MissingColumn { column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Per-item result sequences do not line up with the text sequence.
    #[error("alignment error in {context}: expected {expected} entries, got {actual}")]
    Alignment {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// An emotion label was not observed once per item.
    #[error("emotion label \"{label}\" observed {actual} times across {expected} items")]
    Vocabulary {
        label: String,
        expected: usize,
        actual: usize,
    },

    /// An oracle returned no scores for the item at `index`.
    #[error("classifier returned no scores for item {index}")]
    EmptyPrediction { index: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("classifiers have not been initialized")]
    NotInitialized,

    #[error("classifiers are already initialized")]
    AlreadyInitialized,
}

impl AnalysisError {
    /// `true` for conditions the user can fix by changing their input.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::NoInputProvided | Self::MissingColumn { .. })
    }

    /// `true` for broken internal invariants (a bug, not bad input or a flaky oracle).
    #[must_use]
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            Self::Alignment { .. } | Self::Vocabulary { .. } | Self::EmptyPrediction { .. }
        )
    }
}
