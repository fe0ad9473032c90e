use serde::{Deserialize, Serialize};

/// One normalized input string.
///
/// Never empty after trimming. A text's position in its run is the key that
/// joins it to its sentiment and emotion results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextItem(String);

impl TextItem {
    /// Wrap `text`, or return `None` if it is blank.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of Unicode scalar values in the text.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for TextItem {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TextItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output of the binary sentiment classifier for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Polarity label, e.g. `POSITIVE` or `NEGATIVE`.
    pub label: String,
    /// Confidence in `[0.0, 1.0]`.
    pub score: f64,
}

/// One label's score from the multi-label emotion classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    /// Independent score in `[0.0, 1.0]`; scores for one text need not sum to 1.
    pub score: f64,
}

/// Every emotion label's score for one text, in the order the classifier returned them.
pub type EmotionScores = Vec<EmotionScore>;
