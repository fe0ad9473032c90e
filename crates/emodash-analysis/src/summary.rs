//! Read-only views over a finished run, shaped for display.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate::Aggregate;
use crate::types::{SentimentResult, TextItem};

/// Appended to display text that was cut short.
pub const ELLIPSIS: &str = "...";

/// Cut `text` to its first `max_chars` characters, marking the cut with [`ELLIPSIS`].
///
/// Counts Unicode scalar values, not bytes. Text that already fits is
/// returned borrowed and unchanged.
#[must_use]
pub fn truncate_for_display(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// One row of the recent-messages view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayCard {
    pub text: String,
    pub sentiment_label: String,
    pub sentiment_score: f64,
    pub emotion_label: String,
    pub emotion_score: f64,
}

impl std::fmt::Display for DisplayCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Text: {}", self.text)?;
        writeln!(
            f,
            "Sentiment: {} ({:.2})",
            self.sentiment_label, self.sentiment_score
        )?;
        write!(
            f,
            "Top Emotion: {} ({:.2})",
            self.emotion_label, self.emotion_score
        )
    }
}

/// Owned, serializable snapshot of the three views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub item_count: usize,
    pub sentiment_counts: BTreeMap<String, usize>,
    pub emotion_means: BTreeMap<String, f64>,
    pub cards: Vec<DisplayCard>,
}

/// Borrowed projection over a run's texts, sentiment results and aggregate.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    texts: &'a [TextItem],
    sentiments: &'a [SentimentResult],
    aggregate: &'a Aggregate,
}

impl<'a> Summary<'a> {
    pub(crate) fn new(
        texts: &'a [TextItem],
        sentiments: &'a [SentimentResult],
        aggregate: &'a Aggregate,
    ) -> Self {
        Self {
            texts,
            sentiments,
            aggregate,
        }
    }

    /// Sentiment label → number of texts.
    #[must_use]
    pub fn sentiment_counts(&self) -> &'a BTreeMap<String, usize> {
        self.aggregate.sentiment().as_map()
    }

    /// Emotion label → mean score across all texts.
    #[must_use]
    pub fn emotion_means(&self) -> BTreeMap<String, f64> {
        self.aggregate.emotions().means()
    }

    /// Display cards for the first `limit` texts, each cut to `max_chars`.
    #[must_use]
    pub fn cards(&self, limit: usize, max_chars: usize) -> Vec<DisplayCard> {
        self.texts
            .iter()
            .zip(self.sentiments)
            .zip(self.aggregate.top_emotions())
            .take(limit)
            .map(|((text, sentiment), top)| DisplayCard {
                text: truncate_for_display(text.as_str(), max_chars).into_owned(),
                sentiment_label: sentiment.label.clone(),
                sentiment_score: sentiment.score,
                emotion_label: top.label.clone(),
                emotion_score: top.score,
            })
            .collect()
    }

    #[must_use]
    pub fn report(&self, limit: usize, max_chars: usize) -> Report {
        Report {
            item_count: self.texts.len(),
            sentiment_counts: self.sentiment_counts().clone(),
            emotion_means: self.emotion_means(),
            cards: self.cards(limit, max_chars),
        }
    }
}
