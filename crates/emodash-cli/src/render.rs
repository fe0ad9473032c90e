//! Plain-text rendering of the three dashboard views.

use std::fmt::Write;

use emodash_analysis::{DisplayCard, Report};

const BAR_WIDTH: usize = 40;

/// Write the sentiment, emotion and recent-message sections for `report`.
///
/// # Errors
///
/// Propagates any error from the underlying writer.
pub(crate) fn render_dashboard(report: &Report, out: &mut impl Write) -> std::fmt::Result {
    render_sentiment(report, out)?;
    writeln!(out)?;
    render_emotions(report, out)?;
    writeln!(out)?;
    render_cards(&report.cards, out)
}

fn render_sentiment(report: &Report, out: &mut impl Write) -> std::fmt::Result {
    writeln!(out, "Sentiment Results ({} messages)", report.item_count)?;

    let width = label_width(report.sentiment_counts.keys());
    let max = report.sentiment_counts.values().copied().max().unwrap_or(0);
    for (label, count) in &report.sentiment_counts {
        let bar = if max == 0 { 0 } else { count * BAR_WIDTH / max };
        writeln!(out, "  {label:<width$}  {count:>5}  {}", "#".repeat(bar))?;
    }
    Ok(())
}

fn render_emotions(report: &Report, out: &mut impl Write) -> std::fmt::Result {
    writeln!(out, "Average Emotion Scores")?;

    let mut means: Vec<(&str, f64)> = report
        .emotion_means
        .iter()
        .map(|(label, mean)| (label.as_str(), *mean))
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let width = label_width(report.emotion_means.keys());
    for (label, mean) in means {
        writeln!(out, "  {label:<width$}  {mean:>5.2}  {}", "#".repeat(score_bar(mean)))?;
    }
    Ok(())
}

fn render_cards(cards: &[DisplayCard], out: &mut impl Write) -> std::fmt::Result {
    writeln!(out, "Recent Messages & Results")?;
    for card in cards {
        writeln!(out)?;
        writeln!(out, "{card}")?;
    }
    Ok(())
}

fn label_width<'a>(labels: impl Iterator<Item = &'a String>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Bar length for a score in `[0.0, 1.0]`; out-of-range scores are clamped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn score_bar(score: f64) -> usize {
    let clamped = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
    (clamped * BAR_WIDTH as f64).round() as usize
}
