//! `analyze` and `check` command handlers.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use emodash_analysis::{classifiers, resolve_texts, run_analysis, AnalysisError, Report};
use emodash_core::AppConfig;
use serde::Serialize;

use crate::render::render_dashboard;

/// Shown when there is nothing to analyze yet.
pub(crate) const NO_INPUT_PROMPT: &str = "Upload a CSV file or paste some text to begin.";

#[derive(Debug)]
pub(crate) struct AnalyzeInput {
    pub(crate) file: Option<PathBuf>,
    pub(crate) text: Option<String>,
    pub(crate) stdin: bool,
    pub(crate) json: bool,
    pub(crate) limit: Option<usize>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a Report,
}

/// Read whichever pasted source the user chose: `--stdin` or `--text`.
///
/// Skipped entirely when a file was given, since the upload wins.
fn read_pasted(input: &AnalyzeInput) -> anyhow::Result<Option<String>> {
    if input.file.is_some() {
        return Ok(None);
    }
    if input.stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read standard input")?;
        return Ok(Some(buf));
    }
    Ok(input.text.clone())
}

/// Normalize the input, classify it, and print the three dashboard views.
///
/// A missing input prints a prompt and returns `Ok`: it is the expected
/// state before the user supplies anything.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the upload lacks a `text`
/// column, the classifiers cannot be reached, or any classification fails.
pub(crate) async fn run_analyze(config: &AppConfig, input: AnalyzeInput) -> anyhow::Result<()> {
    let pasted = read_pasted(&input)?;
    let upload = match &input.file {
        Some(path) => Some(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => None,
    };

    let texts = match resolve_texts(upload, pasted.as_deref()) {
        Ok(texts) => texts,
        Err(AnalysisError::NoInputProvided) => {
            println!("{NO_INPUT_PROMPT}");
            return Ok(());
        }
        Err(e) if e.is_user_facing() => {
            tracing::warn!(error = %e, "input rejected");
            return Err(anyhow::anyhow!("{e}"));
        }
        Err(e) => return Err(e.into()),
    };

    let classifiers = classifiers::initialize(config).await?;
    let analysis = run_analysis(texts, &classifiers.sentiment, &classifiers.emotion)
        .await
        .context("analysis failed")?;

    let limit = input.limit.unwrap_or(config.preview_limit);
    let report = analysis.summary().report(limit, config.preview_chars);

    if input.json {
        let envelope = JsonReport {
            generated_at: Utc::now(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        let mut out = String::new();
        render_dashboard(&report, &mut out)?;
        print!("{out}");
    }

    Ok(())
}

/// Connect both classifiers and print what they serve.
///
/// # Errors
///
/// Returns an error if either classifier server cannot be reached.
pub(crate) async fn run_check(config: &AppConfig) -> anyhow::Result<()> {
    let classifiers = classifiers::initialize(config).await?;
    println!(
        "sentiment: {} ({})",
        classifiers.sentiment_model,
        classifiers.sentiment.base_url()
    );
    println!(
        "emotion:   {} ({})",
        classifiers.emotion_model,
        classifiers.emotion.base_url()
    );
    Ok(())
}
