//! Turns an uploaded table or pasted lines into an ordered list of [`TextItem`]s.

use std::io::Read;

use crate::error::AnalysisError;
use crate::types::TextItem;

/// Header of the column read from uploaded tables.
pub const TEXT_COLUMN: &str = "text";

/// Read every row's [`TEXT_COLUMN`] cell from a CSV upload, in row order.
///
/// Cells are decoded lossily so non-UTF-8 bytes never abort the read, and
/// duplicates are kept. Rows whose cell is blank or missing are skipped
/// because a [`TextItem`] cannot be empty. Other columns are ignored.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingColumn`] if the header row has no
/// [`TEXT_COLUMN`], or [`AnalysisError::Csv`] if the data cannot be parsed.
pub fn texts_from_csv<R: Read>(reader: R) -> Result<Vec<TextItem>, AnalysisError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let column = reader
        .byte_headers()?
        .iter()
        .position(|h| String::from_utf8_lossy(h).trim() == TEXT_COLUMN)
        .ok_or_else(|| AnalysisError::MissingColumn {
            column: TEXT_COLUMN.to_string(),
        })?;

    let mut texts = Vec::new();
    for (row, record) in reader.byte_records().enumerate() {
        let record = record?;
        let cell = record
            .get(column)
            .map(|raw| String::from_utf8_lossy(raw).into_owned())
            .unwrap_or_default();
        match TextItem::new(cell) {
            Some(text) => texts.push(text),
            None => tracing::warn!(row = row + 1, "skipping row with blank text cell"),
        }
    }

    tracing::debug!(rows = texts.len(), "read texts from uploaded table");
    Ok(texts)
}

/// Split pasted text into trimmed, non-blank lines, preserving order.
#[must_use]
pub fn texts_from_paste(pasted: &str) -> Vec<TextItem> {
    pasted
        .lines()
        .filter_map(|line| TextItem::new(line.trim()))
        .collect()
}

/// Pick the authoritative input source and normalize it.
///
/// The upload is checked first and wins whenever it is present; pasted text
/// is only consulted when there is no upload.
///
/// # Errors
///
/// Returns [`AnalysisError::NoInputProvided`] when the chosen source yields no
/// texts, or propagates any error from [`texts_from_csv`].
pub fn resolve_texts<R: Read>(
    upload: Option<R>,
    pasted: Option<&str>,
) -> Result<Vec<TextItem>, AnalysisError> {
    let texts = if let Some(upload) = upload {
        if pasted.is_some_and(|p| !p.trim().is_empty()) {
            tracing::debug!("both upload and pasted text supplied; using upload");
        }
        texts_from_csv(upload)?
    } else if let Some(pasted) = pasted {
        texts_from_paste(pasted)
    } else {
        Vec::new()
    };

    if texts.is_empty() {
        return Err(AnalysisError::NoInputProvided);
    }
    Ok(texts)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
