use log::debug;
use thiserror::Error;

use crate::page::{PageAccessError, RowHandle};
use crate::profile::{Column, SourceProfile};
use crate::record::ManuscriptRecord;

/// Why a harvested row produced no record.
///
/// All variants are row-local and expected; the harvester counts them
/// and moves on. Nothing here ever aborts the remaining rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The resolved id or status matched a header token.
    #[error("header row")]
    HeaderRow,
    /// A required field resolved empty after all lookup tiers.
    #[error("incomplete row: empty {field}")]
    Incomplete { field: &'static str },
    /// The row handle itself failed mid-extraction.
    #[error("row extraction failed: {0}")]
    ExtractionError(String),
}

impl From<PageAccessError> for SkipReason {
    fn from(err: PageAccessError) -> Self {
        SkipReason::ExtractionError(err.message)
    }
}

/// Extract one normalized record from a row, or classify the row as noise.
///
/// Field resolution is tiered: direct cell text first, then the first
/// descendant text longer than `profile.min_text_len`. The status field
/// additionally keeps only the last non-empty line of whatever
/// resolved, because status cells often prepend editor contact lines
/// above the actual status.
pub fn extract<R: RowHandle>(
    row: &R,
    profile: &SourceProfile,
) -> Result<ManuscriptRecord, SkipReason> {
    let cells = row.cells()?;

    let id = resolve_column(row, &cells, profile, Column::Id)?;
    let raw_status = resolve_column(row, &cells, profile, Column::Status)?;
    let status = last_nonempty_line(&raw_status);
    let title = resolve_column(row, &cells, profile, Column::Title)?;

    if is_header_token(&id, profile) || is_header_token(&status, profile) {
        return Err(SkipReason::HeaderRow);
    }
    if id.is_empty() {
        return Err(SkipReason::Incomplete { field: "id" });
    }
    if title.is_empty() {
        return Err(SkipReason::Incomplete { field: "title" });
    }

    debug!(
        "{}: extracted {}: {} - {}",
        profile.source, id, title, status
    );
    Ok(ManuscriptRecord {
        source: profile.source.clone(),
        id,
        title,
        status,
        url: None,
    })
}

/// Tiered lookup for one column. A column missing from the profile or
/// beyond the row's cell count resolves empty rather than failing; the
/// caller decides whether that makes the row unusable.
fn resolve_column<R: RowHandle>(
    row: &R,
    cells: &[R::Cell],
    profile: &SourceProfile,
    column: Column,
) -> Result<String, SkipReason> {
    let Some(index) = profile.column_index(column) else {
        return Ok(String::new());
    };
    let Some(cell) = cells.get(index) else {
        return Ok(String::new());
    };

    let direct = row.text(cell)?.trim().to_string();
    if !direct.is_empty() {
        return Ok(direct);
    }

    // Icon-only and wrapper cells keep their real text one level down.
    for text in row.descendant_texts(cell)? {
        let trimmed = text.trim();
        if trimmed.chars().count() > profile.min_text_len {
            return Ok(trimmed.to_string());
        }
    }

    Ok(String::new())
}

fn last_nonempty_line(text: &str) -> String {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .to_string()
}

fn is_header_token(text: &str, profile: &SourceProfile) -> bool {
    let text = text.trim();
    profile
        .header_tokens
        .iter()
        .any(|token| token.eq_ignore_ascii_case(text))
}
