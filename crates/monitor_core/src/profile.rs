use crate::page::RowStrategy;
use crate::record::Source;

/// Role of one column position in a source's dashboard table.
///
/// Columns the record model does not carry (submission dates and the
/// like) still occupy positions so that the mapping stays positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Status,
    Id,
    Title,
    Created,
    Submitted,
}

/// Per-source extraction configuration.
///
/// All of it is data: column order, row-selection chain, header-token
/// exclusion list and the descendant-text length guard are accepted at
/// construction, never hard-coded, so new sources only need a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProfile {
    pub source: Source,
    pub columns: Vec<Column>,
    /// Ordered fallback chain; the harvester stops at the first
    /// strategy that yields rows.
    pub row_strategies: Vec<RowStrategy>,
    /// Tokens that mark a resolved id or status as a header row.
    pub header_tokens: Vec<String>,
    /// Descendant texts this short (in characters) are ignored during
    /// fallback lookup; guards against icon-only elements.
    pub min_text_len: usize,
}

impl SourceProfile {
    pub const DEFAULT_HEADER_TOKENS: [&'static str; 5] =
        ["manuscript", "id", "#", "status", "title"];
    pub const DEFAULT_MIN_TEXT_LEN: usize = 1;

    pub fn new(source: Source, columns: Vec<Column>, row_strategies: Vec<RowStrategy>) -> Self {
        Self {
            source,
            columns,
            row_strategies,
            header_tokens: Self::DEFAULT_HEADER_TOKENS
                .iter()
                .map(|token| token.to_string())
                .collect(),
            min_text_len: Self::DEFAULT_MIN_TEXT_LEN,
        }
    }

    /// ScholarOne author dashboard, as used by IEEE journals.
    pub fn ieee() -> Self {
        Self::new(
            Source::new("IEEE"),
            vec![
                Column::Status,
                Column::Id,
                Column::Title,
                Column::Created,
                Column::Submitted,
            ],
            vec![
                RowStrategy::CssSelector("table#manuscriptTable tr.manuscriptRow".into()),
                RowStrategy::ClassContains("manuscript".into()),
                RowStrategy::MinCells(3),
            ],
        )
    }

    /// Editorial Manager submissions table, as used by Elsevier journals.
    pub fn elsevier() -> Self {
        Self::new(
            Source::new("Elsevier"),
            vec![Column::Id, Column::Title, Column::Status],
            vec![
                RowStrategy::CssSelector("tr.data".into()),
                RowStrategy::ClassContains("data".into()),
                RowStrategy::MinCells(3),
            ],
        )
    }

    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}
