use thiserror::Error;

/// Failure while poking at a page or row capability.
///
/// Row-local by policy: the extractor downgrades this to a skip and the
/// harvester treats a failing strategy as an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("page access failed: {message}")]
pub struct PageAccessError {
    pub message: String,
}

impl PageAccessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One row-selection predicate. Strategies are data, not code, so that
/// per-source chains can live in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStrategy {
    /// CSS selector, e.g. `tr.data`.
    CssSelector(String),
    /// Any row-like element whose class attribute contains the substring.
    ClassContains(String),
    /// Any table row with at least this many data cells.
    MinCells(usize),
}

/// Capability of one harvested row: cell lookup and text retrieval.
///
/// Implemented once per external source adapter; the extractor depends
/// only on this interface.
pub trait RowHandle {
    type Cell;

    fn cells(&self) -> Result<Vec<Self::Cell>, PageAccessError>;

    /// Direct text of the cell itself.
    fn text(&self, cell: &Self::Cell) -> Result<String, PageAccessError>;

    /// Text of each descendant element of the cell, in document order.
    /// Used as a fallback when the cell's own text is empty.
    fn descendant_texts(&self, cell: &Self::Cell) -> Result<Vec<String>, PageAccessError>;
}

/// Capability of one dashboard page: row discovery by structural
/// predicate. Navigation, authentication and waiting all happen before
/// a page handle reaches the core.
pub trait PageHandle {
    type Row: RowHandle;

    fn select_rows(&self, strategy: &RowStrategy) -> Result<Vec<Self::Row>, PageAccessError>;
}
