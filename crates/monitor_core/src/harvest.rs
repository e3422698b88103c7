use log::{debug, warn};

use crate::extract::{extract, SkipReason};
use crate::page::{PageHandle, RowStrategy};
use crate::profile::SourceProfile;
use crate::record::ManuscriptRecord;

/// Row-skip tallies for one harvest, kept for operator visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipCounts {
    pub header_rows: usize,
    pub incomplete: usize,
    pub errors: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.header_rows + self.incomplete + self.errors
    }

    pub fn absorb(&mut self, other: SkipCounts) {
        self.header_rows += other.header_rows;
        self.incomplete += other.incomplete;
        self.errors += other.errors;
    }

    fn tally(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::HeaderRow => self.header_rows += 1,
            SkipReason::Incomplete { .. } => self.incomplete += 1,
            SkipReason::ExtractionError(_) => self.errors += 1,
        }
    }
}

/// Result of harvesting one page with one source profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    pub records: Vec<ManuscriptRecord>,
    pub skipped: SkipCounts,
}

/// Try each row-selection strategy in order and keep the first
/// non-empty result. Later strategies are fallbacks for brittle or
/// unknown markup, not additive. An exhausted chain yields an empty
/// sequence: zero rows is a legitimate outcome, not an error.
pub fn harvest<P: PageHandle>(page: &P, chain: &[RowStrategy]) -> Vec<P::Row> {
    for strategy in chain {
        match page.select_rows(strategy) {
            Ok(rows) if !rows.is_empty() => {
                debug!("strategy {:?} matched {} rows", strategy, rows.len());
                return rows;
            }
            Ok(_) => {
                debug!("strategy {:?} matched no rows, falling through", strategy);
            }
            Err(err) => {
                warn!("strategy {:?} failed, falling through: {}", strategy, err);
            }
        }
    }
    Vec::new()
}

/// Harvest a page and extract a record from every usable row.
///
/// Each record is stamped with the page URL as its best-effort deep
/// link. Skipped rows are counted, never fatal.
pub fn harvest_records<P: PageHandle>(
    page: &P,
    profile: &SourceProfile,
    page_url: Option<&str>,
) -> HarvestReport {
    let rows = harvest(page, &profile.row_strategies);
    if rows.is_empty() {
        warn!(
            "{}: no rows matched any strategy; zero records this run",
            profile.source
        );
    }

    let mut records = Vec::new();
    let mut skipped = SkipCounts::default();
    for row in &rows {
        match extract(row, profile) {
            Ok(mut record) => {
                record.url = page_url.map(ToOwned::to_owned);
                records.push(record);
            }
            Err(reason) => {
                skipped.tally(&reason);
                match reason {
                    SkipReason::HeaderRow => debug!("{}: skipping header row", profile.source),
                    other => warn!("{}: skipping row: {}", profile.source, other),
                }
            }
        }
    }

    debug!(
        "{}: harvested {} records, {} rows skipped",
        profile.source,
        records.len(),
        skipped.total()
    );
    HarvestReport { records, skipped }
}
