use monitor_core::{
    harvest_records, reconcile, ChangeEvent, SkipCounts, Source, SourceProfile, Timestamp,
};
use monitor_logging::{monitor_info, monitor_warn};

use crate::html::HtmlPage;
use crate::store::{SnapshotStore, StoreError};

/// Summary of one monitoring run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Status transitions, in harvest order. These go to the notifier.
    pub changes: Vec<ChangeEvent>,
    pub harvested: usize,
    pub new_records: usize,
    pub skipped: SkipCounts,
    /// Sources whose pages yielded zero records. Valid but suspicious:
    /// distinguishable in logs from "found N, all unchanged".
    pub empty_sources: Vec<Source>,
}

/// One full run: harvest every source page, reconcile against the
/// stored snapshot, persist the result.
///
/// Row-level trouble never escapes the harvest. Only a failed snapshot
/// write aborts the run, and it leaves the previous on-disk snapshot
/// intact.
pub fn run_once(
    store: &SnapshotStore,
    pages: &[(SourceProfile, HtmlPage)],
) -> Result<RunReport, StoreError> {
    let old = store.load();

    let mut records = Vec::new();
    let mut skipped = SkipCounts::default();
    let mut empty_sources = Vec::new();
    for (profile, page) in pages {
        let report = harvest_records(&page, profile, page.url());
        if report.records.is_empty() {
            monitor_warn!("{}: empty harvest, keeping prior history", profile.source);
            empty_sources.push(profile.source.clone());
        }
        skipped.absorb(report.skipped);
        records.extend(report.records);
    }

    let reconciliation = reconcile(&old, &records, Timestamp::now());
    store.save(&reconciliation.snapshot)?;

    monitor_info!(
        "run complete: {} harvested, {} new, {} changed, {} rows skipped",
        records.len(),
        reconciliation.new_keys.len(),
        reconciliation.changes.len(),
        skipped.total()
    );

    Ok(RunReport {
        changes: reconciliation.changes,
        harvested: records.len(),
        new_records: reconciliation.new_keys.len(),
        skipped,
        empty_sources,
    })
}
