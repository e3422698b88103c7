use log::info;

use crate::record::{ChangeEvent, ManuscriptRecord, Snapshot, StoredEntry, Timestamp};

/// Outcome of reconciling one harvest against the prior snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Status transitions, in harvest order.
    pub changes: Vec<ChangeEvent>,
    /// The next snapshot to persist.
    pub snapshot: Snapshot,
    /// Storage keys observed for the first time this run. Logged by
    /// callers, never notified: there is no old status to report.
    pub new_keys: Vec<String>,
}

/// Pure diff: deterministic given its inputs, no I/O.
///
/// The next snapshot is a right-biased merge: harvested records
/// overwrite their keys, keys absent from this harvest carry over
/// unchanged. A transient scrape failure therefore never erases
/// history for records it failed to see.
///
/// Duplicate harvested keys are compared against the old snapshot
/// individually, but the last observation wins in the next snapshot.
pub fn reconcile(old: &Snapshot, harvested: &[ManuscriptRecord], now: Timestamp) -> Reconciliation {
    let mut changes = Vec::new();
    let mut new_keys: Vec<String> = Vec::new();
    let mut snapshot = old.clone();

    for record in harvested {
        let key = record.key().storage_key();
        let previous = old.get(&key);

        match previous {
            Some(entry) if entry.status != record.status => {
                info!(
                    "status change for {}: {} -> {}",
                    key, entry.status, record.status
                );
                changes.push(ChangeEvent {
                    id: record.id.clone(),
                    title: record.title.clone(),
                    source: record.source.clone(),
                    old_status: entry.status.clone(),
                    new_status: record.status.clone(),
                    changed_at: now,
                    url: record.url.clone(),
                });
            }
            Some(_) => {}
            None => {
                info!("new record {}: {} ({})", key, record.title, record.status);
                if !new_keys.contains(&key) {
                    new_keys.push(key.clone());
                }
            }
        }

        let first_seen = previous.map(|entry| entry.first_seen).unwrap_or(now);
        snapshot.insert(
            key,
            StoredEntry {
                id: record.id.clone(),
                title: record.title.clone(),
                status: record.status.clone(),
                source: record.source.clone(),
                url: record.url.clone(),
                last_checked: now,
                first_seen,
            },
        );
    }

    Reconciliation {
        changes,
        snapshot,
        new_keys,
    }
}
