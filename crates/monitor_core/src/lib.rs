//! Monitor core: record model, field extraction, and snapshot diffing.
//!
//! Everything in this crate is pure: pages and rows arrive through the
//! capability traits in [`page`], and reconciliation does no I/O. The
//! engine crate supplies the concrete adapters and persistence.

mod diff;
mod extract;
mod harvest;
mod page;
mod profile;
mod record;

pub use diff::{reconcile, Reconciliation};
pub use extract::{extract, SkipReason};
pub use harvest::{harvest, harvest_records, HarvestReport, SkipCounts};
pub use page::{PageAccessError, PageHandle, RowHandle, RowStrategy};
pub use profile::{Column, SourceProfile};
pub use record::{
    ChangeEvent, ManuscriptRecord, RecordKey, Snapshot, Source, StoredEntry, Timestamp,
    TIMESTAMP_FORMAT,
};
