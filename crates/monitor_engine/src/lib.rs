//! Monitor engine: snapshot persistence, the HTML page adapter, and the
//! single-run pipeline over the pure core.
mod html;
mod run;
mod store;

pub use html::{HtmlPage, HtmlRow};
pub use run::{run_once, RunReport};
pub use store::{SnapshotStore, StoreError};
