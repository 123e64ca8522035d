//! Append-only audit trail
//!
//! Every create, update and delete performed through the services is written
//! to `audit.log` as one JSON object per line, with before/after snapshots
//! and a short summary of the fields that changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
