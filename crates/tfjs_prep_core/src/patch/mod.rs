//! Literal source patching with backups.
//!
//! Each located file is read, backed up to `<path>.bak`, rewritten with the
//! substitution rules applied in order, and written back in place.
//! Failures are recorded per file; one bad file never stops the batch.

mod errors;
mod patcher;
mod types;

pub use errors::{PatchError, PatchResult};
pub use patcher::{backup_path_for, Patcher};
pub use types::{apply_rules, BackupPolicy, PatchOutcome, PatchSummary, SubstitutionRule};
