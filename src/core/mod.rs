pub mod comparator;
pub mod digest;
pub mod engine;
pub mod error;
pub mod reconciler;
pub mod scanner;
pub mod transfer;

pub use comparator::{ActionKind, ActionSummary, FileRelation, SyncAction};
pub use digest::{calculate_file_hash, calculate_hash, Fingerprint};
pub use engine::{ErrorPolicy, SyncEngine, SyncEvent, SyncOptions, SyncReport};
pub use error::SyncError;
pub use reconciler::{reconcile_additions, reconcile_deletions, Pass, PassReport};
pub use scanner::{DirEntry, EntryKind};
pub use transfer::{copy_file, remove_file};
