//! Candidate file discovery, filtering and loading

pub mod filter;
pub mod lister;
pub mod loader;

pub use filter::PathFilter;
pub use lister::{discover_root, list_tracked, resolve_targets};
pub use loader::{load_contents, LoadOutcome, SkipReason, SkippedFile};
