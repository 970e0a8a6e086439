pub mod operations;
pub mod pure;

// Re-export the surface the orchestrator uses
pub use operations::{build_archive, extract_archive};
pub use pure::{ARCHIVE_SIZE_CEILING, PERSISTENT_ENTRY, SAVE_ENTRY_SUFFIX};
