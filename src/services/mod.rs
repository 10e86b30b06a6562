//! Service layer for business logic.
//!
//! These services discover layouts in a Gaia checkout, manage the
//! per-language bundle directories and run the repackaging pipeline.

pub mod bundle;
pub mod layouts;
pub mod repack;

// Re-export commonly used types and functions
pub use bundle::duplicate_bundle;
pub use layouts::{available_languages, validate_language};
pub use repack::{repack_all, repack_language, RepackSummary};
