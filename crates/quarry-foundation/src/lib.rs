//! Foundation Layer - Identity types, diagnostic shapes, and error handling
//!
//! This crate provides the foundational building blocks for Quarry:
//! - Opaque identity newtypes for packages and analyzers
//! - The analyzer-produced diagnostic record and range ordering
//! - The shapes surfaced by the external parser/type-checker pipeline
//! - Seam traits for the collaborators the cache consumes but never owns

pub mod diagnostic;
pub mod error;
pub mod ids;
pub mod model;
pub mod traits;

// Re-export commonly used types for convenience
pub use diagnostic::{compare_positions, compare_ranges, Diagnostic};
pub use error::{CacheError, CacheResult};
pub use ids::{AnalyzerId, PackageId, PackagePath};
pub use model::{LoadError, LoadErrorKind, ParseMode};
pub use traits::{Analysis, ParseHandle, SyntaxOf};
