//! Abstraction for the snapshot/view layer (dependency inversion)
//!
//! The snapshot owns the set of all packages and decides which files are
//! ignored. The cache needs exactly two things from it: the ignored
//! classification, and the delegate resolution path for ignored files.
//! The cache does not know how to resolve ignored files and must not run
//! the graph search for them.

use crate::package::Package;
use lsp_types::Uri;
use quarry_foundation::traits::Analysis;
use quarry_foundation::CacheResult;
use std::sync::Arc;

/// The view the snapshot layer exposes to package nodes.
///
/// Packages hold this behind a `Weak`: the snapshot owns its packages, never
/// the other way around.
pub trait Snapshot<A: Analysis>: Send + Sync {
    /// Whether the view excludes this file from normal graph resolution
    fn is_ignored(&self, uri: &Uri) -> bool;

    /// Resolve an ignored file through the view's own path.
    ///
    /// Only called for uris `is_ignored` classified as ignored.
    fn find_ignored_file(&self, uri: &Uri) -> CacheResult<(Arc<A::File>, Arc<Package<A>>)>;
}
