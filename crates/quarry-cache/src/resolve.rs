//! Cross-package file resolution
//!
//! Breadth-first search over the import graph. De-duplication is keyed by
//! `PackageId`, never `PackagePath`: the same path can resolve to distinct
//! package variants under different build configurations reachable
//! transitively, and skipping one of those would miss a legitimate owner.

use crate::package::Package;
use lsp_types::Uri;
use quarry_foundation::traits::{Analysis, ParseHandle};
use quarry_foundation::{CacheError, CacheResult, PackageId};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::trace;

impl<A: Analysis> Package<A> {
    /// Find which package owns `uri`: this one, or a transitive import.
    ///
    /// Ignored files are delegated entirely to the snapshot view's own
    /// resolution path. Everything else is a breadth-first search starting
    /// here, returning the file handle together with the owning node.
    pub fn resolve_file(
        self: &Arc<Self>,
        uri: &Uri,
    ) -> CacheResult<(Arc<A::File>, Arc<Package<A>>)> {
        // Special case for ignored files.
        if let Ok(snapshot) = self.snapshot() {
            if snapshot.is_ignored(uri) {
                return snapshot.find_ignored_file(uri);
            }
        }

        let mut queue: VecDeque<Arc<Package<A>>> = VecDeque::new();
        let mut seen: HashSet<PackageId> = HashSet::new();
        queue.push_back(Arc::clone(self));

        // Nodes are marked seen when popped, not when enqueued, so a node
        // reached by two paths may sit in the queue twice before its first
        // visit. Total pops stay bounded by the distinct reachable ids.
        while let Some(pkg) = queue.pop_front() {
            seen.insert(pkg.id.clone());

            if let Some(handle) = pkg.files.iter().find(|h| h.uri() == uri) {
                trace!(
                    "resolved {} to package {}",
                    uri.as_str(),
                    pkg.id.as_str()
                );
                return Ok((Arc::clone(handle), Arc::clone(&pkg)));
            }
            for dep in pkg.imports.values() {
                if !seen.contains(&dep.id) {
                    queue.push_back(Arc::clone(dep));
                }
            }
        }
        Err(CacheError::file_not_in_graph(uri))
    }
}
