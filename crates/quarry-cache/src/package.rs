//! The package node: one package's immutable analysis result
//!
//! A [`Package`] is write-once. Every field except the embedded diagnostics
//! table is fixed by [`PackageBuilder::build`] and shared read-only from then
//! on, so the read contract needs no locking. Imported packages are held as
//! `Arc`s owned collectively by the snapshot that wired the graph; a node is
//! never deep-copied per importer.

use crate::diagnostics::DiagnosticStore;
use crate::snapshot::Snapshot;
use lsp_types::Uri;
use quarry_foundation::traits::{Analysis, ParseHandle, SyntaxOf};
use quarry_foundation::{
    AnalyzerId, CacheError, CacheResult, Diagnostic, LoadError, PackageId, PackagePath, ParseMode,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Immutable analysis result for one compiled package variant
pub struct Package<A: Analysis> {
    pub(crate) id: PackageId,
    pub(crate) path: PackagePath,
    pub(crate) mode: ParseMode,

    pub(crate) files: Vec<Arc<A::File>>,
    pub(crate) errors: Vec<LoadError>,
    pub(crate) imports: BTreeMap<PackagePath, Arc<Package<A>>>,
    pub(crate) types: Option<Arc<A::Types>>,
    pub(crate) types_info: Option<Arc<A::TypeInfo>>,
    pub(crate) types_sizes: Option<Arc<A::Sizes>>,

    pub(crate) snapshot: Option<Weak<dyn Snapshot<A>>>,
    pub(crate) diagnostics: DiagnosticStore,
}

impl<A: Analysis> Package<A> {
    /// Unique identifier of this compiled variant
    pub fn id(&self) -> &PackageId {
        &self.id
    }

    /// Import path this package is referenced by
    pub fn package_path(&self) -> &PackagePath {
        &self.path
    }

    /// How much syntax was retained for this package
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// The snapshot that built this package.
    ///
    /// Non-owning: reports `SnapshotGone` once the owning snapshot has been
    /// discarded (or was never attached).
    pub fn snapshot(&self) -> CacheResult<Arc<dyn Snapshot<A>>> {
        self.snapshot
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or_else(|| CacheError::snapshot_gone(self.id.clone()))
    }

    /// The package's files, in the order fixed at construction
    pub fn files(&self) -> &[Arc<A::File>] {
        &self.files
    }

    /// Look up a file in this package's own file list.
    ///
    /// Does not search imports; use [`Package::resolve_file`] for that.
    pub fn find_file(&self, uri: &Uri) -> CacheResult<Arc<A::File>> {
        self.files
            .iter()
            .find(|handle| handle.uri() == uri)
            .cloned()
            .ok_or_else(|| CacheError::file_not_found(uri))
    }

    /// Cached parse trees for the package's files.
    ///
    /// Best-effort by contract: files whose cached parse can no longer be
    /// retrieved are silently skipped, so the result may be shorter than
    /// [`Package::files`]. Callers must treat that as partial success, not
    /// an error.
    pub fn syntax(&self) -> Vec<Arc<SyntaxOf<A>>> {
        let mut syntax = Vec::with_capacity(self.files.len());
        for handle in &self.files {
            match handle.cached() {
                Ok(parsed) => syntax.push(parsed),
                Err(err) => {
                    trace!("skipping {}: {}", handle.uri().as_str(), err);
                }
            }
        }
        syntax
    }

    /// Errors surfaced while loading, parsing, or type-checking
    pub fn errors(&self) -> &[LoadError] {
        &self.errors
    }

    /// The type-checked package scope, absent if type-checking failed
    pub fn types(&self) -> Option<&Arc<A::Types>> {
        self.types.as_ref()
    }

    /// Type facts for expressions and identifiers, absent if type-checking failed
    pub fn types_info(&self) -> Option<&Arc<A::TypeInfo>> {
        self.types_info.as_ref()
    }

    /// Size/alignment information, absent if type-checking failed
    pub fn types_sizes(&self) -> Option<&Arc<A::Sizes>> {
        self.types_sizes.as_ref()
    }

    /// Whether the type-checking result is unusable.
    ///
    /// True iff any of the three type results is absent. This is the signal
    /// to check before trusting [`Package::types_info`]; consuming type facts
    /// from an ill-typed package is a caller contract violation.
    pub fn is_ill_typed(&self) -> bool {
        self.types.is_none() || self.types_info.is_none() || self.types_sizes.is_none()
    }

    /// Direct one-hop lookup in this package's import map.
    ///
    /// Does not search transitively.
    pub fn import(&self, path: &PackagePath) -> CacheResult<Arc<Package<A>>> {
        self.imports
            .get(path)
            .cloned()
            .ok_or_else(|| CacheError::import_not_found(path.clone()))
    }

    /// Replace the diagnostics one analyzer produced for this package.
    ///
    /// Whole-entry replacement: prior diagnostics from the same analyzer are
    /// dropped; other analyzers' entries are untouched.
    pub fn set_diagnostics(&self, analyzer: AnalyzerId, diagnostics: Vec<Diagnostic>) {
        self.diagnostics.set(analyzer, diagnostics);
    }

    /// Find the stored diagnostic a protocol diagnostic refers to.
    ///
    /// Exact-match correlation over analyzer name, message, and range; see
    /// [`DiagnosticStore::find`].
    pub fn find_diagnostic(&self, query: &lsp_types::Diagnostic) -> CacheResult<Diagnostic> {
        self.diagnostics.find(query)
    }
}

impl<A: Analysis> fmt::Debug for Package<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("files", &self.files.len())
            .field("imports", &self.imports.len())
            .field("ill_typed", &self.is_ill_typed())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Package`], used by the snapshot layer after analysis.
///
/// The cache never constructs a package from raw source; the pipeline hands
/// over fully-formed parts and `build` freezes them.
pub struct PackageBuilder<A: Analysis> {
    id: PackageId,
    path: PackagePath,
    mode: ParseMode,
    files: Vec<Arc<A::File>>,
    errors: Vec<LoadError>,
    imports: BTreeMap<PackagePath, Arc<Package<A>>>,
    types: Option<Arc<A::Types>>,
    types_info: Option<Arc<A::TypeInfo>>,
    types_sizes: Option<Arc<A::Sizes>>,
    snapshot: Option<Weak<dyn Snapshot<A>>>,
}

impl<A: Analysis> PackageBuilder<A> {
    pub fn new(
        id: impl Into<PackageId>,
        path: impl Into<PackagePath>,
        mode: ParseMode,
    ) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            mode,
            files: Vec::new(),
            errors: Vec::new(),
            imports: BTreeMap::new(),
            types: None,
            types_info: None,
            types_sizes: None,
            snapshot: None,
        }
    }

    /// Append one file; call order fixes the package's file order.
    pub fn file(mut self, file: Arc<A::File>) -> Self {
        self.files.push(file);
        self
    }

    pub fn files(mut self, files: impl IntoIterator<Item = Arc<A::File>>) -> Self {
        self.files.extend(files);
        self
    }

    pub fn load_error(mut self, error: LoadError) -> Self {
        self.errors.push(error);
        self
    }

    /// Record that this package imports `package` under `path`.
    ///
    /// The node is shared, not copied; multiple importers may hold the same
    /// `Arc`.
    pub fn import(mut self, path: impl Into<PackagePath>, package: Arc<Package<A>>) -> Self {
        self.imports.insert(path.into(), package);
        self
    }

    pub fn types(mut self, types: Arc<A::Types>) -> Self {
        self.types = Some(types);
        self
    }

    pub fn types_info(mut self, info: Arc<A::TypeInfo>) -> Self {
        self.types_info = Some(info);
        self
    }

    pub fn types_sizes(mut self, sizes: Arc<A::Sizes>) -> Self {
        self.types_sizes = Some(sizes);
        self
    }

    /// Attach the non-owning back-reference to the snapshot wiring the graph.
    pub fn snapshot<S: Snapshot<A> + 'static>(mut self, snapshot: &Arc<S>) -> Self {
        self.snapshot = Some(Arc::downgrade(snapshot) as Weak<dyn Snapshot<A>>);
        self
    }

    /// Freeze the package. Everything except diagnostics is immutable from
    /// here on.
    pub fn build(self) -> Arc<Package<A>> {
        Arc::new(Package {
            id: self.id,
            path: self.path,
            mode: self.mode,
            files: self.files,
            errors: self.errors,
            imports: self.imports,
            types: self.types,
            types_info: self.types_info,
            types_sizes: self.types_sizes,
            snapshot: self.snapshot,
            diagnostics: DiagnosticStore::default(),
        })
    }
}
