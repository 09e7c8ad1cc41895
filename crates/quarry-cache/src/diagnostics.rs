//! Per-package diagnostics table
//!
//! The one mutable piece of an otherwise immutable package node. Analyzers
//! write whole entries after running; the protocol layer reads them back to
//! correlate diagnostics that round-tripped through a client. One mutex per
//! node serializes the table; nothing slow ever runs under the lock.

use quarry_foundation::{AnalyzerId, CacheError, CacheResult, Diagnostic};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Lock-guarded mapping from analyzer to the diagnostics it produced.
///
/// Iteration order over analyzers is deterministic for a given table state
/// (ordered by `AnalyzerId`), which fixes which entry wins when several
/// analyzers report the same finding.
#[derive(Debug, Default)]
pub struct DiagnosticStore {
    table: Mutex<BTreeMap<AnalyzerId, Vec<Diagnostic>>>,
}

impl DiagnosticStore {
    /// Replace the entry for `analyzer` wholesale.
    ///
    /// Never merges: prior diagnostics from this analyzer are dropped even if
    /// the new list is empty. Entries of other analyzers are untouched.
    pub fn set(&self, analyzer: AnalyzerId, diagnostics: Vec<Diagnostic>) {
        let mut table = self.lock();
        debug!(
            "storing {} diagnostics for analyzer {}",
            diagnostics.len(),
            analyzer
        );
        table.insert(analyzer, diagnostics);
    }

    /// Find the stored diagnostic a protocol diagnostic refers to.
    ///
    /// Exact-match lookup: the entry's analyzer name must equal the query's
    /// `source`, the message must be identical, and the ranges must compare
    /// equal. Returns the first match in analyzer order, then list order.
    pub fn find(&self, query: &lsp_types::Diagnostic) -> CacheResult<Diagnostic> {
        let source = query.source.as_deref().unwrap_or_default();
        let table = self.lock();
        for (analyzer, diagnostics) in table.iter() {
            if analyzer.as_str() != source {
                continue;
            }
            if let Some(found) = diagnostics.iter().find(|d| d.matches(query)) {
                return Ok(found.clone());
            }
        }
        Err(CacheError::diagnostic_not_found(source, &query.message))
    }

    // A panicked writer cannot have left a torn entry (insert replaces the
    // whole value), so a poisoned table is still valid data.
    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<AnalyzerId, Vec<Diagnostic>>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
