//! Analyzer-produced diagnostics and range ordering
//!
//! Analyzers report findings against a package as [`Diagnostic`] records. The
//! protocol layer later needs to correlate a diagnostic it received back from
//! a client with the record that originally produced it, which requires an
//! exact-match comparison over source, message, and range.

use lsp_types::{DiagnosticSeverity, Position, Range};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single finding an analyzer produced for a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Human-readable message describing the finding
    pub message: String,
    /// Source range the finding applies to
    pub range: Range,
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Name of the analyzer that produced this diagnostic
    pub source: String,
}

impl Diagnostic {
    /// Whether a protocol-shaped diagnostic refers to exactly this record.
    ///
    /// Intentionally an exact match, not nearest-match: message text must be
    /// identical and the ranges must compare equal. The analyzer name is
    /// matched separately by the diagnostics table, against its entry key.
    pub fn matches(&self, query: &lsp_types::Diagnostic) -> bool {
        self.message == query.message && compare_ranges(&self.range, &query.range) == Ordering::Equal
    }
}

/// Total order over positions: by line, then by column.
pub fn compare_positions(a: &Position, b: &Position) -> Ordering {
    a.line.cmp(&b.line).then(a.character.cmp(&b.character))
}

/// Total order over ranges: by start position, then by end position.
pub fn compare_ranges(a: &Range, b: &Range) -> Ordering {
    compare_positions(&a.start, &b.start).then_with(|| compare_positions(&a.end, &b.end))
}
