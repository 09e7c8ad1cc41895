//! Error handling for the Quarry cache layer
//!
//! Every failure in the cache is a distinguishable not-found condition that
//! callers are expected to handle; nothing here is fatal or retried.

use crate::ids::{PackageId, PackagePath};
use lsp_types::Uri;
use thiserror::Error;

/// Result type alias for convenience
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors reported by the package cache
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum CacheError {
    /// The file is not part of the package's own file list. Says nothing
    /// about transitive imports; see `FileNotInGraph` for that case.
    #[error("no parse handle for {uri}")]
    FileNotFound { uri: String },

    /// The path is not in the package's one-hop import map.
    #[error("no imported package for {path}")]
    ImportNotFound { path: PackagePath },

    /// No analyzer entry holds a diagnostic exactly matching the query.
    #[error("no matching {analyzer} diagnostic for {message:?}")]
    DiagnosticNotFound { analyzer: String, message: String },

    /// Breadth-first search exhausted the reachable import graph.
    #[error("no file for {uri}")]
    FileNotInGraph { uri: String },

    /// The parse cache holds no entry for this file.
    #[error("no cached parse for {uri}")]
    SyntaxUnavailable { uri: String },

    /// The snapshot that built this package is no longer live.
    #[error("snapshot owning package {id} is gone")]
    SnapshotGone { id: PackageId },
}

impl CacheError {
    /// File absent from a package's own file list
    pub fn file_not_found(uri: &Uri) -> Self {
        Self::FileNotFound {
            uri: uri.as_str().to_string(),
        }
    }

    /// Path absent from a package's one-hop import map
    pub fn import_not_found(path: impl Into<PackagePath>) -> Self {
        Self::ImportNotFound { path: path.into() }
    }

    /// No diagnostic matches the query exactly
    pub fn diagnostic_not_found(analyzer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DiagnosticNotFound {
            analyzer: analyzer.into(),
            message: message.into(),
        }
    }

    /// Import-graph search exhausted without a match
    pub fn file_not_in_graph(uri: &Uri) -> Self {
        Self::FileNotInGraph {
            uri: uri.as_str().to_string(),
        }
    }

    /// Cached parse retrieval failed for a file
    pub fn syntax_unavailable(uri: &Uri) -> Self {
        Self::SyntaxUnavailable {
            uri: uri.as_str().to_string(),
        }
    }

    /// Snapshot back-reference is absent or dead
    pub fn snapshot_gone(id: impl Into<PackageId>) -> Self {
        Self::SnapshotGone { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_missing_thing() {
        let uri: Uri = "file:///src/main.go".parse().unwrap();

        let err = CacheError::file_not_found(&uri);
        assert_eq!(err.to_string(), "no parse handle for file:///src/main.go");

        let err = CacheError::import_not_found("example.com/util");
        assert_eq!(err.to_string(), "no imported package for example.com/util");

        let err = CacheError::file_not_in_graph(&uri);
        assert_eq!(err.to_string(), "no file for file:///src/main.go");
    }

    #[test]
    fn variants_stay_distinguishable() {
        let uri: Uri = "file:///a.go".parse().unwrap();

        // A caller telling "absent here" apart from "absent everywhere" must
        // be able to match on the variant, not parse the message.
        match CacheError::file_not_found(&uri) {
            CacheError::FileNotFound { .. } => {}
            other => panic!("expected FileNotFound, got {other:?}"),
        }
        match CacheError::file_not_in_graph(&uri) {
            CacheError::FileNotInGraph { .. } => {}
            other => panic!("expected FileNotInGraph, got {other:?}"),
        }
    }

    #[test]
    fn error_implements_std_error() {
        let err = CacheError::diagnostic_not_found("vet", "unused var");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn diagnostic_not_found_carries_plain_data() {
        use std::error::Error;

        let err = CacheError::diagnostic_not_found("vet", "unused var");
        assert_eq!(err.to_string(), "no matching vet diagnostic for \"unused var\"");

        // The analyzer name is payload, not a wrapped inner error.
        assert!(err.source().is_none());
        match err {
            CacheError::DiagnosticNotFound { analyzer, message } => {
                assert_eq!(analyzer, "vet");
                assert_eq!(message, "unused var");
            }
            other => panic!("expected DiagnosticNotFound, got {other:?}"),
        }
    }
}
