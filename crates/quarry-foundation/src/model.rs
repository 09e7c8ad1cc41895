//! Shapes surfaced by the external parser/type-checker pipeline
//!
//! The cache stores these without interpreting them; construction happens
//! entirely in the analysis pipeline.

use lsp_types::{Range, Uri};
use serde::{Deserialize, Serialize};

/// How much of a package's syntax is retained after analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParseMode {
    /// Full syntax trees for every file
    Full,
    /// Only exported declarations are kept; function bodies are dropped
    ExportedOnly,
}

/// An error surfaced while loading, parsing, or type-checking a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadError {
    /// Human-readable message
    pub message: String,
    /// File the error applies to, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<Uri>,
    /// Range within the file, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    /// Stage that produced the error
    pub kind: LoadErrorKind,
}

/// Stage of the pipeline that produced a [`LoadError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadErrorKind {
    /// Package listing/metadata failure
    List,
    /// Syntax error
    Parse,
    /// Type-checking error
    Type,
}

impl LoadError {
    /// A file-scoped error with a location
    pub fn at(
        kind: LoadErrorKind,
        uri: Uri,
        range: Range,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            uri: Some(uri),
            range: Some(range),
            kind,
        }
    }

    /// A package-scoped error with no location
    pub fn package_level(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            uri: None,
            range: None,
            kind,
        }
    }
}
