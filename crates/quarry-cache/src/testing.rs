//! Test support: mock implementations of the external seams
//!
//! The cache is written against the [`Analysis`] and [`Snapshot`] traits;
//! these mocks stand in for the engine's parser, type-checker, and view layer
//! so tests can build packages and graphs by hand.

use crate::package::Package;
use crate::snapshot::Snapshot;
use lsp_types::{DiagnosticSeverity, Position, Range, Uri};
use quarry_foundation::traits::{Analysis, ParseHandle};
use quarry_foundation::{CacheError, CacheResult, Diagnostic};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Marker analysis whose products carry no real data
pub struct MockAnalysis;

impl Analysis for MockAnalysis {
    type File = MockFile;
    type Types = MockTypes;
    type TypeInfo = MockTypeInfo;
    type Sizes = MockSizes;
}

pub struct MockTypes;
pub struct MockTypeInfo;
pub struct MockSizes;

/// Stand-in for a parse tree; carries the uri so tests can tell trees apart
#[derive(Debug)]
pub struct MockSyntax {
    pub uri: Uri,
}

/// Parse handle whose cached parse either exists or is permanently missing
#[derive(Debug)]
pub struct MockFile {
    uri: Uri,
    syntax: Option<Arc<MockSyntax>>,
}

impl MockFile {
    /// A file whose cached parse is available
    pub fn parsed(uri: &str) -> Arc<Self> {
        let uri = parse_uri(uri);
        Arc::new(Self {
            syntax: Some(Arc::new(MockSyntax { uri: uri.clone() })),
            uri,
        })
    }

    /// A file whose cached parse was evicted
    pub fn unparsed(uri: &str) -> Arc<Self> {
        Arc::new(Self {
            uri: parse_uri(uri),
            syntax: None,
        })
    }
}

impl ParseHandle for MockFile {
    type Syntax = MockSyntax;

    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn cached(&self) -> CacheResult<Arc<MockSyntax>> {
        self.syntax
            .clone()
            .ok_or_else(|| CacheError::syntax_unavailable(&self.uri))
    }
}

type IgnoredEntry = (Arc<MockFile>, Arc<Package<MockAnalysis>>);

/// View layer stand-in with a configurable set of ignored files
#[derive(Default)]
pub struct MockSnapshot {
    ignored: Mutex<HashMap<Uri, IgnoredEntry>>,
}

impl MockSnapshot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register `file` as ignored, resolving to `owner` via the delegate path
    pub fn ignore(&self, file: Arc<MockFile>, owner: Arc<Package<MockAnalysis>>) {
        self.ignored
            .lock()
            .unwrap()
            .insert(file.uri().clone(), (file, owner));
    }
}

impl Snapshot<MockAnalysis> for MockSnapshot {
    fn is_ignored(&self, uri: &Uri) -> bool {
        self.ignored.lock().unwrap().contains_key(uri)
    }

    fn find_ignored_file(&self, uri: &Uri) -> CacheResult<IgnoredEntry> {
        self.ignored
            .lock()
            .unwrap()
            .get(uri)
            .cloned()
            .ok_or_else(|| CacheError::file_not_in_graph(uri))
    }
}

/// Parse a uri literal, panicking on malformed test input
pub fn uri(value: &str) -> Uri {
    parse_uri(value)
}

fn parse_uri(value: &str) -> Uri {
    value.parse().expect("malformed test uri")
}

pub fn range(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Range {
    Range {
        start: Position {
            line: start_line,
            character: start_col,
        },
        end: Position {
            line: end_line,
            character: end_col,
        },
    }
}

/// An analyzer-produced diagnostic record
pub fn diag(source: &str, message: &str, range: Range) -> Diagnostic {
    Diagnostic {
        message: message.to_string(),
        range,
        severity: DiagnosticSeverity::WARNING,
        source: source.to_string(),
    }
}

/// A protocol-shaped diagnostic, as it would come back from a client
pub fn proto_diag(source: &str, message: &str, range: Range) -> lsp_types::Diagnostic {
    lsp_types::Diagnostic {
        range,
        message: message.to_string(),
        source: Some(source.to_string()),
        ..Default::default()
    }
}
