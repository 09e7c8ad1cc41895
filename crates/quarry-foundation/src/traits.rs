//! Seam traits for external collaborators (dependency inversion)
//!
//! The cache consumes parse handles and type-checker products but never
//! builds or interprets them. Each collaborator appears here only as the
//! shape the cache needs, so the engine's parser and type-checker can evolve
//! independently of the cache.

use crate::error::CacheResult;
use lsp_types::Uri;
use std::sync::Arc;

/// Handle to one source file and its cached parse.
///
/// The cache treats the parsed form as opaque; `Syntax` is whatever the
/// engine's parser produces.
pub trait ParseHandle: Send + Sync {
    type Syntax: Send + Sync;

    /// Stable identity of the underlying file
    fn uri(&self) -> &Uri;

    /// Retrieve the cached parse, if the parse cache still holds it.
    ///
    /// Best-effort: a miss is an error the caller may swallow, never a
    /// trigger for re-parsing.
    fn cached(&self) -> CacheResult<Arc<Self::Syntax>>;
}

/// The product types of the engine's analysis pipeline.
///
/// Bundles the associated types a package carries so the cache can be written
/// once against the seam rather than against a concrete parser/type-checker.
pub trait Analysis: Send + Sync + 'static {
    /// Per-file parse handle
    type File: ParseHandle;
    /// The type-checked package scope
    type Types: Send + Sync;
    /// Expression/identifier type facts
    type TypeInfo: Send + Sync;
    /// Target size/alignment information
    type Sizes: Send + Sync;
}

/// The syntax type produced by an analysis's parse handles
pub type SyntaxOf<A> = <<A as Analysis>::File as ParseHandle>::Syntax;
