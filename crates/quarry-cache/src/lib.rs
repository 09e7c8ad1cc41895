//! Package representation and diagnostic cache
//!
//! This crate holds the result of analyzing one package (its files, load
//! errors, type tables, and import map) immutably once the analysis pipeline
//! has produced it. On top of that read-only snapshot it layers the one piece
//! of mutable state the engine needs: a lock-guarded table of analyzer
//! diagnostics. It also answers "which package owns this file", searching the
//! import graph breadth-first when the file is not in the starting package.
//!
//! Nothing here computes: packages are built by the snapshot layer via
//! [`PackageBuilder`], diagnostics arrive from the analyzer framework, and
//! the cache only stores and looks up.

pub mod diagnostics;
pub mod package;
pub mod snapshot;
pub mod testing;

mod resolve;

pub use diagnostics::DiagnosticStore;
pub use package::{Package, PackageBuilder};
pub use snapshot::Snapshot;
