//! Opaque identity newtypes
//!
//! Build identifiers and import paths are both plain strings on the wire and
//! often look alike, so each gets its own type to ensure one is never used
//! where the other belongs. There is deliberately no conversion between them:
//! lookup tables key on exactly one of the two, chosen per use case (import
//! resolution keys on `PackagePath`, graph de-duplication on `PackageId`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for one compiled package variant.
///
/// Accounts for build tags/configuration: two packages with the same import
/// path but different configurations have different `PackageId`s.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

/// The path used in source to reference a package.
///
/// Not unique across build configurations: many `PackageId`s may map to the
/// same `PackagePath`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackagePath(String);

/// Identity of one analyzer registered with the analyzer framework.
///
/// Keys the per-package diagnostics table and is what a protocol diagnostic's
/// `source` field is matched against.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyzerId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(PackageId);
string_id!(PackagePath);
string_id!(AnalyzerId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_serde() {
        let id = PackageId::new("example.com/pkg [linux,amd64]");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"example.com/pkg [linux,amd64]\"");
        let back: PackageId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn same_text_different_types_stay_distinct() {
        // Equal strings, but the types never compare to each other; this is
        // the whole point of the newtypes.
        let id = PackageId::new("example.com/pkg");
        let path = PackagePath::new("example.com/pkg");
        assert_eq!(id.as_str(), path.as_str());
    }

    #[test]
    fn display_matches_inner_string() {
        let path = PackagePath::from("example.com/util");
        assert_eq!(path.to_string(), "example.com/util");
    }
}
