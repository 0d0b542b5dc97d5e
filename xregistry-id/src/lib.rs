//! Shared registry identity primitives.
//!
//! This crate is the single source of truth for artifact identities, the
//! artifact type table and the compact filename grammar. It is used by the
//! `xregistry` walker and by the `xregistry` CLI.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Minimum number of dot-separated tokens in a compact filename:
/// group, resource name, version and extension.
pub const COMPACT_MIN_TOKENS: usize = 4;

/// Name of the directory holding version files in the expanded layout.
pub const VERSIONS_DIR: &str = "versions";

/// Errors from artifact identity construction and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtifactIdError {
    /// One of the identity fields is empty.
    #[error("Invalid artifact identity: {field} must not be empty")]
    InvalidIdentity {
        /// The name of the offending field (`group`, `name` or `version`).
        field: &'static str,
    },

    /// An artifact type name was not recognised.
    #[error("Unknown artifact type '{0}' (expected policy, schema or rule)")]
    UnknownType(String),
}

/// Identity of a single artifact instance: `(group, name, version)`.
///
/// Equality, ordering and hashing are structural over the three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId {
    group: String,
    name: String,
    version: String,
}

impl ArtifactId {
    /// Create an identity from its three parts.
    ///
    /// # Errors
    /// Returns [`ArtifactIdError::InvalidIdentity`] if any field is empty.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ArtifactIdError> {
        let group = group.into();
        let name = name.into();
        let version = version.into();

        for (field, value) in [("group", &group), ("name", &name), ("version", &version)] {
            if value.is_empty() {
                return Err(ArtifactIdError::InvalidIdentity { field });
            }
        }

        Ok(Self {
            group,
            name,
            version,
        })
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.group, self.name, self.version)
    }
}

/// The closed set of artifact types a registry tree may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactType {
    Policy,
    Schema,
    Rule,
}

impl ArtifactType {
    /// All types, in declaration order.
    pub const ALL: [Self; 3] = [Self::Policy, Self::Schema, Self::Rule];

    /// Order in which a walk processes the types.
    pub const WALK_ORDER: [Self; 3] = [Self::Schema, Self::Rule, Self::Policy];

    /// Directory holding the group instances in the expanded layout.
    #[must_use]
    pub const fn group_dir(self) -> &'static str {
        match self {
            Self::Policy => "policygroups",
            Self::Schema => "schemagroups",
            Self::Rule => "rulegroups",
        }
    }

    /// Directory holding the resources, in both layouts.
    #[must_use]
    pub const fn resource_dir(self) -> &'static str {
        match self {
            Self::Policy => "policies",
            Self::Schema => "schemas",
            Self::Rule => "rules",
        }
    }

    /// Lowercase singular name (`policy`, `schema`, `rule`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Schema => "schema",
            Self::Rule => "rule",
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ArtifactType {
    type Err = ArtifactIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "policy" | "policies" => Ok(Self::Policy),
            "schema" | "schemas" => Ok(Self::Schema),
            "rule" | "rules" => Ok(Self::Rule),
            _ => Err(ArtifactIdError::UnknownType(s.to_owned())),
        }
    }
}

/// Parse a compact filename of the form `group.name.version[.more].ext`.
///
/// Trailing empty tokens (from trailing dots) are dropped before the token
/// count is checked. Everything between the name and the extension is the
/// version, joined back with `.`. Returns `None` when the filename has too
/// few tokens or yields an empty identity field; this function never fails
/// any other way.
#[must_use]
pub fn parse_compact_filename(filename: &str) -> Option<ArtifactId> {
    if filename.is_empty() {
        return None;
    }

    let mut tokens: Vec<&str> = filename.split('.').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    if tokens.len() < COMPACT_MIN_TOKENS {
        return None;
    }

    let version = tokens[2..tokens.len() - 1].join(".");
    ArtifactId::new(tokens[0], tokens[1], version).ok()
}
