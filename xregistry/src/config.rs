//! Configuration types for registry walks.
//!
//! Split into the walk itself (layout selection and walk options) and the
//! filesystem source consumed by [`index_fs`](crate::index_fs).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use xregistry_id::ArtifactType;

/// Directory layout of a registry tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryFormat {
    /// `root/<resources>/<group>.<name>.<version>.<ext>`
    #[default]
    Compact,
    /// `root/<groups>/<group>/<resources>/<name>/versions/<version>`
    Expanded,
}

impl RegistryFormat {
    /// Guess the layout of `root`.
    ///
    /// Any group-container directory (`policygroups`, `schemagroups`,
    /// `rulegroups`) means expanded; everything else, including a missing
    /// root, is treated as compact.
    #[must_use]
    pub fn detect(root: &Path) -> Self {
        let expanded = ArtifactType::ALL
            .iter()
            .any(|ty| root.join(ty.group_dir()).is_dir());
        if expanded {
            Self::Expanded
        } else {
            Self::Compact
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Expanded => "expanded",
        }
    }
}

impl fmt::Display for RegistryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "expanded" => Ok(Self::Expanded),
            other => Err(format!(
                "unknown registry format '{other}' (expected compact or expanded)"
            )),
        }
    }
}

/// How the layout of a source tree is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatSelection {
    /// Inspect the root with [`RegistryFormat::detect`].
    #[default]
    Auto,
    /// Use the given layout.
    Fixed(RegistryFormat),
}

impl FormatSelection {
    /// Resolve the selection against a concrete root.
    #[must_use]
    pub fn resolve(self, root: &Path) -> RegistryFormat {
        match self {
            Self::Auto => RegistryFormat::detect(root),
            Self::Fixed(format) => format,
        }
    }
}

/// Walk-level knobs.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct WalkOptions {
    /// Report unparseable compact filenames as `FilenameParseFailure` errors.
    ///
    /// **Defaults to `false`**: such files are skipped and only logged at
    /// debug level, which keeps the validation result unaffected by stray
    /// files in a resource directory.
    pub report_unparseable: bool,
}

impl WalkOptions {
    /// Options with every knob off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            report_unparseable: false,
        }
    }
}

/// Filesystem source for [`index_fs`](crate::index_fs).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Registry root directory.
    pub root: PathBuf,
    /// Layout selection (default: auto-detect).
    pub format: FormatSelection,
    /// Walk options.
    pub options: WalkOptions,
}

impl FsSourceConfig {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            format: FormatSelection::default(),
            options: WalkOptions::default(),
        }
    }
}
