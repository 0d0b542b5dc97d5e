//! Error types reported by a registry walk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// The kind of problem a walk ran into.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum WalkErrorKind {
    /// The root path does not exist. Fatal to the whole walk.
    InvalidRootPath,
    /// A container, group, resource or `versions` directory could not be listed.
    /// Scoped to the affected branch; siblings keep going.
    DirectoryListingFailure,
    /// A compact filename could not be parsed into an identity.
    /// Only reported when `WalkOptions::report_unparseable` is set.
    FilenameParseFailure,
    /// The root could not be probed. Fatal to the whole walk.
    UnexpectedFailure,
}

/// A problem reported through the visitor's error channel.
///
/// The `Display` form is the problem message that ends up in a
/// [`ValidationResult`](crate::ValidationResult).
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Error)]
#[error("{message}")]
#[non_exhaustive]
pub struct WalkError {
    /// The kind of failure.
    pub kind: WalkErrorKind,
    /// The path the problem is about (root, directory or file).
    pub path: PathBuf,
    /// Human-readable description, always naming `path`.
    pub message: String,
}

impl WalkError {
    /// The root of a walk does not exist.
    #[must_use]
    pub fn missing_root(root: &Path) -> Self {
        Self {
            kind: WalkErrorKind::InvalidRootPath,
            path: root.to_owned(),
            message: format!("Path does not exist: {}", root.display()),
        }
    }

    /// `dir` could not be listed.
    #[must_use]
    pub fn listing(dir: &Path, err: &std::io::Error) -> Self {
        Self {
            kind: WalkErrorKind::DirectoryListingFailure,
            path: dir.to_owned(),
            message: format!("{}: {err}", dir.display()),
        }
    }

    /// The name of `file` is not a compact artifact filename.
    #[must_use]
    pub fn unparseable(file: &Path) -> Self {
        Self {
            kind: WalkErrorKind::FilenameParseFailure,
            path: file.to_owned(),
            message: format!(
                "{}: filename does not match group.name.version.ext",
                file.display()
            ),
        }
    }

    /// `root` could not be probed.
    #[must_use]
    pub fn unexpected(root: &Path, err: &std::io::Error) -> Self {
        Self {
            kind: WalkErrorKind::UnexpectedFailure,
            path: root.to_owned(),
            message: format!("{}:{err}", root.display()),
        }
    }

    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        let label = match self.kind {
            WalkErrorKind::InvalidRootPath => "invalid root",
            WalkErrorKind::DirectoryListingFailure => "listing failure",
            WalkErrorKind::FilenameParseFailure => "unparseable filename",
            WalkErrorKind::UnexpectedFailure => "unexpected failure",
        };
        format!("[{label}] {}", self.message)
    }
}
