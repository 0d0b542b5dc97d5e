//! Layout-specific traversal strategies.
//!
//! Each strategy implements one operation: find every artifact of a given
//! type under the root and report it to the visitor. The orchestrator in
//! [`walker`](crate::walker) picks one strategy per walk through
//! [`RegistryFormat`] and stays layout-agnostic.

pub mod compact;
pub mod expanded;

use std::io;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};
use xregistry_id::ArtifactType;

use crate::config::{RegistryFormat, WalkOptions};
use crate::visitor::RegistryVisitor;

impl RegistryFormat {
    /// Process every artifact of `ty` under `root`.
    ///
    /// Every failure is local to `ty`: listing failures are reported to the
    /// visitor and the other types are still processed.
    pub fn process_type(
        self,
        ty: ArtifactType,
        root: &Path,
        options: &WalkOptions,
        visitor: &mut dyn RegistryVisitor,
    ) {
        match self {
            Self::Compact => compact::process_type(ty, root, options, visitor),
            Self::Expanded => expanded::process_type(ty, root, visitor),
        }
    }
}

/// Whether the container directory at `path` is present.
///
/// A probe that fails, e.g. on a symlink loop or when `root` is a file, counts
/// as absent.
fn container_exists(path: &Path) -> bool {
    match path.try_exists() {
        Ok(exists) => exists,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "container probe failed");
            false
        }
    }
}

/// Which entries a listing keeps.
#[derive(Debug, Clone, Copy)]
enum EntryKind {
    File,
    Dir,
}

/// Non-recursively list `dir`, keeping regular files or directories.
///
/// Symlinks are followed so that a link to a file counts as a file. The
/// listing is sorted by file name; nothing downstream depends on the order.
/// Failing to read `dir` itself, including `dir` not being a directory,
/// fails the whole listing.
fn list_dir(dir: &Path, kind: EntryKind) -> io::Result<Vec<DirEntry>> {
    if !dir.is_dir() {
        return Err(if dir.exists() {
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory")
        } else {
            io::Error::new(io::ErrorKind::NotFound, "no such directory")
        });
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // A dangling link or loop inside `dir` is neither a file nor a directory.
            Err(err) if err.depth() > 0 => {
                tracing::debug!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
            Err(err) => return Err(io::Error::from(err)),
        };
        let keep = match kind {
            EntryKind::File => entry.file_type().is_file(),
            EntryKind::Dir => entry.file_type().is_dir(),
        };
        if keep {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// File name of an entry as text, replacing invalid UTF-8.
fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}
