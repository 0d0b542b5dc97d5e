//! Compact layout: `root/<resources>/<group>.<name>.<version>.<ext>`.

use std::path::Path;

use xregistry_id::{ArtifactType, parse_compact_filename};

use super::{EntryKind, container_exists, entry_name, list_dir};
use crate::accessor::ContentAccessor;
use crate::config::WalkOptions;
use crate::error::WalkError;
use crate::visitor::{RegistryVisitor, dispatch, report};

/// Report every parseable file directly under `root/<ty.resource_dir()>`.
///
/// A missing resource directory means the registry has no artifacts of
/// this type. Files whose names do not parse are skipped unless
/// `options.report_unparseable` is set.
pub fn process_type(
    ty: ArtifactType,
    root: &Path,
    options: &WalkOptions,
    visitor: &mut dyn RegistryVisitor,
) {
    let resource_path = root.join(ty.resource_dir());
    if !container_exists(&resource_path) {
        return;
    }

    let files = match list_dir(&resource_path, EntryKind::File) {
        Ok(files) => files,
        Err(e) => {
            report(visitor, WalkError::listing(&resource_path, &e));
            return;
        }
    };

    for file in files {
        let Some(artifact) = parse_compact_filename(&entry_name(&file)) else {
            tracing::debug!(file = %file.path().display(), "skipping unparseable filename");
            if options.report_unparseable {
                report(visitor, WalkError::unparseable(file.path()));
            }
            continue;
        };
        let content = ContentAccessor::from_path(file.into_path());
        dispatch(visitor, ty, artifact, content);
    }
}
