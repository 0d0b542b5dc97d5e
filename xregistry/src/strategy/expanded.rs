//! Expanded layout:
//! `root/<groups>/<group>/<resources>/<name>/versions/<version>`.
//!
//! Every level is listed independently. A level that cannot be listed is
//! reported once and only its own sub-branch is dropped.

use std::path::Path;

use xregistry_id::{ArtifactId, ArtifactType, VERSIONS_DIR};

use super::{EntryKind, container_exists, entry_name, list_dir};
use crate::accessor::ContentAccessor;
use crate::error::WalkError;
use crate::visitor::{RegistryVisitor, dispatch, report};

/// Report every version file under `root/<ty.group_dir()>`.
pub fn process_type(ty: ArtifactType, root: &Path, visitor: &mut dyn RegistryVisitor) {
    let groups_path = root.join(ty.group_dir());
    if !container_exists(&groups_path) {
        return;
    }

    match list_dir(&groups_path, EntryKind::Dir) {
        Ok(groups) => {
            for group in groups {
                process_group(ty, &entry_name(&group), group.path(), visitor);
            }
        }
        Err(e) => report(visitor, WalkError::listing(&groups_path, &e)),
    }
}

fn process_group(
    ty: ArtifactType,
    group: &str,
    group_path: &Path,
    visitor: &mut dyn RegistryVisitor,
) {
    let resources_path = group_path.join(ty.resource_dir());
    match list_dir(&resources_path, EntryKind::Dir) {
        Ok(resources) => {
            for resource in resources {
                process_resource(ty, group, &entry_name(&resource), resource.path(), visitor);
            }
        }
        Err(e) => report(visitor, WalkError::listing(&resources_path, &e)),
    }
}

fn process_resource(
    ty: ArtifactType,
    group: &str,
    name: &str,
    resource_path: &Path,
    visitor: &mut dyn RegistryVisitor,
) {
    let versions_path = resource_path.join(VERSIONS_DIR);
    let versions = match list_dir(&versions_path, EntryKind::File) {
        Ok(versions) => versions,
        Err(e) => {
            report(visitor, WalkError::listing(&versions_path, &e));
            return;
        }
    };

    for version in versions {
        match ArtifactId::new(group, name, entry_name(&version)) {
            Ok(artifact) => {
                let content = ContentAccessor::from_path(version.into_path());
                dispatch(visitor, ty, artifact, content);
            }
            Err(e) => {
                tracing::debug!(file = %version.path().display(), error = %e, "skipping version file");
            }
        }
    }
}
