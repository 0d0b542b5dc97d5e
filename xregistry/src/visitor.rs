//! Callback interface driven by a registry walk.

use xregistry_id::{ArtifactId, ArtifactType};

use crate::accessor::ContentAccessor;
use crate::error::WalkError;

/// Receives the events of a walk.
///
/// Artifact callbacks may fire any number of times, including with
/// identities that collide with earlier ones. Error events never stop the
/// sibling branches of the walk. Implementations must not do I/O of their
/// own and cannot fail.
pub trait RegistryVisitor {
    /// Called once when the walk starts.
    fn on_start(&mut self) {}

    /// A policy artifact was found.
    fn on_policy(&mut self, artifact: ArtifactId, content: ContentAccessor);

    /// A schema artifact was found.
    fn on_schema(&mut self, artifact: ArtifactId, content: ContentAccessor);

    /// A rule artifact was found.
    fn on_rule(&mut self, artifact: ArtifactId, content: ContentAccessor);

    /// A problem was found.
    fn on_error(&mut self, error: WalkError);

    /// Called once when the walk ran to the end. Never called for an aborted walk.
    fn on_complete(&mut self) {}
}

/// Route an artifact to the callback matching its type.
pub fn dispatch(
    visitor: &mut dyn RegistryVisitor,
    ty: ArtifactType,
    artifact: ArtifactId,
    content: ContentAccessor,
) {
    tracing::debug!(artifact_type = %ty, artifact = %artifact, "artifact discovered");
    match ty {
        ArtifactType::Policy => visitor.on_policy(artifact, content),
        ArtifactType::Schema => visitor.on_schema(artifact, content),
        ArtifactType::Rule => visitor.on_rule(artifact, content),
    }
}

/// Forward a problem to the visitor, logging it on the way.
pub fn report(visitor: &mut dyn RegistryVisitor, error: WalkError) {
    tracing::warn!(kind = ?error.kind, path = %error.path.display(), "{}", error.message);
    visitor.on_error(error);
}
