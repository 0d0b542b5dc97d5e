//! Visitor that collects a walk into a [`DeploymentIndex`].

use xregistry_id::ArtifactId;

use crate::accessor::ContentAccessor;
use crate::error::WalkError;
use crate::index::{ArtifactMap, DeploymentIndex};
use crate::report::ValidationResult;
use crate::visitor::RegistryVisitor;

/// Collects artifacts and problems reported by one walk.
///
/// Borrowed mutably by the walk, so a single accumulator can only ever be
/// fed by one walk at a time. Use [`build_index`](Self::build_index) for an
/// independent snapshot, or [`into_index`](Self::into_index) to hand the
/// maps over without copying.
#[derive(Debug, Default)]
pub struct IndexAccumulator {
    artifacts: ArtifactMap,
    policies: ArtifactMap,
    schemas: ArtifactMap,
    rules: ArtifactMap,
    errors: Vec<WalkError>,
    started: bool,
    completed: bool,
}

impl IndexAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Problems recorded so far, in the order they were reported.
    #[must_use]
    pub fn errors(&self) -> &[WalkError] {
        &self.errors
    }

    /// Whether a walk has started feeding this accumulator.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the walk reported completion.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed
    }

    /// Valid iff no problem was recorded.
    ///
    /// Reference completeness between artifacts is not checked; an index
    /// without recorded problems always passes.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        ValidationResult::from_problems(self.errors.iter().map(ToString::to_string).collect())
    }

    /// Snapshot the collected maps. Later events do not affect the result.
    #[must_use]
    pub fn build_index(&self) -> DeploymentIndex {
        DeploymentIndex::new(
            self.artifacts.clone(),
            self.policies.clone(),
            self.schemas.clone(),
            self.rules.clone(),
        )
    }

    /// Consume the accumulator, returning its index and recorded problems.
    #[must_use]
    pub fn into_index(self) -> (DeploymentIndex, Vec<WalkError>) {
        (
            DeploymentIndex::new(self.artifacts, self.policies, self.schemas, self.rules),
            self.errors,
        )
    }

    fn insert(&mut self, typed: TypedMap, artifact: ArtifactId, content: ContentAccessor) {
        let map = match typed {
            TypedMap::Policies => &mut self.policies,
            TypedMap::Schemas => &mut self.schemas,
            TypedMap::Rules => &mut self.rules,
        };
        map.insert(artifact.clone(), content.clone());
        // Last write wins across types.
        if let Some(previous) = self.artifacts.insert(artifact, content) {
            tracing::debug!(source = ?previous.source(), "artifact identity reported more than once");
        }
    }
}

#[derive(Clone, Copy)]
enum TypedMap {
    Policies,
    Schemas,
    Rules,
}

impl RegistryVisitor for IndexAccumulator {
    fn on_start(&mut self) {
        self.started = true;
    }

    fn on_policy(&mut self, artifact: ArtifactId, content: ContentAccessor) {
        self.insert(TypedMap::Policies, artifact, content);
    }

    fn on_schema(&mut self, artifact: ArtifactId, content: ContentAccessor) {
        self.insert(TypedMap::Schemas, artifact, content);
    }

    fn on_rule(&mut self, artifact: ArtifactId, content: ContentAccessor) {
        self.insert(TypedMap::Rules, artifact, content);
    }

    fn on_error(&mut self, error: WalkError) {
        self.errors.push(error);
    }

    fn on_complete(&mut self) {
        self.completed = true;
    }
}
