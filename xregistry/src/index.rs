//! The deployment index: an immutable snapshot of a walk's artifacts.

use std::collections::BTreeMap;

use xregistry_id::{ArtifactId, ArtifactType};

use crate::accessor::ContentAccessor;

/// Artifacts keyed by identity.
pub type ArtifactMap = BTreeMap<ArtifactId, ContentAccessor>;

/// Immutable index of discovered artifacts.
///
/// Every entry of a typed map is also in the combined map, unless two
/// artifacts of different types share one identity; the combined map then
/// holds whichever was reported last while each typed map keeps its own.
#[derive(Debug, Clone, Default)]
pub struct DeploymentIndex {
    artifacts: ArtifactMap,
    policies: ArtifactMap,
    schemas: ArtifactMap,
    rules: ArtifactMap,
}

impl DeploymentIndex {
    /// Assemble an index from a combined map and the three typed maps.
    #[must_use]
    pub const fn new(
        artifacts: ArtifactMap,
        policies: ArtifactMap,
        schemas: ArtifactMap,
        rules: ArtifactMap,
    ) -> Self {
        Self {
            artifacts,
            policies,
            schemas,
            rules,
        }
    }

    /// All artifacts, regardless of type.
    #[must_use]
    pub const fn artifacts(&self) -> &ArtifactMap {
        &self.artifacts
    }

    #[must_use]
    pub const fn policies(&self) -> &ArtifactMap {
        &self.policies
    }

    #[must_use]
    pub const fn schemas(&self) -> &ArtifactMap {
        &self.schemas
    }

    #[must_use]
    pub const fn rules(&self) -> &ArtifactMap {
        &self.rules
    }

    /// The map for one artifact type.
    #[must_use]
    pub const fn get(&self, ty: ArtifactType) -> &ArtifactMap {
        match ty {
            ArtifactType::Policy => &self.policies,
            ArtifactType::Schema => &self.schemas,
            ArtifactType::Rule => &self.rules,
        }
    }

    /// Look up an artifact in the combined map.
    #[must_use]
    pub fn find_artifact(&self, artifact: &ArtifactId) -> Option<&ContentAccessor> {
        self.artifacts.get(artifact)
    }

    /// Look up an artifact of a given type.
    #[must_use]
    pub fn find(&self, ty: ArtifactType, artifact: &ArtifactId) -> Option<&ContentAccessor> {
        self.get(ty).get(artifact)
    }

    /// Number of entries in the combined map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Every typed entry, policies first, then schemas, then rules.
    pub fn entries(&self) -> impl Iterator<Item = (ArtifactType, &ArtifactId, &ContentAccessor)> {
        ArtifactType::ALL
            .into_iter()
            .flat_map(move |ty| self.get(ty).iter().map(move |(id, c)| (ty, id, c)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn accessor(bytes: &'static [u8]) -> ContentAccessor {
        ContentAccessor::from_fn(move || Ok(Box::new(Cursor::new(bytes))))
    }

    fn id(name: &str) -> ArtifactId {
        ArtifactId::new("g", name, "1").unwrap()
    }

    fn sample() -> DeploymentIndex {
        let policy = accessor(b"policy");
        let schema = accessor(b"schema");
        let artifacts: ArtifactMap = [(id("p"), policy.clone()), (id("s"), schema.clone())]
            .into_iter()
            .collect();
        DeploymentIndex::new(
            artifacts,
            [(id("p"), policy)].into_iter().collect(),
            [(id("s"), schema)].into_iter().collect(),
            ArtifactMap::new(),
        )
    }

    #[test]
    fn test_lookups() {
        let index = sample();
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
        assert_eq!(
            index.find_artifact(&id("p")).unwrap().read_all().unwrap(),
            b"policy"
        );
        assert!(index.find(ArtifactType::Schema, &id("s")).is_some());
        assert!(index.find(ArtifactType::Policy, &id("s")).is_none());
        assert!(index.find_artifact(&id("missing")).is_none());
        assert!(index.get(ArtifactType::Rule).is_empty());
    }

    #[test]
    fn test_entries_follow_type_order() {
        let index = sample();
        let listed: Vec<(ArtifactType, String)> = index
            .entries()
            .map(|(ty, id, _)| (ty, id.name().to_owned()))
            .collect();
        assert_eq!(
            listed,
            vec![
                (ArtifactType::Policy, "p".to_owned()),
                (ArtifactType::Schema, "s".to_owned())
            ]
        );
    }

    #[test]
    fn test_new_keeps_maps_apart() {
        let rule = accessor(b"rule");
        let index = DeploymentIndex::new(
            ArtifactMap::new(),
            ArtifactMap::new(),
            ArtifactMap::new(),
            [(id("r"), rule)].into_iter().collect(),
        );
        assert!(index.is_empty());
        assert_eq!(index.rules().len(), 1);
        assert!(index.find(ArtifactType::Rule, &id("r")).is_some());
        assert!(index.find_artifact(&id("r")).is_none());
    }

    #[test]
    fn test_default_is_empty() {
        let index = DeploymentIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.entries().count(), 0);
    }
}
