//! Walk orchestration.
//!
//! A walk emits `on_start`, checks the root, processes the artifact types in
//! a fixed order through the selected strategy, and ends in one of three
//! terminal states:
//!
//! - [`WalkOutcome::Completed`]: every type was processed and `on_complete`
//!   fired. Branch-local errors may still have been reported.
//! - [`WalkOutcome::MissingRoot`]: the root does not exist. One error, no
//!   completion.
//! - [`WalkOutcome::Aborted`]: the root could not be probed at all. One
//!   error naming the root, no completion.
//!
//! Failures below the root never abort: they are reported against their own
//! branch and the remaining types are still processed.

use std::path::Path;

use serde::Serialize;
use xregistry_id::ArtifactType;

use crate::config::{RegistryFormat, WalkOptions};
use crate::error::WalkError;
use crate::visitor::{RegistryVisitor, report};

/// Terminal state of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkOutcome {
    Completed,
    MissingRoot,
    Aborted,
}

impl WalkOutcome {
    /// Whether the walk ran to the end. Says nothing about reported errors.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Walks a registry tree of one layout.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    format: RegistryFormat,
    options: WalkOptions,
}

impl Walker {
    #[must_use]
    pub const fn new(format: RegistryFormat) -> Self {
        Self {
            format,
            options: WalkOptions::new(),
        }
    }

    #[must_use]
    pub const fn with_options(format: RegistryFormat, options: WalkOptions) -> Self {
        Self { format, options }
    }

    #[must_use]
    pub const fn format(&self) -> RegistryFormat {
        self.format
    }

    /// Walk the tree at `root`, reporting everything to `visitor`.
    ///
    /// Never panics on I/O problems. A container that cannot be probed is
    /// treated as missing; every other problem reaches the visitor as an
    /// error event.
    pub fn walk(&self, root: &Path, visitor: &mut dyn RegistryVisitor) -> WalkOutcome {
        let _span = tracing::info_span!("walk", root = %root.display(), format = %self.format)
            .entered();
        visitor.on_start();

        match root.try_exists() {
            Ok(true) => {}
            Ok(false) => {
                report(visitor, WalkError::missing_root(root));
                return WalkOutcome::MissingRoot;
            }
            Err(e) => {
                report(visitor, WalkError::unexpected(root, &e));
                return WalkOutcome::Aborted;
            }
        }

        for ty in ArtifactType::WALK_ORDER {
            self.format.process_type(ty, root, &self.options, visitor);
        }

        visitor.on_complete();
        tracing::info!("walk completed");
        WalkOutcome::Completed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::accessor::ContentAccessor;
    use std::fs;
    use tempfile::TempDir;
    use xregistry_id::ArtifactId;

    /// Records the event sequence of a walk.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl RegistryVisitor for Recorder {
        fn on_start(&mut self) {
            self.events.push("start".to_owned());
        }
        fn on_policy(&mut self, artifact: ArtifactId, _content: ContentAccessor) {
            self.events.push(format!("policy {artifact}"));
        }
        fn on_schema(&mut self, artifact: ArtifactId, _content: ContentAccessor) {
            self.events.push(format!("schema {artifact}"));
        }
        fn on_rule(&mut self, artifact: ArtifactId, _content: ContentAccessor) {
            self.events.push(format!("rule {artifact}"));
        }
        fn on_error(&mut self, error: WalkError) {
            self.events.push(format!("error {error}"));
        }
        fn on_complete(&mut self) {
            self.events.push("complete".to_owned());
        }
    }

    #[test]
    fn test_types_processed_schema_rule_policy() {
        let tmp = TempDir::new().unwrap();
        for dir in ["policies", "schemas", "rules"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
        }
        fs::write(tmp.path().join("policies/g.p.1.json"), "{}").unwrap();
        fs::write(tmp.path().join("schemas/g.s.1.json"), "{}").unwrap();
        fs::write(tmp.path().join("rules/g.r.1.json"), "{}").unwrap();

        let mut recorder = Recorder::default();
        let outcome = Walker::new(RegistryFormat::Compact).walk(tmp.path(), &mut recorder);

        assert_eq!(outcome, WalkOutcome::Completed);
        assert_eq!(
            recorder.events,
            vec![
                "start",
                "schema g/s@1",
                "rule g/r@1",
                "policy g/p@1",
                "complete"
            ]
        );
    }

    #[test]
    fn test_missing_root_has_no_completion() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("absent");

        let mut recorder = Recorder::default();
        let outcome = Walker::new(RegistryFormat::Expanded).walk(&root, &mut recorder);

        assert_eq!(outcome, WalkOutcome::MissingRoot);
        assert!(!outcome.is_completed());
        assert_eq!(recorder.events.len(), 2, "got: {:?}", recorder.events);
        assert_eq!(recorder.events[0], "start");
        assert!(recorder.events[1].starts_with("error Path does not exist: "));
    }

    #[test]
    fn test_root_that_is_a_file_completes_empty() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("registry.tar");
        fs::write(&root, b"not a directory").unwrap();

        for format in [RegistryFormat::Compact, RegistryFormat::Expanded] {
            let mut recorder = Recorder::default();
            let outcome = Walker::new(format).walk(&root, &mut recorder);

            assert_eq!(outcome, WalkOutcome::Completed);
            assert_eq!(recorder.events, vec!["start", "complete"]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_looping_container_does_not_stop_other_types() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink("schemas", tmp.path().join("schemas")).unwrap();
        for dir in ["policies", "rules"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
        }
        fs::write(tmp.path().join("policies/g.p.1.json"), "{}").unwrap();
        fs::write(tmp.path().join("rules/g.r.1.json"), "{}").unwrap();

        let mut recorder = Recorder::default();
        let outcome = Walker::new(RegistryFormat::Compact).walk(tmp.path(), &mut recorder);

        assert_eq!(outcome, WalkOutcome::Completed);
        assert_eq!(
            recorder.events,
            vec!["start", "rule g/r@1", "policy g/p@1", "complete"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_looping_group_container_does_not_stop_other_types() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink("rulegroups", tmp.path().join("rulegroups")).unwrap();
        let versions = tmp.path().join("policygroups/g/policies/p/versions");
        fs::create_dir_all(&versions).unwrap();
        fs::write(versions.join("1"), "{}").unwrap();

        let mut recorder = Recorder::default();
        let outcome = Walker::new(RegistryFormat::Expanded).walk(tmp.path(), &mut recorder);

        assert_eq!(outcome, WalkOutcome::Completed);
        assert_eq!(recorder.events, vec!["start", "policy g/p@1", "complete"]);
    }

    #[test]
    fn test_walkers_build_in_const_context() {
        const EXPANDED: Walker = Walker::new(RegistryFormat::Expanded);
        const COMPACT: Walker = Walker::with_options(RegistryFormat::Compact, WalkOptions::new());

        assert_eq!(EXPANDED.format(), RegistryFormat::Expanded);
        assert!(!EXPANDED.options.report_unparseable);
        assert_eq!(COMPACT.format(), RegistryFormat::Compact);
    }

    #[test]
    fn test_empty_root_completes() {
        let tmp = TempDir::new().unwrap();
        let mut recorder = Recorder::default();
        let outcome = Walker::default().walk(tmp.path(), &mut recorder);
        assert_eq!(outcome, WalkOutcome::Completed);
        assert_eq!(recorder.events, vec!["start", "complete"]);
    }
}
