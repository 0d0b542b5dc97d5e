//! # xregistry
//!
//! Discovers policies, schemas and rules laid out as a file-system registry
//! and indexes them by `(group, name, version)`.
//!
//! The walk is split into a layout-agnostic orchestrator ([`Walker`]), two
//! layout strategies (compact and expanded, see [`RegistryFormat`]) and a
//! callback interface ([`RegistryVisitor`]). [`IndexAccumulator`] is the
//! stock visitor: it builds a [`DeploymentIndex`] and a
//! [`ValidationResult`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xregistry::{FsSourceConfig, index_fs};
//!
//! let report = index_fs(&FsSourceConfig::new("src/main/xregistry"));
//! println!("Artifacts: {}", report.index.len());
//! println!("Problems: {}", report.errors_count());
//! println!("OK: {}", report.is_ok());
//! ```
//!
//! Driving the walk by hand:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use xregistry::{IndexAccumulator, RegistryFormat, Walker};
//!
//! let mut accumulator = IndexAccumulator::new();
//! let outcome = Walker::new(RegistryFormat::Expanded)
//!     .walk(Path::new("registry"), &mut accumulator);
//! let index = accumulator.build_index();
//! assert_eq!(outcome.is_completed(), accumulator.is_complete());
//! println!("{} policies", index.policies().len());
//! ```

mod accessor;
mod accumulator;
mod config;
mod error;
mod index;
pub mod output;
mod report;
mod strategy;
mod visitor;
mod walker;

pub use accessor::{ContentAccessor, ContentStream};
pub use accumulator::IndexAccumulator;
pub use config::{FormatSelection, FsSourceConfig, RegistryFormat, WalkOptions};
pub use error::{WalkError, WalkErrorKind};
pub use index::{ArtifactMap, DeploymentIndex};
pub use report::{IndexReport, ValidationResult};
pub use visitor::RegistryVisitor;
pub use walker::{WalkOutcome, Walker};
pub use xregistry_id::{ArtifactId, ArtifactIdError, ArtifactType, parse_compact_filename};

/// Index the registry tree described by `config`.
///
/// Resolves the layout, walks the tree with an [`IndexAccumulator`] and
/// packages the result. A missing root is not an `Err`: it shows up as
/// [`WalkOutcome::MissingRoot`] with one recorded problem.
#[must_use]
pub fn index_fs(config: &FsSourceConfig) -> IndexReport {
    let format = config.format.resolve(&config.root);
    tracing::debug!(root = %config.root.display(), %format, "indexing registry");

    let mut accumulator = IndexAccumulator::new();
    let outcome =
        Walker::with_options(format, config.options.clone()).walk(&config.root, &mut accumulator);
    let validation = accumulator.validate();
    let (index, errors) = accumulator.into_index();

    IndexReport {
        outcome,
        index,
        errors,
        validation,
    }
}
