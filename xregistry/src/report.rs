//! Validation result and report types.

use serde::Serialize;

use crate::error::WalkError;
use crate::index::DeploymentIndex;
use crate::walker::WalkOutcome;

/// Outcome of validating an accumulated walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ValidationResult {
    /// `true` iff `problems` is empty.
    pub valid: bool,
    /// Problem messages in the order they were reported, duplicates kept.
    pub problems: Vec<String>,
}

impl ValidationResult {
    #[must_use]
    pub fn from_problems(problems: Vec<String>) -> Self {
        Self {
            valid: problems.is_empty(),
            problems,
        }
    }
}

/// Everything one call to [`index_fs`](crate::index_fs) produced.
///
/// Callers must check both the outcome and the validation result: a
/// completed walk may still have reported branch-level problems.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct IndexReport {
    /// Terminal state of the walk.
    pub outcome: WalkOutcome,
    /// The artifacts found.
    pub index: DeploymentIndex,
    /// Problems reported during the walk, in order.
    pub errors: Vec<WalkError>,
    /// Validity derived from `errors`.
    pub validation: ValidationResult,
}

impl IndexReport {
    /// Whether the walk completed and reported no problems.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.outcome.is_completed() && self.validation.valid
    }

    /// Number of problems reported.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_iff_no_problems() {
        assert!(ValidationResult::from_problems(vec![]).valid);
        let invalid = ValidationResult::from_problems(vec!["x".to_owned()]);
        assert!(!invalid.valid);
        assert_eq!(invalid.problems, vec!["x"]);
    }

    #[test]
    fn test_report_requires_completion() {
        let report = IndexReport {
            outcome: WalkOutcome::Aborted,
            index: DeploymentIndex::default(),
            errors: vec![],
            validation: ValidationResult::from_problems(vec![]),
        };
        assert!(!report.is_ok());
        assert_eq!(report.errors_count(), 0);
    }
}
