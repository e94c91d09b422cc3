//! Input validation for single-machine instances.
//!
//! Checks an instance before scheduling. Detects:
//! - Empty job sets
//! - Duplicate job IDs
//! - Negative release or delivery times
//! - Non-positive processing times
//! - Jobs that already carry a machine interval

use std::collections::HashSet;

use thiserror::Error;

use crate::models::Job;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance has no jobs.
    EmptyInstance,
    /// Two jobs share the same ID.
    DuplicateId,
    /// `r < 0`.
    NegativeRelease,
    /// `p <= 0`.
    NonPositiveProcessing,
    /// `q < 0`.
    NegativeDelivery,
    /// A job was handed in with an interval already assigned.
    AlreadyScheduled,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an unscheduled instance.
///
/// Checks:
/// 1. At least one job
/// 2. No duplicate job IDs
/// 3. `r >= 0`, `p > 0`, `q >= 0` for every job
/// 4. No job is already scheduled
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance<'a, I>(jobs: I) -> ValidationResult
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    let mut count = 0usize;

    for job in jobs {
        count += 1;

        if !ids.insert(job.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id()),
            ));
        }
        if job.release() < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeRelease,
                format!("Job {} has negative release time {}", job.id(), job.release()),
            ));
        }
        if job.processing() <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveProcessing,
                format!(
                    "Job {} has non-positive processing time {}",
                    job.id(),
                    job.processing()
                ),
            ));
        }
        if job.delivery() < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDelivery,
                format!("Job {} has negative delivery time {}", job.id(), job.delivery()),
            ));
        }
        if job.is_scheduled() {
            errors.push(ValidationError::new(
                ValidationErrorKind::AlreadyScheduled,
                format!("Job {} is already scheduled", job.id()),
            ));
        }
    }

    if count == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Instance has no jobs",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::sample_instance;

    #[test]
    fn test_valid_input() {
        let jobs = sample_instance();
        assert!(validate_instance(&jobs).is_ok());
    }

    #[test]
    fn test_empty_instance() {
        let errors = validate_instance(&Vec::<Job>::new()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyInstance);
    }

    #[test]
    fn test_duplicate_id() {
        let jobs = vec![Job::new(1, 0, 1, 0), Job::new(1, 2, 3, 4)];
        let errors = validate_instance(&jobs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_non_positive_processing() {
        let jobs = vec![Job::new(1, 0, 0, 0), Job::new(2, 0, -3, 0)];
        let errors = validate_instance(&jobs).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveProcessing)
                .count(),
            2
        );
    }

    #[test]
    fn test_negative_release_and_delivery() {
        let jobs = vec![Job::new(1, -1, 2, -2)];
        let errors = validate_instance(&jobs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeRelease));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeDelivery));
    }

    #[test]
    fn test_already_scheduled() {
        let mut job = Job::new(1, 0, 2, 0);
        job.assign(0);
        let errors = validate_instance(&vec![job]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::AlreadyScheduled);
    }

    #[test]
    fn test_multiple_errors() {
        let jobs = vec![Job::new(7, -5, 0, 1), Job::new(7, 0, 1, 0)];
        let errors = validate_instance(&jobs).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
