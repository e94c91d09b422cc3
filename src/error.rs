//! Scheduling errors.

use thiserror::Error;

use crate::models::{JobId, Time};
use crate::validation::ValidationError;

/// Errors raised by the job collection, the scheduler and the evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The instance failed validation. Carries every detected issue.
    #[error("invalid instance: {}", join_messages(.0))]
    InvalidInstance(Vec<ValidationError>),

    /// Evaluator input is not a usable schedule.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Removal or access on an empty collection.
    #[error("collection is empty")]
    EmptyCollection,

    /// Positional access past the end of the collection.
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A node handle that does not refer to a live element.
    #[error("stale or foreign node handle {0}")]
    InvalidHandle(usize),

    /// A job without an assigned interval where one is required.
    #[error("job {id} has not been scheduled")]
    Unscheduled { id: JobId },

    /// `start + p` or `finish + q` does not fit in the time type.
    #[error("time of job {id} overflows (start {start})")]
    TimeOverflow { id: JobId, start: Time },
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
