//! Scheduling context for dispatching rule evaluation.

use crate::models::Time;

/// Runtime scheduling state passed to dispatching rules.
#[derive(Debug, Clone, Default)]
pub struct SchedulingContext {
    /// Current machine clock.
    pub current_time: Time,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: Time) -> Self {
        Self { current_time }
    }
}
