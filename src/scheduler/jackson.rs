//! Jackson's heuristic for `1 | r_j, q_j | max(C_j + q_j)`.
//!
//! # Algorithm
//!
//! 1. Set the clock to the smallest release time.
//! 2. Among the released jobs (`r <= t`), dispatch the best one according to
//!    the rule engine (largest delivery time first by default).
//! 3. Run it from `t` to `t + p`, append it to the schedule.
//! 4. Move the clock to `max(finish, smallest remaining release)` and repeat
//!    until every job is placed.
//!
//! # Complexity
//! O(n²): one linear scan of the remaining jobs per placement.
//!
//! # Reference
//! Carlier (1982), "The one-machine sequencing problem", EJOR 11(1)

use tracing::{debug, trace};

use crate::dispatching::{RuleEngine, SchedulingContext, TieBreaker};
use crate::error::{Result, ScheduleError};
use crate::models::{JobCollection, JobStore, Time};
use crate::ordering;
use crate::validation::validate_instance;

/// Greedy single-machine scheduler.
///
/// Defaults to Jackson's rule. Any other dispatching rule chain can be
/// plugged in through `with_rule_engine`.
///
/// # Example
///
/// ```
/// use jackson_schedule::instance::sample_instance;
/// use jackson_schedule::scheduler::{max_delivery_completion, JacksonScheduler};
///
/// let schedule = JacksonScheduler::new().schedule(sample_instance()).unwrap();
/// assert_eq!(schedule.len(), 6);
/// assert_eq!(max_delivery_completion(&schedule).unwrap(), 38);
/// ```
#[derive(Debug, Clone)]
pub struct JacksonScheduler {
    rule_engine: RuleEngine,
    presort: bool,
}

impl JacksonScheduler {
    /// Creates a scheduler applying Jackson's rule.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::jackson(),
            presort: false,
        }
    }

    /// Replaces the selection rules.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Sets how equally ranked jobs are separated.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.rule_engine = self.rule_engine.with_final_tie_breaker(tie_breaker);
        self
    }

    /// Sorts the input by delivery time (descending) before dispatching.
    ///
    /// Only affects which of several equal-score jobs is met first.
    pub fn with_presort(mut self, presort: bool) -> Self {
        self.presort = presort;
        self
    }

    pub fn rule_engine(&self) -> &RuleEngine {
        &self.rule_engine
    }

    /// Schedules every job of `input`, consuming it.
    ///
    /// Returns the jobs in processing order, each with its machine interval.
    ///
    /// # Errors
    /// `ScheduleError::InvalidInstance` if the input is empty or holds a job
    /// with `p <= 0`, a negative `r` or `q`, a duplicate ID or an interval
    /// already set. `ScheduleError::TimeOverflow` if a finish time does not
    /// fit in `Time`.
    pub fn schedule<S: JobStore>(&self, mut input: S) -> Result<JobCollection> {
        validate_instance(input.entries().map(|(_, job)| job))
            .map_err(ScheduleError::InvalidInstance)?;

        if self.presort {
            ordering::sort_by_delivery(&mut input);
        }

        let mut output = JobCollection::with_capacity(input.len());
        let mut clock = min_release(&input).ok_or(ScheduleError::EmptyCollection)?;
        debug!(
            jobs = input.len(),
            clock,
            rules = ?self.rule_engine.rule_names(),
            presort = self.presort,
            "scheduling"
        );

        while !input.is_empty() {
            let context = SchedulingContext::at_time(clock);
            let eligible = input.entries().filter(|(_, job)| job.release() <= clock);
            let Some(handle) = self.rule_engine.select_entry(eligible, &context) else {
                unreachable!("clock {clock} is below every remaining release time");
            };

            let mut job = input.remove(handle)?;
            let interval = job.assign(clock).ok_or(ScheduleError::TimeOverflow {
                id: job.id(),
                start: clock,
            })?;
            trace!(
                job = job.id(),
                start = interval.start,
                finish = interval.finish,
                "placed"
            );
            output.push_back(job);

            if let Some(next_release) = min_release(&input) {
                clock = interval.finish.max(next_release);
            }
        }

        debug!(jobs = output.len(), finish = clock, "schedule complete");
        Ok(output)
    }
}

impl Default for JacksonScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn min_release<S: JobStore>(store: &S) -> Option<Time> {
    store.entries().map(|(_, job)| job.release()).min()
}
