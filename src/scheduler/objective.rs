//! Schedule objective and quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Objective | max(C_j + q_j) |
//! | Makespan (C_max) | Latest machine completion |
//! | Total Idle | Machine gaps between first start and makespan |
//! | Avg Flow Time | Mean C_j - r_j |
//! | Max Waiting | Largest S_j - r_j |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::models::{Job, JobCollection, JobId, Time};

/// Maximum delivery completion `max(finish + q)` over a schedule.
///
/// Pure: evaluating the same schedule again gives the same value.
///
/// # Errors
/// `ScheduleError::InvalidInput` for an empty schedule,
/// `ScheduleError::Unscheduled` for a job without an interval,
/// `ScheduleError::TimeOverflow` if some `finish + q` does not fit in `Time`.
pub fn max_delivery_completion<'a, I>(jobs: I) -> Result<Time>
where
    I: IntoIterator<Item = &'a Job>,
{
    critical_job(jobs).map(|(_, value)| value)
}

/// First job attaining the objective, with the objective value.
fn critical_job<'a, I>(jobs: I) -> Result<(JobId, Time)>
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut best: Option<(JobId, Time)> = None;
    for job in jobs {
        let interval = job
            .interval()
            .ok_or(ScheduleError::Unscheduled { id: job.id() })?;
        let value = job.delivery_completion().ok_or(ScheduleError::TimeOverflow {
            id: job.id(),
            start: interval.start,
        })?;
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((job.id(), value));
        }
    }
    best.ok_or_else(|| ScheduleError::InvalidInput("schedule has no jobs".into()))
}

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleKpi {
    /// max(finish + q).
    pub objective: Time,
    /// Job whose finish + q equals the objective (first in schedule order).
    pub critical_job: JobId,
    /// Latest machine completion.
    pub makespan: Time,
    /// Total machine idle time between the first start and the makespan.
    pub total_idle: Time,
    /// Mean of finish - r.
    pub avg_flow_time: f64,
    /// Largest start - r.
    pub max_waiting: Time,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule in processing order.
    pub fn calculate(schedule: &JobCollection) -> Result<Self> {
        let (critical_job, objective) = critical_job(schedule)?;

        let mut makespan = Time::MIN;
        let mut total_idle: Time = 0;
        let mut total_flow: f64 = 0.0;
        let mut max_waiting: Time = 0;
        let mut previous_finish: Option<Time> = None;

        for job in schedule {
            let interval = job
                .interval()
                .ok_or(ScheduleError::Unscheduled { id: job.id() })?;

            if let Some(prev) = previous_finish {
                total_idle += (interval.start - prev).max(0);
            }
            previous_finish = Some(interval.finish);

            makespan = makespan.max(interval.finish);
            total_flow += (interval.finish - job.release()) as f64;
            max_waiting = max_waiting.max(interval.start - job.release());
        }

        Ok(Self {
            objective,
            critical_job,
            makespan,
            total_idle,
            avg_flow_time: total_flow / schedule.len() as f64,
            max_waiting,
        })
    }
}
