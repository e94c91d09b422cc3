//! Job model.
//!
//! A job in the head-body-tail form of `1 | r_j | L_max`: it becomes
//! available at its release time (head), occupies the machine for its
//! processing time (body) and, once finished, still needs its delivery
//! time (tail) before it counts as complete.
//!
//! # Reference
//! Carlier (1982), "The one-machine sequencing problem"

use serde::{Deserialize, Serialize};

use super::{JobId, Time};

/// Machine interval assigned to a job by the scheduler.
///
/// Always satisfies `finish = start + processing` of the owning job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Time the machine starts the job.
    pub start: Time,
    /// Time the machine releases the job.
    pub finish: Time,
}

/// A job to be sequenced on the single machine.
///
/// Identity and the `(r, p, q)` parameters are fixed at construction.
/// The interval stays `None` until the scheduler places the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    release: Time,
    processing: Time,
    delivery: Time,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interval: Option<Interval>,
}

impl Job {
    /// Creates an unscheduled job.
    ///
    /// Parameters are not checked here; `validation::validate_instance`
    /// reports out-of-domain values before scheduling.
    pub fn new(id: JobId, release: Time, processing: Time, delivery: Time) -> Self {
        Self {
            id,
            release,
            processing,
            delivery,
            interval: None,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    /// Release time `r`.
    pub fn release(&self) -> Time {
        self.release
    }

    /// Processing time `p`.
    pub fn processing(&self) -> Time {
        self.processing
    }

    /// Delivery (tail) time `q`.
    pub fn delivery(&self) -> Time {
        self.delivery
    }

    pub fn interval(&self) -> Option<Interval> {
        self.interval
    }

    pub fn start(&self) -> Option<Time> {
        self.interval.map(|i| i.start)
    }

    pub fn finish(&self) -> Option<Time> {
        self.interval.map(|i| i.finish)
    }

    /// `finish + q`, the quantity whose maximum is the objective.
    ///
    /// `None` if the job is unscheduled or the sum overflows.
    pub fn delivery_completion(&self) -> Option<Time> {
        self.finish()?.checked_add(self.delivery)
    }

    pub fn is_scheduled(&self) -> bool {
        self.interval.is_some()
    }

    /// Places the job on the machine at `start`.
    ///
    /// Returns the assigned interval, or `None` if `start + p` overflows.
    pub(crate) fn assign(&mut self, start: Time) -> Option<Interval> {
        debug_assert!(self.interval.is_none(), "job {} placed twice", self.id);
        let finish = start.checked_add(self.processing)?;
        let interval = Interval { start, finish };
        self.interval = Some(interval);
        Some(interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_accessors() {
        let job = Job::new(4, 6, 5, 10);
        assert_eq!(job.id(), 4);
        assert_eq!(job.release(), 6);
        assert_eq!(job.processing(), 5);
        assert_eq!(job.delivery(), 10);
        assert!(!job.is_scheduled());
        assert_eq!(job.start(), None);
        assert_eq!(job.delivery_completion(), None);
    }

    #[test]
    fn test_assign_sets_interval() {
        let mut job = Job::new(1, 3, 2, 1);
        let interval = job.assign(5).unwrap();
        assert_eq!(interval, Interval { start: 5, finish: 7 });
        assert_eq!(job.start(), Some(5));
        assert_eq!(job.finish(), Some(7));
        assert_eq!(job.delivery_completion(), Some(8));
    }

    #[test]
    fn test_delivery_completion_overflow() {
        let mut job = Job::new(1, 0, 1, Time::MAX);
        job.assign(0).unwrap();
        assert!(job.is_scheduled());
        assert_eq!(job.delivery_completion(), None);
    }

    #[test]
    fn test_assign_overflow() {
        let mut job = Job::new(1, 0, 10, 0);
        assert!(job.assign(Time::MAX - 5).is_none());
        assert!(!job.is_scheduled());
    }

    #[test]
    fn test_serde_skips_missing_interval() {
        let job = Job::new(2, 4, 1, 5);
        let json = serde_json::to_string(&job).unwrap();
        assert_eq!(json, r#"{"id":2,"release":4,"processing":1,"delivery":5}"#);

        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }
}
