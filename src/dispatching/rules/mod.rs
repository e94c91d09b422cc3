//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Tail-based**: LDT (Jackson's rule)
//! - **Time-based**: SPT, LPT
//! - **Arrival-based**: ERD
//!
//! # Score Convention
//! All rules return lower scores for higher priority jobs.

use super::{DispatchingRule, RuleKey, RuleScore, SchedulingContext};
use crate::models::Job;

/// Largest Delivery Time.
///
/// Prioritizes jobs with the longest tail `q`. Applied to the released
/// jobs whenever the machine becomes free, this is Jackson's heuristic
/// (Schrage's algorithm) for `1 | r_j | L_max` in head-body-tail form.
///
/// # Reference
/// Jackson (1955); Carlier (1982), "The one-machine sequencing problem"
#[derive(Debug, Clone, Copy)]
pub struct Ldt;

impl DispatchingRule for Ldt {
    fn name(&self) -> &'static str {
        "LDT"
    }

    fn evaluate(&self, job: &Job, _context: &SchedulingContext) -> RuleScore {
        -(job.delivery() as f64)
    }

    fn key(&self, job: &Job, _context: &SchedulingContext) -> Option<RuleKey> {
        Some(-RuleKey::from(job.delivery()))
    }

    fn description(&self) -> &'static str {
        "Largest Delivery Time"
    }
}

/// Shortest Processing Time.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, job: &Job, _context: &SchedulingContext) -> RuleScore {
        job.processing() as f64
    }

    fn key(&self, job: &Job, _context: &SchedulingContext) -> Option<RuleKey> {
        Some(RuleKey::from(job.processing()))
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, job: &Job, _context: &SchedulingContext) -> RuleScore {
        -(job.processing() as f64)
    }

    fn key(&self, job: &Job, _context: &SchedulingContext) -> Option<RuleKey> {
        Some(-RuleKey::from(job.processing()))
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

/// Earliest Release Date.
///
/// First come, first served among the released jobs. Serves as a
/// tail-blind baseline against which Jackson's rule can be compared.
#[derive(Debug, Clone, Copy)]
pub struct Erd;

impl DispatchingRule for Erd {
    fn name(&self) -> &'static str {
        "ERD"
    }

    fn evaluate(&self, job: &Job, _context: &SchedulingContext) -> RuleScore {
        job.release() as f64
    }

    fn key(&self, job: &Job, _context: &SchedulingContext) -> Option<RuleKey> {
        Some(RuleKey::from(job.release()))
    }

    fn description(&self) -> &'static str {
        "Earliest Release Date"
    }
}
