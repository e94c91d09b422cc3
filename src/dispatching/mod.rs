//! Dispatching rules and rule engine for job selection.
//!
//! Whenever the machine becomes free, the scheduler asks a `RuleEngine`
//! to pick one job out of the released ones. Jackson's heuristic is the
//! engine with the single rule `Ldt` (largest delivery time first).
//!
//! # Usage
//!
//! ```
//! use jackson_schedule::dispatching::{RuleEngine, SchedulingContext, TieBreaker};
//! use jackson_schedule::dispatching::rules;
//! use jackson_schedule::models::Job;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Ldt)
//!     .with_tie_breaker(rules::Spt)
//!     .with_final_tie_breaker(TieBreaker::ById);
//!
//! let jobs = vec![Job::new(1, 0, 4, 7), Job::new(2, 0, 2, 7)];
//! let context = SchedulingContext::at_time(0);
//! assert_eq!(engine.select_best(jobs.iter(), &context), Some(1));
//! ```
//!
//! # References
//!
//! - Jackson (1955), "Scheduling a production line to minimize maximum tardiness"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{EvaluationMode, RuleEngine, TieBreaker};

use crate::models::Job;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// Exact integer priority returned by rules built on a single time value.
///
/// Lower keys = higher priority. Wide enough to negate any `Time`.
pub type RuleKey = i128;

/// A dispatching rule that evaluates job priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules that favour large values
/// (such as the delivery time) return the negated value.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "LDT", "SPT").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a job given the current scheduling context.
    fn evaluate(&self, job: &Job, context: &SchedulingContext) -> RuleScore;

    /// Exact key ordering jobs the same way as `evaluate`, if the rule has one.
    ///
    /// Sequential evaluation compares keys instead of scores when both jobs
    /// have one, so times beyond 2^53 are not rounded together.
    fn key(&self, _job: &Job, _context: &SchedulingContext) -> Option<RuleKey> {
        None
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
