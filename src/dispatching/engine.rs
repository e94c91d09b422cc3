//! Rule engine for multi-criteria dispatching.
//!
//! Composes multiple dispatching rules with configurable evaluation modes
//! and tie-breaking strategies.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, RuleScore, SchedulingContext};
use crate::models::Job;

/// How multiple rules are combined.
#[derive(Debug, Clone, Default)]
pub enum EvaluationMode {
    /// Apply rules in sequence; use next rule only on ties.
    #[default]
    Sequential,
    /// Compute weighted sum of all rule scores.
    Weighted,
}

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep scan order: the first job met wins.
    #[default]
    FirstEncountered,
    /// Smallest job ID wins.
    ById,
}

impl TieBreaker {
    fn compare(self, a: &Job, b: &Job) -> Ordering {
        match self {
            TieBreaker::FirstEncountered => Ordering::Equal,
            TieBreaker::ById => a.id().cmp(&b.id()),
        }
    }
}

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn DispatchingRule>,
    weight: f64,
}

/// A composable rule engine for job prioritization.
///
/// Supports sequential multi-layer evaluation (primary rule → tie-breaker)
/// and weighted combination modes.
///
/// # Example
/// ```
/// use jackson_schedule::dispatching::RuleEngine;
/// use jackson_schedule::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Ldt)
///     .with_tie_breaker(rules::Erd);
/// assert_eq!(engine.rule_names(), vec!["LDT", "ERD"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<WeightedRule>,
    mode: EvaluationMode,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            tie_breaker: TieBreaker::FirstEncountered,
            epsilon: 1e-9,
        }
    }

    /// Jackson's rule: largest delivery time first.
    pub fn jackson() -> Self {
        Self::new().with_rule(rules::Ldt)
    }

    /// Adds a primary rule (weight 1.0).
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 1.0,
        });
        self
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: DispatchingRule + 'static>(
        mut self,
        rule: R,
        weight: f64,
    ) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Adds a tie-breaking rule (weight 0.0, used only in Sequential mode).
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 0.0,
        });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// The final tie-breaking strategy.
    pub fn final_tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|wr| wr.rule.name()).collect()
    }

    /// Sorts jobs by priority (highest priority first).
    ///
    /// Returns indices into the original slice. Jobs that compare equal keep
    /// their relative order.
    pub fn sort_indices(&self, jobs: &[Job], context: &SchedulingContext) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..jobs.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&jobs[a], &jobs[b], context));
        indices
    }

    /// Returns the position of the highest-priority job.
    pub fn select_best<'a, I>(&self, jobs: I, context: &SchedulingContext) -> Option<usize>
    where
        I: IntoIterator<Item = &'a Job>,
    {
        self.select_entry(jobs.into_iter().enumerate(), context)
    }

    /// Returns the key of the highest-priority `(key, job)` entry.
    ///
    /// Single pass; among equally ranked jobs the first one met is kept.
    pub fn select_entry<'a, K, I>(&self, entries: I, context: &SchedulingContext) -> Option<K>
    where
        I: IntoIterator<Item = (K, &'a Job)>,
    {
        let mut best: Option<(K, &Job)> = None;
        for (key, job) in entries {
            let better = match &best {
                None => true,
                Some((_, incumbent)) => self.compare(job, incumbent, context) == Ordering::Less,
            };
            if better {
                best = Some((key, job));
            }
        }
        best.map(|(key, _)| key)
    }

    /// Evaluates a single job and returns scores from each rule.
    pub fn evaluate(&self, job: &Job, context: &SchedulingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(job, context) * wr.weight)
            .collect()
    }

    /// Total order used for selection: rules first, then the final tie breaker.
    pub fn compare(&self, a: &Job, b: &Job, context: &SchedulingContext) -> Ordering {
        let by_rules = match &self.mode {
            EvaluationMode::Sequential => self.compare_sequential(a, b, context),
            EvaluationMode::Weighted => self.compare_scores(
                self.weighted_score(a, context),
                self.weighted_score(b, context),
            ),
        };
        by_rules.then_with(|| self.tie_breaker.compare(a, b))
    }

    fn compare_sequential(&self, a: &Job, b: &Job, context: &SchedulingContext) -> Ordering {
        for wr in &self.rules {
            let ordering = match (wr.rule.key(a, context), wr.rule.key(b, context)) {
                (Some(key_a), Some(key_b)) => key_a.cmp(&key_b),
                _ => self.compare_scores(
                    wr.rule.evaluate(a, context),
                    wr.rule.evaluate(b, context),
                ),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    fn compare_scores(&self, score_a: RuleScore, score_b: RuleScore) -> Ordering {
        if (score_a - score_b).abs() > self.epsilon {
            score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal)
        } else {
            Ordering::Equal
        }
    }

    fn weighted_score(&self, job: &Job, context: &SchedulingContext) -> f64 {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(job, context) * wr.weight)
            .sum()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::jackson()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
