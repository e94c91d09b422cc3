//! Instance loaders.
//!
//! Sources of unscheduled jobs:
//! - the built-in six-job sample,
//! - a seeded random generator,
//! - JSON files (an array of jobs, or an object with a `jobs` array),
//! - interactive console entry.
//!
//! Loaders do not validate the domain of `r`, `p`, `q` beyond what the
//! console prompts enforce; the scheduler validates every instance.

use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{Job, JobCollection, JobId, Time};

/// Errors raised while loading an instance.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(String),
}

/// The six-job sample instance, `(r, p, q)` for ids 1..=6.
pub fn sample_instance() -> JobCollection {
    [
        (3, 2, 1),
        (4, 1, 5),
        (2, 3, 2),
        (6, 5, 10),
        (11, 7, 13),
        (13, 11, 9),
    ]
    .into_iter()
    .zip(1..)
    .map(|((r, p, q), id)| Job::new(id, r, p, q))
    .collect()
}

/// Uniform random instance generator.
///
/// Draws `r` from `0..=max_release`, `p` from `1..=max_processing` and `q`
/// from `0..=max_delivery`. Ids run from 1 to `jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomInstance {
    /// Number of jobs.
    pub jobs: usize,
    /// Largest release time.
    pub max_release: Time,
    /// Largest processing time (at least 1).
    pub max_processing: Time,
    /// Largest delivery time.
    pub max_delivery: Time,
}

impl RandomInstance {
    /// Creates a generator for `jobs` jobs with default bounds.
    pub fn new(jobs: usize) -> Self {
        Self {
            jobs,
            max_release: 20,
            max_processing: 10,
            max_delivery: 20,
        }
    }

    pub fn with_max_release(mut self, max_release: Time) -> Self {
        self.max_release = max_release;
        self
    }

    pub fn with_max_processing(mut self, max_processing: Time) -> Self {
        self.max_processing = max_processing;
        self
    }

    pub fn with_max_delivery(mut self, max_delivery: Time) -> Self {
        self.max_delivery = max_delivery;
        self
    }

    /// Draws an instance.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> JobCollection {
        let max_release = self.max_release.max(0);
        let max_processing = self.max_processing.max(1);
        let max_delivery = self.max_delivery.max(0);

        (1..)
            .take(self.jobs)
            .map(|id: JobId| {
                Job::new(
                    id,
                    rng.random_range(0..=max_release),
                    rng.random_range(1..=max_processing),
                    rng.random_range(0..=max_delivery),
                )
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct JobRecord {
    #[serde(default)]
    id: Option<JobId>,
    #[serde(alias = "r")]
    release: Time,
    #[serde(alias = "p")]
    processing: Time,
    #[serde(alias = "q")]
    delivery: Time,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstanceFile {
    Jobs(Vec<JobRecord>),
    Wrapped { jobs: Vec<JobRecord> },
}

/// Parses an instance from JSON text.
///
/// Records without an `id` get their 1-based position.
pub fn from_json_str(text: &str) -> Result<JobCollection, InstanceError> {
    let records = match serde_json::from_str::<InstanceFile>(text)? {
        InstanceFile::Jobs(jobs) | InstanceFile::Wrapped { jobs } => jobs,
    };
    Ok(records
        .into_iter()
        .zip(1..)
        .map(|(rec, position)| {
            Job::new(
                rec.id.unwrap_or(position),
                rec.release,
                rec.processing,
                rec.delivery,
            )
        })
        .collect())
}

/// Reads an instance from a JSON file.
pub fn load_json(path: impl AsRef<Path>) -> Result<JobCollection, InstanceError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let jobs = from_json_str(&text)?;
    debug!(path = %path.display(), jobs = jobs.len(), "loaded instance");
    Ok(jobs)
}

/// Prompts for a job count, then `r`, `p`, `q` for every job.
///
/// Invalid entries (non-numeric, negative, `p <= 0`, zero jobs) are
/// reported on `output` and asked again.
pub fn read_interactive<R, W>(input: &mut R, output: &mut W) -> Result<JobCollection, InstanceError>
where
    R: BufRead,
    W: Write,
{
    let count: usize = prompt(
        input,
        output,
        "Number of jobs: ",
        |n: &usize| *n > 0,
        "a positive integer",
    )?;
    let mut jobs = JobCollection::with_capacity(count);

    for id in (1..).take(count) {
        writeln!(output, "\nJob {id}")?;
        let release: Time = prompt(
            input,
            output,
            "Release time: ",
            |r: &Time| *r >= 0,
            "a non-negative integer",
        )?;
        let processing: Time = prompt(
            input,
            output,
            "Processing time: ",
            |p: &Time| *p > 0,
            "a positive integer",
        )?;
        let delivery: Time = prompt(
            input,
            output,
            "Delivery time: ",
            |q: &Time| *q >= 0,
            "a non-negative integer",
        )?;
        jobs.push_back(Job::new(id, release, processing, delivery));
    }

    Ok(jobs)
}

fn prompt<T, R, W>(
    input: &mut R,
    output: &mut W,
    label: &str,
    accept: impl Fn(&T) -> bool,
    expected: &str,
) -> Result<T, InstanceError>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{label}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(InstanceError::UnexpectedEof(label.trim_end_matches(": ").to_string()));
        }
        match line.trim().parse::<T>() {
            Ok(value) if accept(&value) => return Ok(value),
            _ => writeln!(output, "expected {expected}, got '{}'", line.trim())?,
        }
    }
}
