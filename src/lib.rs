//! Single-machine scheduling with release and delivery times.
//!
//! Sequences jobs `(r, p, q)` on one machine to keep `max(C_j + q_j)` small,
//! using Jackson's heuristic: whenever the machine is free, run the released
//! job with the largest delivery time.
//!
//! # Modules
//!
//! - **`models`**: `Job`, `JobCollection`, the `JobStore` container trait
//! - **`dispatching`**: Dispatching rules and the rule engine that selects jobs
//! - **`scheduler`**: `JacksonScheduler`, objective evaluation, KPIs
//! - **`ordering`**: Delivery-time sort used as an optional pre-pass
//! - **`validation`**: Input integrity checks
//! - **`instance`**: Sample, random, JSON and interactive instance loaders
//! - **`report`**: Text rendering
//!
//! # Example
//!
//! ```
//! use jackson_schedule::models::{Job, JobCollection};
//! use jackson_schedule::scheduler::{max_delivery_completion, JacksonScheduler};
//!
//! let jobs: JobCollection = vec![Job::new(1, 0, 3, 2), Job::new(2, 1, 2, 9)].into();
//! let schedule = JacksonScheduler::new().schedule(jobs).unwrap();
//! assert_eq!(max_delivery_completion(&schedule).unwrap(), 14);
//! ```
//!
//! # References
//!
//! - Jackson (1955), "Scheduling a production line to minimize maximum tardiness"
//! - Carlier (1982), "The one-machine sequencing problem"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod instance;
pub mod models;
pub mod ordering;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
