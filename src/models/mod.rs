//! Single-machine scheduling domain models.
//!
//! # Notation
//!
//! | Symbol | Field | Meaning |
//! |--------|-------|---------|
//! | r_j | `release` | Earliest start |
//! | p_j | `processing` | Machine time |
//! | q_j | `delivery` | Tail after finishing |
//! | C_j | `finish` | Completion on the machine |
//!
//! Times are plain integers; the consumer decides the unit.

mod collection;
mod job;

pub use collection::{Entries, IntoIter, Iter, JobCollection, JobStore, NodeId};
pub use job::{Interval, Job};

/// Stable job label, assigned at creation.
pub type JobId = u32;

/// Simulated time.
pub type Time = i64;
