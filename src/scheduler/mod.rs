//! Single-machine scheduler and objective evaluation.
//!
//! # Algorithm
//!
//! `JacksonScheduler` is a non-delay list scheduler: whenever the machine is
//! free it runs the released job with the largest delivery time. It is a
//! heuristic for `1 | r_j | L_max`, exact when all release times are equal.
//!
//! # Objective
//!
//! `max_delivery_completion` returns `max(C_j + q_j)`; `ScheduleKpi` adds
//! makespan, idle time, flow and waiting statistics.
//!
//! # References
//!
//! - Jackson (1955), "Scheduling a production line to minimize maximum tardiness"
//! - Schrage (1971), "Obtaining optimal solutions to resource constrained network scheduling problems"

mod jackson;
mod objective;

pub use jackson::JacksonScheduler;
pub use objective::{max_delivery_completion, ScheduleKpi};
