//! Cycle driver and the fixed-interval loop around it

mod cycle;
mod report;
mod runner;
mod signal;

pub use cycle::NewsCycle;
pub use report::{CycleIssue, CycleReport, CycleStage};
pub use runner::Scheduler;
pub use signal::shutdown_signal;
