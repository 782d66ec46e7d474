use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::cycle::NewsCycle;
use super::report::CycleReport;

/// Runs a [`NewsCycle`], waits a fixed interval, repeats until cancelled.
///
/// The wait is measured from the end of one cycle to the start of the next,
/// without jitter. Cancellation is observed before each cycle and during the
/// wait; a cycle that has started always runs to completion.
pub struct Scheduler {
    cycle: NewsCycle,
    interval: Duration,
}

impl Scheduler {
    pub fn new(cycle: NewsCycle, interval: Duration) -> Self {
        Self { cycle, interval }
    }

    pub fn cycle(&self) -> &NewsCycle {
        &self.cycle
    }

    /// Single pass, used by `--once`
    pub async fn run_once(&self) -> CycleReport {
        self.cycle.run_once().await
    }

    /// Loop until `token` is cancelled; returns the number of cycles run
    pub async fn run(&self, token: CancellationToken) -> u64 {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Scheduler started"
        );

        let mut cycles = 0u64;
        while !token.is_cancelled() {
            let report = self.cycle.run_once().await;
            cycles += 1;
            if !report.issues.is_empty() {
                tracing::debug!(cycle = cycles, issues = report.issues.len(), "Cycle finished with issues");
            }

            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!(cycles, "Scheduler stopped");
        cycles
    }
}
