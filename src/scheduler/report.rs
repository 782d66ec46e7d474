use serde::Serialize;

use crate::error::AppError;

/// Where in the cycle a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStage {
    LoadStore,
    Fetch,
    SaveStore,
    Deliver,
}

impl std::fmt::Display for CycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CycleStage::LoadStore => "load_store",
            CycleStage::Fetch => "fetch",
            CycleStage::SaveStore => "save_store",
            CycleStage::Deliver => "deliver",
        };
        f.write_str(s)
    }
}

/// A failure that was logged and replaced with a safe default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleIssue {
    pub stage: CycleStage,
    pub kind: &'static str,
    pub message: String,
}

impl CycleIssue {
    pub fn from_error(stage: CycleStage, error: &AppError) -> Self {
        Self {
            stage,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Summary of one fetch → filter → persist → deliver pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Candidates returned by the feed
    pub fetched: usize,
    /// Candidates not yet in the store
    pub new_articles: usize,
    /// Whether the store file was rewritten
    pub store_written: bool,
    /// Delivery attempts made, successful or not
    pub attempted: usize,
    pub delivered: usize,
    pub issues: Vec<CycleIssue>,
}

impl CycleReport {
    pub fn failed_deliveries(&self) -> usize {
        self.attempted - self.delivered
    }

    pub fn issues_at(&self, stage: CycleStage) -> impl Iterator<Item = &CycleIssue> {
        self.issues.iter().filter(move |i| i.stage == stage)
    }
}
