//! Per-run outcome reporting.
//!
//! Every processed item produces one [`Outcome`], collected into a
//! [`RunReport`]. This keeps failures machine-inspectable without changing
//! artifact behavior: degraded items still write an artifact, and only a
//! citation with no bibliographic match is skipped outright.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happened to one source item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Outcome {
    /// Artifact written cleanly
    Written { artifact: PathBuf },

    /// Artifact written, but acquisition or extraction reported a failure
    Degraded { artifact: PathBuf, error: String },

    /// No artifact produced (citation pipeline only)
    Skipped { reason: String },
}

/// One item's identity plus its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReport {
    /// The raw identifier of the item
    pub item: String,

    /// What happened to it
    pub outcome: Outcome,
}

/// All outcomes for one pipeline run, in processing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub items: Vec<ItemReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, item: impl Into<String>, outcome: Outcome) {
        self.items.push(ItemReport {
            item: item.into(),
            outcome,
        });
    }

    pub fn written(&self) -> usize {
        self.items
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Written { .. }))
            .count()
    }

    pub fn degraded(&self) -> usize {
        self.items
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Degraded { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.items
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Skipped { .. }))
            .count()
    }

    /// Fold another pipeline's report into this one
    pub fn merge(&mut self, other: RunReport) {
        self.items.extend(other.items);
    }
}
