use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::analysis::AnalysisResult;

pub const DEFAULT_NAME: &str = "Unknown";
pub const DEFAULT_TITLE: &str = "N/A";
pub const DEFAULT_DECISION: &str = "N/A";

/// One persisted history record. Never mutated after it is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Creation time in epoch milliseconds; doubles as identity.
    pub id: i64,
    pub name: String,
    pub title: String,
    pub score: f64,
    pub decision: String,
    /// Human-readable local creation time.
    pub timestamp: String,
    /// The full payload as received.
    pub data: Value,
}

impl HistoryEntry {
    /// Builds an entry, filling absent summary fields with their defaults.
    pub fn from_result(id: i64, timestamp: String, result: &AnalysisResult) -> Self {
        Self {
            id,
            name: result.candidate_name().unwrap_or(DEFAULT_NAME).to_string(),
            title: result.candidate_title().unwrap_or(DEFAULT_TITLE).to_string(),
            score: result.overall_score().unwrap_or(0.0),
            decision: result.decision().unwrap_or(DEFAULT_DECISION).to_string(),
            timestamp,
            data: result.raw().clone(),
        }
    }
}
