//! Summary views over the history log. The stored payload is never rendered:
//! a historical entry only ever shows its summary fields.

use serde::Serialize;

use crate::models::history::HistoryEntry;

pub const EMPTY_MESSAGE: &str = "No history found. Analyze a resume to get started!";
pub const CLEARED_MESSAGE: &str = "History cleared.";
pub const FULL_REPORT_NOTICE: &str = "To view the full graphical report, please re-analyze the resume. History currently saves the key summary data.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryListItem {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub score: f64,
    pub decision: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryListView {
    pub entries: Vec<HistoryListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HistoryDetailView {
    #[serde(flatten)]
    pub summary: HistoryListItem,
    pub shortlisted: bool,
    pub notice: &'static str,
}

impl From<&HistoryEntry> for HistoryListItem {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            title: entry.title.clone(),
            score: entry.score,
            decision: entry.decision.clone(),
            timestamp: entry.timestamp.clone(),
        }
    }
}

pub fn list_view(entries: &[HistoryEntry]) -> HistoryListView {
    HistoryListView {
        entries: entries.iter().map(HistoryListItem::from).collect(),
        message: entries.is_empty().then_some(EMPTY_MESSAGE),
    }
}

pub fn detail_view(entry: &HistoryEntry) -> HistoryDetailView {
    HistoryDetailView {
        summary: HistoryListItem::from(entry),
        shortlisted: entry.decision == "Shortlisted",
        notice: FULL_REPORT_NOTICE,
    }
}
