//! Bounded, persisted history log of analysis results.
//!
//! The log is one JSON array under `HISTORY_KEY`, newest first, never longer
//! than `MAX_HISTORY`. Storage failures never reach callers: a failed read is
//! an empty log, a failed write is logged and dropped.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::models::analysis::AnalysisResult;
use crate::models::history::HistoryEntry;
use crate::storage::KeyValueStore;

pub const HISTORY_KEY: &str = "resumeAnalyzerHistory";
pub const MAX_HISTORY: usize = 10;

/// Local time rendered like a browser's default `toLocaleString`.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

pub struct HistoryStore {
    storage: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write of the log.
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Records a result at the head of the log. Payloads without an ATS
    /// analysis (error payloads included) leave the log untouched.
    pub fn record(&self, result: &AnalysisResult) {
        self.record_at(result, Local::now());
    }

    pub(crate) fn record_at(&self, result: &AnalysisResult, now: DateTime<Local>) {
        if !result.has_ats_analysis() {
            debug!("Skipping history record: payload has no ATS analysis");
            return;
        }

        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut log = self.load();
        let id = next_id(&log, now.timestamp_millis());
        let entry = HistoryEntry::from_result(id, now.format(TIMESTAMP_FORMAT).to_string(), result);

        log.insert(0, entry);
        log.truncate(MAX_HISTORY);

        match serde_json::to_string(&log) {
            Ok(json) => match self.storage.set(HISTORY_KEY, &json) {
                Ok(()) => info!("Recorded history entry {id} ({} stored)", log.len()),
                Err(e) => warn!("History write failed, entry {id} not persisted: {e}"),
            },
            Err(e) => warn!("History serialization failed, entry {id} not persisted: {e}"),
        }
    }

    /// The persisted log, newest first. Missing, unreadable or corrupt storage
    /// reads as empty.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.load()
    }

    pub fn find(&self, id: i64) -> Option<HistoryEntry> {
        self.load().into_iter().find(|entry| entry.id == id)
    }

    /// Drops the whole log. Irreversible; callers are responsible for having
    /// obtained the user's confirmation.
    pub fn clear(&self) {
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match self.storage.remove(HISTORY_KEY) {
            Ok(()) => info!("History cleared"),
            Err(e) => warn!("History clear failed: {e}"),
        }
    }

    fn load(&self) -> Vec<HistoryEntry> {
        let raw = match self.storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("History read failed, treating as empty: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(log) => log,
            Err(e) => {
                warn!("History record is corrupt, treating as empty: {e}");
                Vec::new()
            }
        }
    }
}

/// Clock time in ms, bumped past the current head so ids stay unique and
/// strictly increasing even when two records land in the same millisecond.
fn next_id(log: &[HistoryEntry], now_ms: i64) -> i64 {
    match log.first() {
        Some(head) if head.id >= now_ms => head.id + 1,
        _ => now_ms,
    }
}
