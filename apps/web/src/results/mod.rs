//! Inbound payload handling.
//!
//! Each payload the analysis backend hands over is classified into exactly one
//! view. Only a payload carrying an ATS analysis touches the history log; the
//! quota signal gets its own prompt because recovery means supplying a key,
//! not retrying.

pub mod animation;
pub mod coach;
pub mod handlers;

use std::sync::RwLock;

use serde::Serialize;
use tracing::{info, warn};

use crate::history::HistoryStore;
use crate::loader::LoaderManager;
use crate::models::analysis::AnalysisResult;
use crate::results::animation::{animation_plan, AnimationPlan};
use crate::results::coach::{coach_tips, CoachTip};

pub const QUOTA_PROMPT_MESSAGE: &str = "The system's API key is invalid, expired, or quota exhausted. Please provide your own Gemini API Key to continue.";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ResultsView {
    Results(ResultsPage),
    QuotaPrompt {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        existing_filename: Option<String>,
    },
    Failure {
        message: String,
    },
    Empty,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultsPage {
    pub name: Option<String>,
    pub title: Option<String>,
    pub score: f64,
    pub decision: Option<String>,
    pub coach_tips: Vec<CoachTip>,
    pub animation: AnimationPlan,
}

/// Pure classification of a payload; no side effects.
pub fn classify(result: &AnalysisResult, existing_filename: Option<String>) -> ResultsView {
    if result.is_quota_exhausted() {
        return ResultsView::QuotaPrompt {
            message: result
                .message
                .clone()
                .unwrap_or_else(|| QUOTA_PROMPT_MESSAGE.to_string()),
            existing_filename,
        };
    }
    if let Some(error) = &result.error {
        return ResultsView::Failure {
            message: error.clone(),
        };
    }
    if !result.has_ats_analysis() {
        return ResultsView::Empty;
    }
    ResultsView::Results(ResultsPage {
        name: result.candidate_name().map(str::to_string),
        title: result.candidate_title().map(str::to_string),
        score: result.overall_score().unwrap_or(0.0),
        decision: result.decision().map(str::to_string),
        coach_tips: coach_tips(result),
        animation: animation_plan(result),
    })
}

/// The result currently on screen; exports read from here.
#[derive(Default)]
pub struct CurrentResult {
    inner: RwLock<Option<AnalysisResult>>,
}

impl CurrentResult {
    pub fn get(&self) -> Option<AnalysisResult> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, value: Option<AnalysisResult>) {
        match self.inner.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

/// Applies a payload: classifies it and performs the side effects of the
/// chosen view. Any payload ends the loading session.
pub fn ingest(
    result: AnalysisResult,
    existing_filename: Option<String>,
    history: &HistoryStore,
    loader: &LoaderManager,
    current: &CurrentResult,
) -> ResultsView {
    loader.stop();
    let view = classify(&result, existing_filename);
    match &view {
        ResultsView::Results(page) => {
            history.record(&result);
            info!(
                "Analysis result received: score={} decision={}",
                page.score,
                page.decision.as_deref().unwrap_or("N/A")
            );
            current.replace(Some(result));
        }
        ResultsView::QuotaPrompt { .. } => {
            warn!("Analysis backend reported quota exhaustion; prompting for credentials");
            current.replace(None);
        }
        ResultsView::Failure { message } => {
            warn!("Analysis backend reported an error: {message}");
            current.replace(None);
        }
        ResultsView::Empty => current.replace(None),
    }
    view
}
