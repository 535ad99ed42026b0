//! Downloadable exports of the current result: share card, cover letter, report.
//!
//! Exports are single-shot. Each kind has a busy flag held for the duration of
//! one export and released on success and failure alike. Nothing is written to
//! disk; the bytes go straight into the response.

pub mod cover_letter;
pub mod handlers;
pub mod report;
pub mod share_card;

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("SVG parse failed: {0}")]
    Svg(String),

    #[error("Pixmap allocation failed for {width}x{height}")]
    Pixmap { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Export task failed: {0}")]
    Task(String),
}

impl ExportError {
    /// Message suitable for showing the user in a blocking notification.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::Svg(_) | ExportError::Pixmap { .. } | ExportError::Encode(_) => {
                "Error during share card generation. Please try again.".to_string()
            }
            ExportError::Task(_) => "Export failed. Please try again.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    ShareCard,
    CoverLetter,
    Report,
}

impl ExportKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::ShareCard => "share card",
            ExportKind::CoverLetter => "cover letter",
            ExportKind::Report => "report",
        }
    }
}

/// One busy flag per export kind.
#[derive(Debug, Default)]
pub struct ExportSlots {
    share_card: AtomicBool,
    cover_letter: AtomicBool,
    report: AtomicBool,
}

impl ExportSlots {
    /// Claims the slot for `kind`, or `None` if an export of that kind is in flight.
    pub fn try_acquire(&self, kind: ExportKind) -> Option<ExportGuard<'_>> {
        let flag = self.flag(kind);
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportGuard { flag })
    }

    #[cfg(test)]
    pub fn is_busy(&self, kind: ExportKind) -> bool {
        self.flag(kind).load(Ordering::Acquire)
    }

    fn flag(&self, kind: ExportKind) -> &AtomicBool {
        match kind {
            ExportKind::ShareCard => &self.share_card,
            ExportKind::CoverLetter => &self.cover_letter,
            ExportKind::Report => &self.report,
        }
    }
}

/// Releases its slot on drop.
pub struct ExportGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Makes a name safe for a `Content-Disposition` filename.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "Resume".to_string()
    } else {
        cleaned
    }
}
