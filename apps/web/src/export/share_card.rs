//! Share card: a small branded image summarizing one result.
//!
//! The card is laid out as SVG and rasterized to PNG at 2× scale.

use std::fmt::Write as _;

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use tracing::debug;

use crate::export::{sanitize_filename, ExportError};
use crate::models::analysis::AnalysisResult;

const CARD_WIDTH: u32 = 600;
const CARD_HEIGHT: u32 = 315;
const SCALE: f32 = 2.0;
const BACKGROUND: &str = "#050510";
const RING_RADIUS: f64 = 70.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ShareCard {
    pub name: String,
    pub title: String,
    pub score: f64,
    pub decision: String,
}

impl ShareCard {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            name: result.candidate_name().unwrap_or("Name").to_string(),
            title: result.candidate_title().unwrap_or("Title").to_string(),
            score: result.overall_score().unwrap_or(0.0),
            decision: result.decision().unwrap_or("N/A").to_string(),
        }
    }
}

pub fn file_name(result: &AnalysisResult) -> String {
    format!(
        "{}_ShareCard.png",
        sanitize_filename(result.candidate_name().unwrap_or("Resume"))
    )
}

pub fn render_svg(card: &ShareCard) -> String {
    let circumference = 2.0 * std::f64::consts::PI * RING_RADIUS;
    let filled = circumference * card.score.clamp(0.0, 100.0) / 100.0;
    let decision_color = if card.decision == "Shortlisted" {
        "#22c55e"
    } else {
        "#f59e0b"
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{CARD_WIDTH}' height='{CARD_HEIGHT}' viewBox='0 0 {CARD_WIDTH} {CARD_HEIGHT}'>"
    );
    let _ = writeln!(
        svg,
        "  <rect width='{CARD_WIDTH}' height='{CARD_HEIGHT}' rx='24' fill='{BACKGROUND}'/>"
    );
    let _ = writeln!(
        svg,
        "  <rect x='0' y='0' width='{CARD_WIDTH}' height='6' fill='#6366f1'/>"
    );
    let _ = writeln!(
        svg,
        "  <text x='32' y='72' fill='#f5f7fb' font-family='Inter, Segoe UI, sans-serif' font-size='30' font-weight='700'>{}</text>",
        escape_text(&card.name)
    );
    let _ = writeln!(
        svg,
        "  <text x='32' y='108' fill='rgba(245,247,251,0.65)' font-family='Inter, Segoe UI, sans-serif' font-size='18'>{}</text>",
        escape_text(&card.title)
    );
    let _ = writeln!(
        svg,
        "  <text x='32' y='250' fill='{decision_color}' font-family='Inter, Segoe UI, sans-serif' font-size='24' font-weight='700'>{}</text>",
        escape_text(&card.decision)
    );

    let _ = writeln!(svg, "  <g transform='translate(470 160)'>");
    let _ = writeln!(
        svg,
        "    <circle r='{RING_RADIUS}' fill='none' stroke='rgba(255,255,255,0.12)' stroke-width='14'/>"
    );
    let _ = writeln!(
        svg,
        "    <circle r='{RING_RADIUS}' fill='none' stroke='#6366f1' stroke-width='14' stroke-linecap='round' stroke-dasharray='{filled:.2} {circumference:.2}' transform='rotate(-90)'/>"
    );
    let _ = writeln!(
        svg,
        "    <text y='12' text-anchor='middle' fill='#f5f7fb' font-family='Inter, Segoe UI, sans-serif' font-size='36' font-weight='700'>{}</text>",
        card.score.round()
    );
    let _ = writeln!(
        svg,
        "    <text y='40' text-anchor='middle' fill='rgba(245,247,251,0.55)' font-family='Inter, Segoe UI, sans-serif' font-size='13'>ATS SCORE</text>"
    );
    let _ = writeln!(svg, "  </g>");
    let _ = writeln!(svg, "</svg>");
    svg
}

/// Rasterizes the card. CPU-bound; call from a blocking task.
pub fn render_png(card: &ShareCard) -> Result<Vec<u8>, ExportError> {
    let svg = render_svg(card);

    let mut options = Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = Tree::from_data(svg.as_bytes(), &options)
        .map_err(|err| ExportError::Svg(format!("{err:?}")))?;

    let width = (CARD_WIDTH as f32 * SCALE) as u32;
    let height = (CARD_HEIGHT as f32 * SCALE) as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Pixmap { width, height })?;
    resvg::render(&tree, Transform::from_scale(SCALE, SCALE), &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|err| ExportError::Encode(err.to_string()))?;
    debug!("Share card rendered: {width}x{height}, {} bytes", png.len());
    Ok(png)
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
