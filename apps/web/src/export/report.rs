//! Full printable report as a Markdown document.

use serde_json::{Map, Value};

use crate::export::sanitize_filename;
use crate::models::analysis::AnalysisResult;

pub fn file_name(result: &AnalysisResult) -> String {
    format!(
        "Analysis_Report_{}.md",
        sanitize_filename(result.candidate_name().unwrap_or("Resume"))
    )
}

/// Renders every section of the payload. Known sections come first in a fixed
/// order; anything else the backend sent follows under its own heading.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut md = format!(
        "# Analysis Report: {}\n\n",
        result.candidate_name().unwrap_or("Candidate")
    );
    if let Some(title) = result.candidate_title() {
        md.push_str(&format!("_{title}_\n\n"));
    }
    if let Some(info) = &result.candidate_info {
        if let Some(persona) = &info.career_persona {
            md.push_str(&format!("- **Career Persona:** {persona}\n"));
        }
        if let Some(readiness) = info.readiness_score {
            md.push_str(&format!("- **Readiness:** {readiness}%\n"));
        }
        md.push('\n');
    }

    if let Some(ats) = &result.ats_analysis {
        md.push_str("## ATS Analysis\n\n");
        md.push_str(&format!(
            "- **Overall Score:** {}%\n",
            ats.overall_score.unwrap_or(0.0)
        ));
        for (key, value) in result.breakdown() {
            md.push_str(&format!("- **{}:** {value}%\n", title_case(key)));
        }
        md.push('\n');
        render_map(&mut md, &ats.extra, 3);
    }

    if let Some(review) = &result.recruiter_review {
        md.push_str("## Recruiter Review\n\n");
        md.push_str(&format!(
            "**Decision:** {}\n\n",
            result.decision().unwrap_or("N/A")
        ));
        if let Some(feedback) = &review.honest_feedback {
            md.push_str(feedback.trim());
            md.push_str("\n\n");
        }
        render_list(&mut md, "Critical Fail Points", &review.critical_fail_points);
        render_list(&mut md, "Key Strengths", &review.key_strengths);
        render_map(&mut md, &review.extra, 3);
    }

    let radar = result.skill_radar();
    if !radar.is_empty() {
        md.push_str("## Skill Radar\n\n");
        for (skill, value) in radar {
            md.push_str(&format!("- **{skill}:** {value}%\n"));
        }
        md.push('\n');
    }
    if let Some(insights) = &result.advanced_insights {
        render_map(&mut md, &insights.extra, 2);
    }

    if let Some(tailoring) = &result.resume_tailoring {
        md.push_str("## Resume Tailoring\n\n");
        render_map(&mut md, &tailoring.extra, 3);
        if let Some(letter) = result.cover_letter() {
            md.push_str("### Cover Letter\n\n");
            md.push_str(letter.trim());
            md.push_str("\n\n");
        }
    }

    render_map(&mut md, &result.extra, 2);
    md
}

fn render_list(md: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("### {heading}\n\n"));
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
    md.push('\n');
}

/// Each key becomes a heading at `level`; values are rendered recursively.
fn render_map(md: &mut String, map: &Map<String, Value>, level: usize) {
    for (key, value) in map {
        md.push_str(&format!("{} {}\n\n", "#".repeat(level.min(6)), title_case(key)));
        render_value(md, value, level + 1, 0);
        md.push('\n');
    }
}

fn render_value(md: &mut String, value: &Value, level: usize, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Null => {}
        Value::String(s) => {
            md.push_str(&format!("{pad}{}\n", s.trim()));
        }
        Value::Bool(_) | Value::Number(_) => {
            md.push_str(&format!("{pad}{value}\n"));
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(obj) => {
                        let line = obj
                            .iter()
                            .map(|(k, v)| format!("{}: {}", title_case(k), inline(v)))
                            .collect::<Vec<_>>()
                            .join("; ");
                        md.push_str(&format!("{pad}- {line}\n"));
                    }
                    other => md.push_str(&format!("{pad}- {}\n", inline(other))),
                }
            }
        }
        Value::Object(obj) => {
            if obj.values().all(is_scalar) {
                for (k, v) in obj {
                    md.push_str(&format!("{pad}- **{}:** {}\n", title_case(k), inline(v)));
                }
            } else {
                render_map(md, obj, level);
            }
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn inline(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items.iter().map(inline).collect::<Vec<_>>().join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn title_case(key: &str) -> String {
    key.replace('_', " ")
        .split_whitespace()
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().to_string() + c.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
