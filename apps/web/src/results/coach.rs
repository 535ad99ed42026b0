use serde::Serialize;

use crate::models::analysis::AnalysisResult;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoachTip {
    pub icon: &'static str,
    pub text: String,
}

/// Tips shown in the coach panel after a successful analysis.
pub fn coach_tips(result: &AnalysisResult) -> Vec<CoachTip> {
    let score = result.overall_score().unwrap_or(0.0);
    let mut tips = vec![
        CoachTip {
            icon: "bullseye",
            text: format!("Your score is {score}%. Target 85%+ for top-tier roles."),
        },
        CoachTip {
            icon: "wand-magic-sparkles",
            text: "Check the \"Tailoring\" tab for Google-style bullet points.".to_string(),
        },
        CoachTip {
            icon: "linkedin",
            text: "Use the \"Share to LinkedIn\" feature to boost your personal brand.".to_string(),
        },
    ];

    if let Some(issue) = result.first_fail_point() {
        tips.push(CoachTip {
            icon: "triangle-exclamation",
            text: format!("Top Issue: {issue}"),
        });
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_three_base_tips() {
        let result: AnalysisResult =
            serde_json::from_value(json!({"ats_analysis": {"overall_score": 64}})).unwrap();
        let tips = coach_tips(&result);
        assert_eq!(tips.len(), 3);
        assert_eq!(tips[0].text, "Your score is 64%. Target 85%+ for top-tier roles.");
    }

    #[test]
    fn test_top_issue_from_first_fail_point() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "ats_analysis": {"overall_score": 40},
            "recruiter_review": {"critical_fail_points": ["No metrics", "Typos"]}
        }))
        .unwrap();
        let tips = coach_tips(&result);
        assert_eq!(tips.len(), 4);
        assert_eq!(tips[3].text, "Top Issue: No metrics");
        assert_eq!(tips[3].icon, "triangle-exclamation");
    }
}
