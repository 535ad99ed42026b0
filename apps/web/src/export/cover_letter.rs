use crate::export::sanitize_filename;
use crate::models::analysis::AnalysisResult;

pub const EMPTY_COVER_LETTER: &str = "Cover letter content is empty or not yet generated.";

/// The cover letter text, or `None` when it is missing or blank.
pub fn cover_letter_text(result: &AnalysisResult) -> Option<&str> {
    result.cover_letter().filter(|text| !text.trim().is_empty())
}

pub fn file_name(result: &AnalysisResult) -> String {
    format!(
        "{}_Cover_Letter.txt",
        sanitize_filename(result.candidate_name().unwrap_or("Candidate"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_letter_is_missing() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "resume_tailoring": {"cover_letter": "  \n "}
        }))
        .unwrap();
        assert_eq!(cover_letter_text(&result), None);
        assert_eq!(cover_letter_text(&AnalysisResult::default()), None);
    }

    #[test]
    fn test_letter_and_file_name() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "candidate_info": {"name": "Grace"},
            "resume_tailoring": {"cover_letter": "Dear Hiring Manager,"}
        }))
        .unwrap();
        assert_eq!(cover_letter_text(&result), Some("Dear Hiring Manager,"));
        assert_eq!(file_name(&result), "Grace_Cover_Letter.txt");
        assert_eq!(file_name(&AnalysisResult::default()), "Candidate_Cover_Letter.txt");
    }
}
