use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error code the analysis backend sends when its model quota or API key is exhausted.
pub const QUOTA_EXHAUSTED_CODE: &str = "RESOURCE_EXHAUSTED";

/// Payload handed over by the analysis backend for one analysis request.
///
/// Only the fields the presentation layer reads are typed; everything else is
/// carried in `extra`. The payload exactly as received is kept alongside and
/// is what serialization writes back, so stored copies stay verbatim.
///
/// Typed fields are read leniently: a `null` or a value of the wrong type
/// yields the field's default instead of rejecting the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Value", into = "Value")]
pub struct AnalysisResult {
    pub candidate_info: Option<CandidateInfo>,
    pub ats_analysis: Option<AtsAnalysis>,
    pub recruiter_review: Option<RecruiterReview>,
    pub advanced_insights: Option<AdvancedInsights>,
    pub resume_tailoring: Option<ResumeTailoring>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub extra: Map<String, Value>,
    raw: Value,
}

#[derive(Default, Deserialize)]
struct PayloadFields {
    #[serde(default, deserialize_with = "lenient")]
    candidate_info: Option<CandidateInfo>,
    #[serde(default, deserialize_with = "lenient")]
    ats_analysis: Option<AtsAnalysis>,
    #[serde(default, deserialize_with = "lenient")]
    recruiter_review: Option<RecruiterReview>,
    #[serde(default, deserialize_with = "lenient")]
    advanced_insights: Option<AdvancedInsights>,
    #[serde(default, deserialize_with = "lenient")]
    resume_tailoring: Option<ResumeTailoring>,
    #[serde(default, deserialize_with = "lenient")]
    error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    message: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CandidateInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub career_persona: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub readiness_score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AtsAnalysis {
    #[serde(default, deserialize_with = "lenient")]
    pub overall_score: Option<f64>,
    /// Category key → percentage, in the order the backend sent them.
    #[serde(default, deserialize_with = "lenient")]
    pub breakdown: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RecruiterReview {
    #[serde(default, deserialize_with = "lenient")]
    pub decision: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub critical_fail_points: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub honest_feedback: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub key_strengths: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AdvancedInsights {
    /// Skill name → percentage, in the order the backend sent them.
    #[serde(default, deserialize_with = "lenient")]
    pub skill_radar: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ResumeTailoring {
    #[serde(default, deserialize_with = "lenient")]
    pub cover_letter: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads any JSON value and falls back to `T::default()` when it does not fit.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl From<Value> for AnalysisResult {
    fn from(raw: Value) -> Self {
        let fields: PayloadFields = serde_json::from_value(raw.clone()).unwrap_or_default();
        Self {
            candidate_info: fields.candidate_info,
            ats_analysis: fields.ats_analysis,
            recruiter_review: fields.recruiter_review,
            advanced_insights: fields.advanced_insights,
            resume_tailoring: fields.resume_tailoring,
            error: fields.error,
            message: fields.message,
            extra: fields.extra,
            raw,
        }
    }
}

impl From<AnalysisResult> for Value {
    fn from(result: AnalysisResult) -> Self {
        result.raw
    }
}

impl AnalysisResult {
    /// The payload exactly as the backend sent it.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn has_ats_analysis(&self) -> bool {
        self.ats_analysis.is_some()
    }

    pub fn is_quota_exhausted(&self) -> bool {
        self.error.as_deref() == Some(QUOTA_EXHAUSTED_CODE)
    }

    /// Candidate name, treating an empty string as absent.
    pub fn candidate_name(&self) -> Option<&str> {
        self.candidate_info
            .as_ref()
            .and_then(|c| non_empty(c.name.as_deref()))
    }

    pub fn candidate_title(&self) -> Option<&str> {
        self.candidate_info
            .as_ref()
            .and_then(|c| non_empty(c.title.as_deref()))
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.ats_analysis.as_ref().and_then(|a| a.overall_score)
    }

    pub fn readiness_score(&self) -> Option<f64> {
        self.candidate_info.as_ref().and_then(|c| c.readiness_score)
    }

    pub fn decision(&self) -> Option<&str> {
        self.recruiter_review
            .as_ref()
            .and_then(|r| non_empty(r.decision.as_deref()))
    }

    pub fn first_fail_point(&self) -> Option<&str> {
        self.recruiter_review
            .as_ref()
            .and_then(|r| r.critical_fail_points.first())
            .map(String::as_str)
    }

    pub fn cover_letter(&self) -> Option<&str> {
        self.resume_tailoring
            .as_ref()
            .and_then(|t| t.cover_letter.as_deref())
    }

    /// Numeric breakdown entries; non-numeric values are skipped.
    pub fn breakdown(&self) -> Vec<(&str, f64)> {
        self.ats_analysis
            .as_ref()
            .map(|a| numeric_entries(&a.breakdown))
            .unwrap_or_default()
    }

    pub fn skill_radar(&self) -> Vec<(&str, f64)> {
        self.advanced_insights
            .as_ref()
            .map(|a| numeric_entries(&a.skill_radar))
            .unwrap_or_default()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn numeric_entries(map: &Map<String, Value>) -> Vec<(&str, f64)> {
    map.iter()
        .filter_map(|(k, v)| v.as_f64().map(|n| (k.as_str(), n)))
        .collect()
}
