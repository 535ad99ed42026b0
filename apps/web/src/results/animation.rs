//! Numbers the results page animates towards. Timing is advisory; only the
//! end states matter.

use serde::Serialize;

use crate::models::analysis::AnalysisResult;

/// Circumference of the main score ring.
pub const SCORE_RING_CIRCUMFERENCE: f64 = 565.0;
/// Circumference of the small radar and readiness circles.
pub const SMALL_RING_CIRCUMFERENCE: f64 = 283.0;
pub const COUNTER_DURATION_MS: u64 = 1500;
pub const COUNTER_TICK_MS: u64 = 16;
pub const CONFETTI_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RingOffset {
    pub label: String,
    pub value: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnimationPlan {
    pub score: f64,
    pub score_ring_offset: f64,
    pub counter_increment: f64,
    pub counter_tick_ms: u64,
    /// Value shown on each tick; the last one is the score.
    pub counter_steps: Vec<u32>,
    pub confetti: bool,
    pub breakdown_bars: Vec<(String, f64)>,
    pub skill_radar: Vec<RingOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness_offset: Option<f64>,
}

pub fn ring_offset(circumference: f64, percent: f64) -> f64 {
    circumference - circumference * percent / 100.0
}

/// Counter values displayed on each tick until the target is reached.
fn counter_steps(target: f64) -> Vec<u32> {
    if target <= 0.0 {
        return vec![0];
    }
    let increment = counter_increment(target);
    let mut current = 0.0;
    let mut steps = Vec::new();
    loop {
        current += increment;
        if current >= target {
            steps.push(target.round() as u32);
            return steps;
        }
        steps.push(current.round() as u32);
    }
}

fn counter_increment(target: f64) -> f64 {
    target / (COUNTER_DURATION_MS as f64 / COUNTER_TICK_MS as f64)
}

pub fn animation_plan(result: &AnalysisResult) -> AnimationPlan {
    let score = result.overall_score().unwrap_or(0.0);
    AnimationPlan {
        score,
        score_ring_offset: ring_offset(SCORE_RING_CIRCUMFERENCE, score),
        counter_increment: counter_increment(score),
        counter_tick_ms: COUNTER_TICK_MS,
        counter_steps: counter_steps(score),
        confetti: score >= CONFETTI_THRESHOLD,
        breakdown_bars: result
            .breakdown()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        skill_radar: result
            .skill_radar()
            .into_iter()
            .map(|(label, value)| RingOffset {
                label: label.to_string(),
                value,
                offset: ring_offset(SMALL_RING_CIRCUMFERENCE, value),
            })
            .collect(),
        readiness_offset: result
            .readiness_score()
            .map(|r| ring_offset(SMALL_RING_CIRCUMFERENCE, r)),
    }
}
