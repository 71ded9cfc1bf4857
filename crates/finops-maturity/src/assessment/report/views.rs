use super::super::domain::{Lens, Tier};
use serde::Serialize;

/// Aggregate for one lens: summed contributions over the questions of that
/// lens that were actually answered. `pct` normalizes against answered
/// questions only, so unanswered questions never drag a lens down.
#[derive(Debug, Clone, Serialize)]
pub struct LensAggregateEntry {
    pub lens: Lens,
    pub lens_label: &'static str,
    pub sum: f64,
    pub answered: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CapabilityScore {
    pub key: String,
    pub name: String,
    pub report_group: String,
    /// Raw summed contributions, 0..=20 per question.
    pub total_20: f64,
    /// All-questions denominator, floored at 1 for zero-question capabilities.
    pub max_20: f64,
    pub score_100: f64,
    pub answered: usize,
    pub question_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lens_breakdown: Vec<LensAggregateEntry>,
}

/// Spider-chart point. Deliberately carries the raw total and maximum, not a
/// percentage: capabilities with more questions occupy more of the chart.
#[derive(Debug, Clone, Serialize)]
pub struct RadarPoint {
    pub name: String,
    pub total: f64,
    pub full_mark: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub capabilities: Vec<CapabilityScore>,
    pub lens_overview: Vec<LensAggregateEntry>,
    pub radar: Vec<RadarPoint>,
    pub overall_score_100: f64,
    pub tier: Tier,
    pub tier_label: &'static str,
}
