mod scoring;
mod views;

pub use scoring::score_assessment;
pub use views::{AssessmentReport, CapabilityScore, LensAggregateEntry, RadarPoint};
