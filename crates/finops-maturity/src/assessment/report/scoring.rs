use super::super::answers::AnswerStore;
use super::super::domain::{Lens, Tier};
use super::super::model::{Capability, Model};
use super::views::{AssessmentReport, CapabilityScore, LensAggregateEntry, RadarPoint};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default, Clone, Copy)]
struct LensAccumulator {
    sum: f64,
    answered: usize,
}

impl LensAccumulator {
    fn record(&mut self, contribution: f64) {
        self.sum += contribution;
        self.answered += 1;
    }

    fn pct(&self) -> f64 {
        if self.answered == 0 {
            return 0.0;
        }
        (self.sum / (self.answered as f64 * 20.0)) * 100.0
    }
}

/// Scores the in-scope capabilities of a model against a sparse answer set.
///
/// An empty selection scores every capability. Answers that do not resolve
/// to a weight (unknown label, or a grade the question's table omits)
/// contribute zero to the capability total and are excluded from lens
/// answered counts; the capability denominator always covers every question
/// regardless of how many were answered.
pub fn score_assessment(
    model: &Model,
    selection: &BTreeSet<String>,
    answers: &AnswerStore,
) -> AssessmentReport {
    let in_scope: Vec<&Capability> = model
        .capabilities
        .iter()
        .filter(|capability| selection.is_empty() || selection.contains(&capability.key))
        .collect();

    let mut capabilities = Vec::with_capacity(in_scope.len());
    let mut radar = Vec::with_capacity(in_scope.len());
    let mut overview: BTreeMap<Lens, LensAccumulator> = BTreeMap::new();

    for capability in &in_scope {
        let mut total = 0.0;
        let mut answered = 0;
        let mut by_lens: BTreeMap<Lens, LensAccumulator> = BTreeMap::new();

        for (index, question) in capability.questions.iter().enumerate() {
            let contribution = answers
                .answer(&capability.key, index)
                .and_then(|label| question.weight_for(label));

            let Some(contribution) = contribution else {
                continue;
            };

            total += contribution;
            answered += 1;

            if let Some(lens) = question.lens {
                by_lens.entry(lens).or_default().record(contribution);
                overview.entry(lens).or_default().record(contribution);
            }
        }

        let question_count = capability.questions.len();
        // Floor of 1 keeps a zero-question capability at 0% instead of 0/0.
        let max = (question_count as f64 * 20.0).max(1.0);
        let score_100 = (total / max) * 100.0;

        let lens_breakdown = Lens::ordered()
            .into_iter()
            .filter_map(|lens| {
                by_lens.get(&lens).map(|accumulator| LensAggregateEntry {
                    lens,
                    lens_label: lens.label(),
                    sum: accumulator.sum,
                    answered: accumulator.answered,
                    pct: accumulator.pct(),
                })
            })
            .collect();

        radar.push(RadarPoint {
            name: capability.name.clone(),
            total,
            full_mark: max,
        });

        capabilities.push(CapabilityScore {
            key: capability.key.clone(),
            name: capability.name.clone(),
            report_group: capability.report_group.clone(),
            total_20: total,
            max_20: max,
            score_100,
            answered,
            question_count,
            lens_breakdown,
        });
    }

    // Unweighted mean: a two-question capability counts the same as a
    // twenty-question one.
    let overall_score_100 = if capabilities.is_empty() {
        0.0
    } else {
        capabilities
            .iter()
            .map(|capability| capability.score_100)
            .sum::<f64>()
            / capabilities.len() as f64
    };

    // Combined sums over combined answered counts, not a mean of
    // per-capability lens percentages.
    let lens_overview = Lens::ordered()
        .into_iter()
        .map(|lens| {
            let accumulator = overview.get(&lens).copied().unwrap_or_default();
            LensAggregateEntry {
                lens,
                lens_label: lens.label(),
                sum: accumulator.sum,
                answered: accumulator.answered,
                pct: accumulator.pct(),
            }
        })
        .collect();

    let tier = Tier::classify(overall_score_100);

    AssessmentReport {
        capabilities,
        lens_overview,
        radar,
        overall_score_100,
        tier,
        tier_label: tier.label(),
    }
}
