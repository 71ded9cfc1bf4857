use finops_maturity::assessment::domain::{Lens, Tier};
use finops_maturity::assessment::report::score_assessment;
use finops_maturity::assessment::{AnswerStore, Assessment, Model};
use serde_json::json;
use std::collections::BTreeSet;

fn full_weight_table() -> serde_json::Value {
    json!({ "Pre-crawl": 0, "Crawl": 5, "Walk": 10, "Run": 15, "Fly": 20 })
}

fn assessment_model() -> Model {
    Model::from_value(json!({
        "version": "2025.1",
        "capabilities": [
            {
                "key": "allocation",
                "name": "Allocation",
                "report_group": "Understanding",
                "questions": [
                    { "text": "Is spend tagged to owners?", "lens": "Process",
                      "scores": full_weight_table() },
                    { "text": "Is showback automated?", "lens": "Automation",
                      "scores": full_weight_table() }
                ]
            },
            {
                "key": "forecasting",
                "name": "Forecasting",
                "report_group": "Quantify",
                "questions": [
                    { "text": "Are forecasts reviewed monthly?", "lens": "Process",
                      "scores": full_weight_table() },
                    { "text": "Do teams know their forecast?", "lens": "Knowledge",
                      "scores": full_weight_table() },
                    { "text": "Untagged lens question",
                      "scores": full_weight_table() }
                ]
            },
            {
                "key": "empty-capability",
                "name": "Empty Capability",
                "questions": []
            }
        ]
    }))
    .expect("scoring fixture model")
}

fn all_keys(model: &Model) -> BTreeSet<String> {
    model.capability_keys().into_iter().collect()
}

#[test]
fn empty_answer_set_scores_zero_everywhere() {
    let model = assessment_model();
    let report = score_assessment(&model, &all_keys(&model), &AnswerStore::new());

    for capability in &report.capabilities {
        assert_eq!(capability.score_100, 0.0);
        assert_eq!(capability.total_20, 0.0);
    }
    assert_eq!(report.overall_score_100, 0.0);
    assert_eq!(report.tier, Tier::PreCrawl);
}

#[test]
fn all_top_grades_score_one_hundred() {
    let model = Model::from_value(json!({
        "capabilities": [
            { "key": "a", "name": "A", "questions": [
                { "text": "q1", "scores": full_weight_table() },
                { "text": "q2", "scores": full_weight_table() }
            ]},
            { "key": "b", "name": "B", "questions": [
                { "text": "q1", "scores": full_weight_table() }
            ]}
        ]
    }))
    .expect("top-grade model");

    let mut answers = AnswerStore::new();
    answers.set("a", 0, "Fly");
    answers.set("a", 1, "Fly");
    answers.set("b", 0, "Fly");

    let report = score_assessment(&model, &all_keys(&model), &answers);
    for capability in &report.capabilities {
        assert_eq!(capability.score_100, 100.0);
    }
    assert_eq!(report.overall_score_100, 100.0);
    assert_eq!(report.tier, Tier::Fly);
}

#[test]
fn allocation_scenario_matches_hand_computed_totals() {
    let model = assessment_model();
    let mut answers = AnswerStore::new();
    answers.set("allocation", 0, "Run");
    answers.set("allocation", 1, "Fly");

    let selection: BTreeSet<String> = ["allocation".to_string()].into();
    let report = score_assessment(&model, &selection, &answers);

    assert_eq!(report.capabilities.len(), 1);
    let allocation = &report.capabilities[0];
    assert_eq!(allocation.total_20, 35.0);
    assert_eq!(allocation.max_20, 40.0);
    assert_eq!(allocation.score_100, 87.5);
}

#[test]
fn capability_scores_stay_in_range_under_sparse_and_malformed_answers() {
    let model = assessment_model();
    let mut answers = AnswerStore::new();
    answers.set("allocation", 0, "Fly");
    answers.set("allocation", 7, "Fly"); // index the model lacks, inert
    answers.set("forecasting", 0, "Hyperdrive"); // unrecognized label
    answers.set("ghost-capability", 0, "Fly"); // capability the model lacks

    let report = score_assessment(&model, &all_keys(&model), &answers);
    for capability in &report.capabilities {
        assert!(capability.score_100 >= 0.0 && capability.score_100 <= 100.0);
    }
    assert!(report.overall_score_100 >= 0.0 && report.overall_score_100 <= 100.0);
}

#[test]
fn capability_denominator_counts_all_questions_but_lens_counts_answered_only() {
    let model = assessment_model();
    let mut answers = AnswerStore::new();
    // One of forecasting's two Process/Knowledge questions answered at full
    // weight; the other two questions left blank.
    answers.set("forecasting", 0, "Fly");

    let selection: BTreeSet<String> = ["forecasting".to_string()].into();
    let report = score_assessment(&model, &selection, &answers);

    let forecasting = &report.capabilities[0];
    // Capability normalizes against all three questions.
    assert_eq!(forecasting.max_20, 60.0);
    assert!((forecasting.score_100 - 33.333_333).abs() < 0.001);

    // The Process lens normalizes against the one answered question only.
    let process = forecasting
        .lens_breakdown
        .iter()
        .find(|entry| entry.lens == Lens::Process)
        .expect("process lens entry");
    assert_eq!(process.answered, 1);
    assert_eq!(process.pct, 100.0);
}

#[test]
fn unanswered_lenses_report_zero_not_nan() {
    let model = assessment_model();
    let report = score_assessment(&model, &all_keys(&model), &AnswerStore::new());

    assert_eq!(report.lens_overview.len(), 5);
    for entry in &report.lens_overview {
        assert_eq!(entry.answered, 0);
        assert_eq!(entry.pct, 0.0);
        assert!(!entry.pct.is_nan());
    }
}

#[test]
fn overall_is_an_unweighted_mean_of_capability_percentages() {
    let model = Model::from_value(json!({
        "capabilities": [
            { "key": "empty", "name": "Empty", "questions": [] },
            { "key": "half", "name": "Half", "questions": [
                { "text": "q1", "scores": full_weight_table() },
                { "text": "q2", "scores": full_weight_table() }
            ]}
        ]
    }))
    .expect("mean fixture model");

    let mut answers = AnswerStore::new();
    answers.set("half", 0, "Fly");
    // Second question unanswered: capability lands at 50%.

    let report = score_assessment(&model, &all_keys(&model), &answers);
    assert_eq!(report.capabilities[0].score_100, 0.0);
    assert_eq!(report.capabilities[1].score_100, 50.0);
    // Mean of {0, 50}, not weighted by question counts.
    assert_eq!(report.overall_score_100, 25.0);
}

#[test]
fn lens_overview_combines_sums_not_percentages() {
    let model = Model::from_value(json!({
        "capabilities": [
            { "key": "a", "name": "A", "questions": [
                { "text": "q1", "lens": "Process", "scores": full_weight_table() }
            ]},
            { "key": "b", "name": "B", "questions": [
                { "text": "q1", "lens": "Process", "scores": full_weight_table() },
                { "text": "q2", "lens": "Process", "scores": full_weight_table() },
                { "text": "q3", "lens": "Process", "scores": full_weight_table() }
            ]}
        ]
    }))
    .expect("overview fixture model");

    let mut answers = AnswerStore::new();
    answers.set("a", 0, "Fly"); // 20 of 20 in capability a
    answers.set("b", 0, "Pre-crawl"); // 0 of 20 each in capability b
    answers.set("b", 1, "Pre-crawl");
    answers.set("b", 2, "Pre-crawl");

    let report = score_assessment(&model, &all_keys(&model), &answers);
    let process = report
        .lens_overview
        .iter()
        .find(|entry| entry.lens == Lens::Process)
        .expect("process overview entry");

    // Combined 20 over 4 answered questions = 25%. A mean of per-capability
    // percentages would report 50%.
    assert_eq!(process.answered, 4);
    assert_eq!(process.pct, 25.0);
}

#[test]
fn radar_points_carry_raw_totals_not_percentages() {
    let model = assessment_model();
    let mut answers = AnswerStore::new();
    answers.set("allocation", 0, "Run");
    answers.set("allocation", 1, "Fly");

    let report = score_assessment(&model, &all_keys(&model), &answers);

    let allocation = report
        .radar
        .iter()
        .find(|point| point.name == "Allocation")
        .expect("allocation radar point");
    assert_eq!(allocation.total, 35.0);
    assert_eq!(allocation.full_mark, 40.0);

    let forecasting = report
        .radar
        .iter()
        .find(|point| point.name == "Forecasting")
        .expect("forecasting radar point");
    assert_eq!(forecasting.full_mark, 60.0);
}

#[test]
fn zero_question_capability_scores_zero_with_guarded_denominator() {
    let model = assessment_model();
    let selection: BTreeSet<String> = ["empty-capability".to_string()].into();
    let report = score_assessment(&model, &selection, &AnswerStore::new());

    let empty = &report.capabilities[0];
    assert_eq!(empty.total_20, 0.0);
    assert_eq!(empty.max_20, 1.0);
    assert_eq!(empty.score_100, 0.0);
}

#[test]
fn unresolvable_grades_score_zero_and_skip_lens_counts() {
    let model = assessment_model();
    let mut answers = AnswerStore::new();
    answers.set("allocation", 0, "Hyperdrive");
    answers.set("allocation", 1, "Fly");

    let selection: BTreeSet<String> = ["allocation".to_string()].into();
    let report = score_assessment(&model, &selection, &answers);

    let allocation = &report.capabilities[0];
    assert_eq!(allocation.total_20, 20.0);
    assert_eq!(allocation.answered, 1);

    // The Process question holds the unrecognized label, so that lens has no
    // answered questions and no breakdown entry; Automation is at 100%.
    assert!(allocation
        .lens_breakdown
        .iter()
        .all(|entry| entry.lens != Lens::Process));
    let automation = allocation
        .lens_breakdown
        .iter()
        .find(|entry| entry.lens == Lens::Automation)
        .expect("automation entry");
    assert_eq!(automation.pct, 100.0);
}

#[test]
fn session_reports_follow_selection_changes() {
    let mut session = Assessment::new(assessment_model());
    session.set_answer("allocation", 0, "Run");
    session.set_answer("allocation", 1, "Fly");

    session.set_selection(vec!["allocation".to_string()]);
    let report = session.report();
    assert_eq!(report.capabilities.len(), 1);
    assert_eq!(report.overall_score_100, 87.5);
    assert_eq!(report.tier, Tier::Fly);

    session.set_selection(Vec::new());
    let report = session.report();
    assert_eq!(report.capabilities.len(), 3, "empty selection scores all");
}
