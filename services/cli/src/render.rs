use finops_maturity::assessment::report::AssessmentReport;
use std::io;

/// Plain-text report for terminal use; mirrors the printable report layout.
pub(crate) fn print_report(report: &AssessmentReport) {
    println!(
        "Overall maturity: {:.1}%  tier: {}",
        report.overall_score_100, report.tier_label
    );

    println!("\nCapability scores");
    for capability in &report.capabilities {
        println!(
            "  {:<28} {:>6.1} / {:<6.0} ({:.1}%)  answered {}/{}",
            capability.name,
            capability.total_20,
            capability.max_20,
            capability.score_100,
            capability.answered,
            capability.question_count,
        );
        for entry in &capability.lens_breakdown {
            println!(
                "      {:<12} {:>5.1}% over {} answered",
                entry.lens_label, entry.pct, entry.answered
            );
        }
    }

    println!("\nLens overview (all capabilities in scope)");
    for entry in &report.lens_overview {
        println!(
            "  {:<12} {:>5.1}%  ({} answered)",
            entry.lens_label, entry.pct, entry.answered
        );
    }
}

/// Capability rows as CSV for spreadsheet import.
pub(crate) fn capability_csv(report: &AssessmentReport) -> Result<String, io::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "key",
            "name",
            "report_group",
            "total",
            "max",
            "score_pct",
            "answered",
            "questions",
        ])
        .map_err(io::Error::other)?;

    for capability in &report.capabilities {
        writer
            .write_record([
                capability.key.clone(),
                capability.name.clone(),
                capability.report_group.clone(),
                capability.total_20.to_string(),
                capability.max_20.to_string(),
                format!("{:.1}", capability.score_100),
                capability.answered.to_string(),
                capability.question_count.to_string(),
            ])
            .map_err(io::Error::other)?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(io::Error::other)?;
    String::from_utf8(bytes).map_err(io::Error::other)
}
