use crate::commands::{
    run_export, run_merge, run_report, run_snapshot, ExportArgs, MergeArgs, ReportArgs,
    SnapshotCommand,
};
use clap::{Parser, Subcommand};
use finops_maturity::config::AppConfig;
use finops_maturity::error::AppError;
use finops_maturity::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "FinOps Maturity Assessment",
    about = "Score FinOps maturity questionnaires and manage assessment exports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a model against an answer set and print the report
    Report(ReportArgs),
    /// Build the canonical answers export payload
    Export(ExportArgs),
    /// Re-key an answers file against an edited model by question text
    Merge(MergeArgs),
    /// Manage locally persisted assessment snapshots
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommand,
    },
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Report(args) => run_report(args),
        Command::Export(args) => run_export(args),
        Command::Merge(args) => run_merge(args),
        Command::Snapshot { command } => run_snapshot(command, &config.storage),
    }
}
