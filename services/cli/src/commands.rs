use crate::render;
use chrono::{Local, Utc};
use clap::{Args, Subcommand, ValueEnum};
use finops_maturity::assessment::exchange::{build_export, import_answers, ExportMeta};
use finops_maturity::assessment::{Assessment, Model};
use finops_maturity::config::StorageConfig;
use finops_maturity::error::AppError;
use finops_maturity::storage::{LocalStore, SnapshotRecord};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Questionnaire model JSON file
    #[arg(long)]
    pub(crate) model: PathBuf,
    /// Answers file in either export shape (index-keyed or question-text)
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Capability keys to score; omit to score every capability
    #[arg(long, value_delimiter = ',')]
    pub(crate) select: Vec<String>,
    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Questionnaire model JSON file
    #[arg(long)]
    pub(crate) model: PathBuf,
    /// Answers file to export; omit for an empty answer set
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Capability keys to record as selected; omit for all
    #[arg(long, value_delimiter = ',')]
    pub(crate) select: Vec<String>,
    /// Customer name recorded in the export metadata
    #[arg(long, default_value = "")]
    pub(crate) customer: String,
    /// Assessor name recorded in the export metadata
    #[arg(long, default_value = "")]
    pub(crate) assessor: String,
    /// Assessment date (defaults to today)
    #[arg(long)]
    pub(crate) date: Option<String>,
    /// Destination file (defaults to stdout)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct MergeArgs {
    /// The freshly edited questionnaire model
    #[arg(long)]
    pub(crate) model: PathBuf,
    /// Answers exported against an earlier revision of the model
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Destination file for the re-keyed answers (defaults to stdout)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum SnapshotCommand {
    /// Persist the current model/answers/selection as a snapshot
    Save(SnapshotSaveArgs),
    /// List saved snapshots
    List,
    /// Delete one snapshot by id
    Delete {
        /// Snapshot id as shown by `snapshot list`
        id: String,
    },
}

#[derive(Args, Debug)]
pub(crate) struct SnapshotSaveArgs {
    #[arg(long)]
    pub(crate) model: PathBuf,
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    #[arg(long, value_delimiter = ',')]
    pub(crate) select: Vec<String>,
    #[arg(long, default_value = "")]
    pub(crate) customer: String,
    #[arg(long, default_value = "")]
    pub(crate) assessor: String,
    #[arg(long)]
    pub(crate) date: Option<String>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let session = build_session(&args.model, args.answers.as_deref(), &args.select)?;
    let report = session.report();

    match args.format {
        OutputFormat::Text => render::print_report(&report),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).map_err(io_err)?);
        }
        OutputFormat::Csv => {
            let csv = render::capability_csv(&report)?;
            print!("{csv}");
        }
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let session = build_session(&args.model, args.answers.as_deref(), &args.select)?;
    let meta = ExportMeta {
        date: args
            .date
            .unwrap_or_else(|| Local::now().date_naive().to_string()),
        customer: args.customer,
        assessor: args.assessor,
    };

    let payload = build_export(
        session.model(),
        session.selection(),
        session.answers(),
        meta,
        Utc::now(),
    );
    let rendered = serde_json::to_string_pretty(&payload).map_err(io_err)?;
    write_output(args.out.as_deref(), &rendered)
}

pub(crate) fn run_merge(args: MergeArgs) -> Result<(), AppError> {
    let model = load_model(&args.model)?;
    let raw = std::fs::read_to_string(&args.answers)?;
    let imported = import_answers(&raw, &model)?;

    tracing::info!(
        answered = imported.answers.answered_count(),
        "answers re-keyed against model version '{}'",
        model.version
    );

    let rendered = serde_json::to_string_pretty(&imported.answers).map_err(io_err)?;
    write_output(args.out.as_deref(), &rendered)
}

pub(crate) fn run_snapshot(
    command: SnapshotCommand,
    storage: &StorageConfig,
) -> Result<(), AppError> {
    let store = LocalStore::new(storage);

    match command {
        SnapshotCommand::Save(args) => {
            let session = build_session(&args.model, args.answers.as_deref(), &args.select)?;
            let meta = ExportMeta {
                date: args
                    .date
                    .unwrap_or_else(|| Local::now().date_naive().to_string()),
                customer: args.customer,
                assessor: args.assessor,
            };
            let record = SnapshotRecord::new(
                Utc::now(),
                session.model().version.clone(),
                session.selection().iter().cloned().collect(),
                session.answers().clone(),
                meta,
            );
            let id = record.id.clone();
            store.save_snapshot(record)?;
            println!("saved snapshot {id}");
        }
        SnapshotCommand::List => {
            let snapshots = store.load_snapshots()?;
            if snapshots.is_empty() {
                println!("no snapshots saved");
            }
            for snapshot in snapshots {
                println!(
                    "{}  {}  customer: {}  model: {}",
                    snapshot.id,
                    snapshot.timestamp.to_rfc3339(),
                    if snapshot.customer.is_empty() {
                        "-"
                    } else {
                        snapshot.customer.as_str()
                    },
                    if snapshot.version.is_empty() {
                        "-"
                    } else {
                        snapshot.version.as_str()
                    },
                );
            }
        }
        SnapshotCommand::Delete { id } => {
            store.delete_snapshot(&id)?;
            println!("deleted snapshot {id}");
        }
    }

    Ok(())
}

fn build_session(
    model_path: &Path,
    answers_path: Option<&Path>,
    select: &[String],
) -> Result<Assessment, AppError> {
    let model = load_model(model_path)?;
    let mut session = Assessment::new(model);

    if let Some(path) = answers_path {
        let raw = std::fs::read_to_string(path)?;
        let imported = import_answers(&raw, session.model())?;
        if let Some(selected) = imported.selected_caps {
            session.set_selection(selected);
        }
        session.replace_answers(imported.answers);
    }

    if !select.is_empty() {
        session.set_selection(select.iter().cloned());
    }

    Ok(session)
}

fn load_model(path: &Path) -> Result<Model, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(Model::from_json(&raw)?)
}

fn write_output(out: Option<&Path>, rendered: &str) -> Result<(), AppError> {
    match out {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "wrote output file");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn io_err<E>(err: E) -> AppError
where
    E: std::error::Error + Send + Sync + 'static,
{
    AppError::Io(std::io::Error::other(err))
}
