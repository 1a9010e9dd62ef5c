//! `generate` command: runs the lead pipeline and exports the results.

mod export;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::Instrument;

use leadgen_core::{AppConfig, LeadSession, RunRequest};
use leadgen_gemini::ModelChoice;

use self::export::{export_artifacts, ExportOptions};
use self::pipeline::Pipeline;
use self::report::Reporter;

/// What to print on stdout once the run finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Human-readable progress and a preview table
    Table,
    /// The CSV export (progress goes to stderr)
    Csv,
    /// The JSON export (progress goes to stderr)
    Json,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Describe the kind of leads you are looking for
    #[arg(long, short = 'd')]
    pub description: String,

    /// Gemini model id, or "auto" to pick the best available one
    #[arg(long, default_value = "auto")]
    pub model: ModelChoice,

    /// Number of links to search
    #[arg(long, default_value_t = 3)]
    pub limit: u32,

    /// Where to save the CSV export
    #[arg(long, default_value = "leads.csv")]
    pub output: PathBuf,

    /// Also save the JSON export to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// What to print on stdout
    #[arg(long, value_enum, default_value_t = Emit::Table)]
    pub emit: Emit,
}

/// Run the lead pipeline once and export whatever it found.
///
/// # Errors
///
/// Returns an error if a credential or the description is missing, the
/// limit is out of range, the HTTP clients cannot be built, or query
/// compression fails. Empty search or extraction results are reported to
/// the user and are not errors; neither is a failure to save the CSV file.
pub(crate) async fn run_generate(config: &AppConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let mut session = LeadSession::from_config(
        config,
        RunRequest {
            description: args.description,
            limit: args.limit,
        },
    )?;
    let reporter = Reporter::new(args.emit);

    let run_id = session.run_id();
    let pipeline = Pipeline::new(config, session.credentials())?;
    pipeline
        .run(&mut session, &args.model)
        .instrument(tracing::info_span!("run", %run_id))
        .await?;

    let results = session.results();
    if let Some(model) = &results.model_id {
        reporter.line(format_args!("Using Gemini model: {model}"));
    }
    if let Some(topic) = &results.topic {
        reporter.line(format_args!("Searching for: {topic}"));
    }

    if results.urls.is_empty() {
        reporter.line("No relevant URLs found.");
        return Ok(());
    }
    reporter.links(&results.urls);

    let records = session.records();
    if records.is_empty() {
        reporter.line("No leads extracted from the discovered pages.");
        return Ok(());
    }
    reporter.preview(records);

    let outcome = export_artifacts(
        records,
        &ExportOptions {
            csv_path: &args.output,
            json_path: args.json_output.as_deref(),
            emit: args.emit,
        },
    )?;

    if outcome.csv_saved {
        reporter.line(format_args!("Saved CSV to {}", args.output.display()));
    }
    if let Some(path) = args.json_output.as_deref().filter(|_| outcome.json_saved) {
        reporter.line(format_args!("Saved JSON to {}", path.display()));
    }
    if let Some(artifact) = outcome.emitted {
        print!("{artifact}");
    }

    Ok(())
}
