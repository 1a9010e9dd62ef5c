//! Writes a run's records to disk and renders the stdout artifact.
//!
//! File writes are best-effort: a failed save is reported and the run goes
//! on, so the in-memory CSV/JSON artifacts are still produced.

use std::path::Path;

use leadgen_core::{render_csv, render_json, save_csv, FlatLeadRecord};

use super::Emit;

pub(super) struct ExportOptions<'a> {
    pub csv_path: &'a Path,
    pub json_path: Option<&'a Path>,
    pub emit: Emit,
}

#[derive(Debug)]
pub(super) struct ExportOutcome {
    pub csv_saved: bool,
    pub json_saved: bool,
    /// Artifact to print on stdout, if one was requested.
    pub emitted: Option<String>,
}

/// Saves the CSV (and optional JSON) files and renders the requested artifact.
///
/// # Errors
///
/// Returns an error only if rendering an in-memory artifact fails.
pub(super) fn export_artifacts(
    records: &[FlatLeadRecord],
    options: &ExportOptions<'_>,
) -> anyhow::Result<ExportOutcome> {
    let csv_saved = match save_csv(options.csv_path, records) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(path = %options.csv_path.display(), error = %e, "failed to save CSV");
            eprintln!("error: failed to save CSV: {e}");
            false
        }
    };

    let json_saved = match options.json_path {
        Some(path) => match write_json(path, records) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to save JSON");
                eprintln!("error: failed to save JSON to {}: {e}", path.display());
                false
            }
        },
        None => false,
    };

    let emitted = match options.emit {
        Emit::Table => None,
        Emit::Csv => Some(render_csv(records)?),
        Emit::Json => Some(format!("{}\n", render_json(records)?)),
    };

    Ok(ExportOutcome {
        csv_saved,
        json_saved,
        emitted,
    })
}

fn write_json(path: &Path, records: &[FlatLeadRecord]) -> anyhow::Result<()> {
    let json = render_json(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
