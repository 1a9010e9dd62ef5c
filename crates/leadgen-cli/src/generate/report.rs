//! Console output for a run.
//!
//! With `--emit table` everything goes to stdout. With `--emit csv|json`
//! stdout is reserved for the artifact, so status lines move to stderr and
//! the preview table is skipped.

use std::fmt::Display;

use leadgen_core::FlatLeadRecord;

use super::Emit;

const BIO_WIDTH: usize = 40;

pub(super) struct Reporter {
    emit: Emit,
}

impl Reporter {
    pub(super) fn new(emit: Emit) -> Self {
        Self { emit }
    }

    pub(super) fn line(&self, message: impl Display) {
        if self.emit == Emit::Table {
            println!("{message}");
        } else {
            eprintln!("{message}");
        }
    }

    pub(super) fn links(&self, urls: &[String]) {
        self.line("Links used:");
        for url in urls {
            self.line(format_args!("  {url}"));
        }
    }

    pub(super) fn preview(&self, records: &[FlatLeadRecord]) {
        if self.emit != Emit::Table {
            self.line(format_args!("{} leads found", records.len()));
            return;
        }

        println!();
        println!("{}", preview_header());
        for record in records {
            println!("{}", preview_row(record));
        }
        println!();
        println!("{} leads found", records.len());
    }
}

fn preview_header() -> String {
    format!(
        "{:<24}{:<10}{:<8}{:<18}{:<42}URL",
        "USERNAME", "TYPE", "VOTES", "WHEN", "BIO"
    )
}

fn preview_row(record: &FlatLeadRecord) -> String {
    format!(
        "{:<24}{:<10}{:<8}{:<18}{:<42}{}",
        truncate(&record.username, 22),
        record.post_type,
        record.upvotes,
        truncate(&record.timestamp, 16),
        truncate(&record.bio, BIO_WIDTH),
        record.website_url
    )
}

/// Truncates to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() > max {
        format!(
            "{}...",
            single_line
                .chars()
                .take(max.saturating_sub(3))
                .collect::<String>()
        )
    } else {
        single_line
    }
}
