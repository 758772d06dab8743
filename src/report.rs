//! Run summaries and exit status.
//!
//! A run succeeds when at least one record was accepted and the store did
//! not fail, or when a deletion completed. Skipped records are warnings, not
//! errors: a partially valid file still imports what is valid.

use crate::error::SeedError;
use crate::import::{ImportFailure, ImportOutcome};
use seed_core::RejectedRecord;
use seed_sink::SinkError;
use std::process::ExitCode;

/// Process exit status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    pub fn code(&self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// One line of console output.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryLine {
    Info(String),
    Warn(String),
    Error(String),
}

/// Console output and exit status of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub lines: Vec<SummaryLine>,
    pub status: ExitStatus,
}

impl RunSummary {
    /// Print to the console: info on stdout, warnings and errors on stderr.
    pub fn print(&self) {
        for line in &self.lines {
            match line {
                SummaryLine::Info(message) => println!("{message}"),
                SummaryLine::Warn(message) => eprintln!("Warning: {message}"),
                SummaryLine::Error(message) => eprintln!("Error: {message}"),
            }
        }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            SummaryLine::Warn(message) => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            SummaryLine::Error(message) => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status == ExitStatus::Success
    }
}

/// Summarize an import.
pub fn summarize(outcome: &ImportOutcome) -> RunSummary {
    let mut lines: Vec<SummaryLine> = outcome
        .rejected
        .iter()
        .map(|rejected| SummaryLine::Warn(skipped_entry(rejected)))
        .collect();

    let status = match &outcome.failure {
        None if outcome.accepted > 0 => {
            if outcome.dry_run {
                lines.push(SummaryLine::Info(format!(
                    "Validated {} of {} item(s); dry run, nothing written.",
                    outcome.accepted, outcome.total
                )));
            } else {
                lines.push(SummaryLine::Info(format!(
                    "Successfully imported {} item(s).",
                    outcome.inserted
                )));
            }
            ExitStatus::Success
        }
        None | Some(ImportFailure::NoValidRecords) => {
            lines.push(SummaryLine::Error(
                "Error importing data: No valid data to import.".to_string(),
            ));
            ExitStatus::Failure
        }
        Some(ImportFailure::Store(e)) => {
            lines.push(SummaryLine::Error(format!("Error importing data: {e}")));
            if outcome.inserted > 0 {
                lines.push(SummaryLine::Warn(format!(
                    "{} document(s) written before the failure.",
                    outcome.inserted
                )));
            }
            ExitStatus::Failure
        }
    };

    if outcome.skipped() > 0 {
        lines.push(SummaryLine::Warn(format!(
            "Skipped {} invalid item(s).",
            outcome.skipped()
        )));
    }

    RunSummary { lines, status }
}

/// Summarize a deletion.
pub fn summarize_delete(result: &Result<u64, SinkError>) -> RunSummary {
    match result {
        Ok(deleted) => RunSummary {
            lines: vec![SummaryLine::Info(format!("Deleted {deleted} document(s)."))],
            status: ExitStatus::Success,
        },
        Err(e) => RunSummary {
            lines: vec![SummaryLine::Error(format!("Failed to delete data: {e}"))],
            status: ExitStatus::Failure,
        },
    }
}

/// Summarize a run that stopped before reaching the store.
pub fn summarize_error(error: &SeedError) -> RunSummary {
    RunSummary {
        lines: vec![SummaryLine::Error(error.to_string())],
        status: ExitStatus::Failure,
    }
}

fn skipped_entry(rejected: &RejectedRecord) -> String {
    format!(
        "Skipping invalid entry #{}: {}; reason: {}",
        rejected.position(),
        rejected.raw,
        rejected.violations.join("; ")
    )
}
