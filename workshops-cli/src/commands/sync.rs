//! `workshops [--skip-existing]`: provision and sync every workshop repository.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use workshops_core::{config, SyncConfig};
use workshops_sync::{batch, BatchSummary, RecordOutcome, RecordReport};

use crate::clients::{github::GithubClient, sheets::SheetsClient};
use crate::console::ConsoleConfirm;
use crate::credentials;

/// Arguments for a sync run.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Leave repositories that already exist untouched instead of asking
    /// whether to update them.
    #[arg(long)]
    pub skip_existing: bool,

    /// Config file (defaults to ~/.workshops/config.yaml when present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit the per-record report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let config = self.load_config()?;
        let cwd = std::env::current_dir().context("could not determine working directory")?;

        let sheets = SheetsClient::new(credentials::sheets_token(&cwd)?);
        let rows = sheets
            .fetch_rows(&config.spreadsheet_id, &config.range)
            .with_context(|| format!("failed to read {} from the coordination sheet", config.range))?;
        if rows.is_empty() {
            if self.json {
                println!("{}", report_json(&[])?);
            } else {
                println!("No data found.");
            }
            return Ok(());
        }

        let github = GithubClient::new(credentials::github_token()?);
        let reports = batch::run(
            &rows,
            &config,
            &github,
            &mut ConsoleConfirm,
            self.skip_existing,
        )
        .context("failed to start sync")?;

        if self.json {
            println!("{}", report_json(&reports)?);
        } else {
            print_table(&reports);
        }
        Ok(())
    }

    fn load_config(&self) -> Result<SyncConfig> {
        match &self.config {
            Some(path) => config::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => config::load().context("failed to load ~/.workshops/config.yaml"),
        }
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RecordJson {
    acronym: String,
    outcome: &'static str,
    repository: Option<String>,
    updated_files: Vec<String>,
    detail: String,
}

#[derive(Tabled)]
struct RecordTableRow {
    #[tabled(rename = "workshop")]
    acronym: String,
    #[tabled(rename = "outcome")]
    outcome: String,
    #[tabled(rename = "repository")]
    repository: String,
    #[tabled(rename = "detail")]
    detail: String,
}

fn repository(outcome: &RecordOutcome) -> Option<String> {
    match outcome {
        RecordOutcome::Created { repository, .. } | RecordOutcome::Updated { repository, .. } => {
            Some(repository.to_string())
        }
        _ => None,
    }
}

fn updated_files(outcome: &RecordOutcome) -> Vec<String> {
    outcome
        .writes()
        .iter()
        .filter(|w| w.is_update())
        .map(|w| w.path().to_string())
        .collect()
}

fn detail(outcome: &RecordOutcome) -> String {
    match outcome {
        RecordOutcome::Created { .. } | RecordOutcome::Updated { .. } => {
            let files = updated_files(outcome);
            if files.is_empty() {
                "no file changes".to_string()
            } else {
                format!("wrote {}", files.join(", "))
            }
        }
        RecordOutcome::Skipped { reason } => reason.to_string(),
        RecordOutcome::Failed { error } => error.to_string(),
    }
}

fn outcome_label(outcome: &RecordOutcome) -> String {
    let label = outcome.label().to_uppercase();
    match outcome {
        RecordOutcome::Created { .. } => label.green().bold().to_string(),
        RecordOutcome::Updated { .. } => label.cyan().bold().to_string(),
        RecordOutcome::Skipped { .. } => label.yellow().to_string(),
        RecordOutcome::Failed { .. } => label.red().bold().to_string(),
    }
}

fn report_json(reports: &[RecordReport]) -> Result<String> {
    let payload: Vec<RecordJson> = reports
        .iter()
        .map(|r| RecordJson {
            acronym: r.acronym.clone(),
            outcome: r.outcome.label(),
            repository: repository(&r.outcome),
            updated_files: updated_files(&r.outcome),
            detail: detail(&r.outcome),
        })
        .collect();
    serde_json::to_string_pretty(&payload).context("failed to serialize report JSON")
}

fn print_table(reports: &[RecordReport]) {
    let summary = BatchSummary::from_reports(reports);
    println!(
        "Workshops v{} | {} created | {} updated | {} skipped | {} failed",
        env!("CARGO_PKG_VERSION"),
        summary.created,
        summary.updated,
        summary.skipped,
        summary.failed,
    );

    let rows: Vec<RecordTableRow> = reports
        .iter()
        .map(|r| RecordTableRow {
            acronym: r.acronym.clone(),
            outcome: outcome_label(&r.outcome),
            repository: repository(&r.outcome).unwrap_or_default(),
            detail: detail(&r.outcome),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if summary.failed > 0 {
        println!("Fix the failed rows and rerun; unchanged files are not rewritten.");
    }
}
