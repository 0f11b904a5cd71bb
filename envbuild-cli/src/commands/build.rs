//! `envbuild build` — render `.env.template` into `.env`.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use envbuild_sync::{pipeline, BuildReport, WriteResult};

use super::TargetArgs;

/// Arguments for `envbuild build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Render and report without writing .env.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the build report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct BuildReportJson<'a> {
    environment: &'a str,
    output_path: String,
    status: &'static str,
    parameter_count: usize,
    unresolved: &'a [String],
    unused: &'a [String],
}

impl BuildArgs {
    pub async fn run(self) -> Result<()> {
        let settings = self.target.settings()?.with_dry_run(self.dry_run);
        tracing::debug!("resolved settings: {:?}", settings);
        let store = self.target.store().await;

        let report = pipeline::run(&settings, &store)
            .await
            .with_context(|| format!("build failed for '{}'", settings.environment))?;

        if self.json {
            print_json(&report)?;
        } else {
            print_report(&report);
        }
        Ok(())
    }
}

fn write_status(write: &WriteResult) -> &'static str {
    match write {
        WriteResult::Written { .. } => "written",
        WriteResult::Unchanged { .. } => "unchanged",
        WriteResult::WouldWrite { .. } => "dry-run",
    }
}

fn report_json(report: &BuildReport) -> BuildReportJson<'_> {
    BuildReportJson {
        environment: report.environment.as_str(),
        output_path: report.write.path().display().to_string(),
        status: write_status(&report.write),
        parameter_count: report.parameter_count,
        unresolved: &report.unresolved,
        unused: &report.unused,
    }
}

fn print_json(report: &BuildReport) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&report_json(report)).context("failed to serialize build report JSON")?
    );
    Ok(())
}

fn print_report(report: &BuildReport) {
    let env = &report.environment;
    match &report.write {
        WriteResult::Written { path } => println!(
            "{} .env for \"{env}\" built from {} parameters → {}",
            "✓".green(),
            report.parameter_count,
            path.display()
        ),
        WriteResult::Unchanged { path } => println!(
            "{} .env for \"{env}\" already up to date ({})",
            "·".dimmed(),
            path.display()
        ),
        WriteResult::WouldWrite { path } => println!(
            "[dry-run] {} would write {} from {} parameters",
            "~".cyan(),
            path.display(),
            report.parameter_count
        ),
    }

    if !report.unresolved.is_empty() {
        println!(
            "  {} unresolved tokens left as-is: {}",
            "!".yellow(),
            report.unresolved.join(", ")
        );
    }
}
