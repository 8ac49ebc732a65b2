//! Bench command - runs model files through the pipeline and writes reports

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use futures::future::join_all;
use tracing::{info, warn};

use crate::api::AppState;
use crate::domain::model::is_accepted_extension;
use crate::domain::{DomainError, ModelStatus, ReportError};
use crate::infrastructure::services::{BenchmarkJob, RenderedReport};

/// Arguments for the bench command
#[derive(Args, Clone, Debug)]
pub struct BenchArgs {
    /// Model files to benchmark
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory for generated reports (overrides config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also write a comparison report of every completed model
    #[arg(long)]
    pub compare: bool,
}

/// Outcome of a bench run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BenchSummary {
    pub completed: usize,
    pub failed: usize,
    pub reports: Vec<PathBuf>,
}

/// Run the bench command
pub async fn run(args: BenchArgs) -> anyhow::Result<()> {
    let config = super::load_config()?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.reports.output_dir.clone());

    let state = crate::create_app_state_with_config(&config)?;
    let summary = bench_files(&state, &args.files, &output_dir, args.compare).await?;

    info!(
        completed = summary.completed,
        failed = summary.failed,
        reports = summary.reports.len(),
        output_dir = %output_dir.display(),
        "Benchmark run finished"
    );

    for report in &summary.reports {
        println!("{}", report.display());
    }

    Ok(())
}

/// Register every file, wait for all pipelines and write the reports
pub async fn bench_files(
    state: &AppState,
    files: &[PathBuf],
    output_dir: &Path,
    compare: bool,
) -> anyhow::Result<BenchSummary> {
    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?;

        if !is_accepted_extension(&name) {
            warn!(file = %path.display(), "Skipping file without a model extension");
            continue;
        }

        inputs.push((name, metadata.len()));
    }

    if inputs.is_empty() {
        anyhow::bail!("No model files to benchmark");
    }

    let mut jobs: Vec<BenchmarkJob> = Vec::with_capacity(inputs.len());
    for (name, size) in &inputs {
        jobs.push(state.benchmark_service.submit(name, *size).await?);
    }

    let ids = join_all(jobs.into_iter().map(BenchmarkJob::wait)).await;

    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut summary = BenchSummary::default();
    for id in &ids {
        let record = state.model_service.get_required(id.as_str()).await?;

        match record.status() {
            ModelStatus::Completed => {
                summary.completed += 1;
                let report = state.report_service.single_report(id.as_str()).await?;
                summary.reports.push(write_report(output_dir, &report).await?);
            }
            status => {
                summary.failed += 1;
                warn!(
                    model = record.name(),
                    status = %status,
                    error = record.error().unwrap_or_default(),
                    "Model did not complete"
                );
            }
        }
    }

    if compare {
        state.model_service.select_all().await;

        match state.report_service.comparison_report().await {
            Ok(report) => summary.reports.push(write_report(output_dir, &report).await?),
            Err(DomainError::Report(e @ ReportError::EmptySelection { .. })) => {
                warn!(error = %e, "Skipping comparison report");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(summary)
}

async fn write_report(output_dir: &Path, report: &RenderedReport) -> anyhow::Result<PathBuf> {
    let path = output_dir.join(&report.file_name);

    tokio::fs::write(&path, &report.content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), kind = report.kind.as_str(), "Wrote report");

    Ok(path)
}
