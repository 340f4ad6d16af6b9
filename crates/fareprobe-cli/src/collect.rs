//! The `collect` and `grid` command handlers.
//!
//! A collect run never aborts on a failed search: the engine logs and counts
//! failures, and whatever was extracted is still written out.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};

use fareprobe_core::{load_search_axes, AppConfig, ParameterGrid, ResourceKind, SearchAxes};
use fareprobe_scraper::{extractor_for, Engine, EngineConfig, LogProgress, SessionFactory};

use crate::export;

/// Number of requests listed by `--dry-run`.
const DRY_RUN_PREVIEW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    /// A handful of dates, for checking the pipeline end to end
    Debug,
    /// Every day of the bookable months
    Full,
}

/// Where the search axes come from. With neither flag set, the configured
/// search file is used when present, otherwise the debug preset.
#[derive(Debug, Args)]
pub(crate) struct AxesArgs {
    /// Use a built-in set of search axes
    #[arg(long, value_enum, conflicts_with = "axes")]
    pub preset: Option<Preset>,

    /// Load search axes from this YAML file
    #[arg(long)]
    pub axes: Option<PathBuf>,
}

/// Resolve the search axes for a run, returning them with a short
/// description of their source for log output.
pub(crate) fn resolve_axes(
    config: &AppConfig,
    selection: &AxesArgs,
) -> anyhow::Result<(SearchAxes, String)> {
    if let Some(preset) = selection.preset {
        let axes = match preset {
            Preset::Debug => SearchAxes::debug_preset(),
            Preset::Full => SearchAxes::full_preset(),
        };
        return Ok((axes, format!("{preset:?} preset").to_lowercase()));
    }

    if let Some(path) = &selection.axes {
        let axes = load_search_axes(path)
            .with_context(|| format!("failed to load search axes from {}", path.display()))?;
        return Ok((axes, path.display().to_string()));
    }

    if config.search_path.exists() {
        let axes = load_search_axes(&config.search_path).with_context(|| {
            format!(
                "failed to load search axes from {}",
                config.search_path.display()
            )
        })?;
        return Ok((axes, config.search_path.display().to_string()));
    }

    tracing::debug!(
        path = %config.search_path.display(),
        "search file not found, using debug preset"
    );
    Ok((SearchAxes::debug_preset(), "debug preset".to_string()))
}

pub(crate) fn default_output_path(config: &AppConfig, resource: ResourceKind) -> PathBuf {
    config.output_dir.join(format!("disney_{resource}.csv"))
}

/// Print the size of the search grid for `resource`.
///
/// # Errors
///
/// Returns an error if the axes cannot be loaded or fail validation.
pub(crate) fn print_grid(
    config: &AppConfig,
    resource: ResourceKind,
    selection: &AxesArgs,
) -> anyhow::Result<()> {
    let (axes, source) = resolve_axes(config, selection)?;
    let grid = ParameterGrid::new(resource, &axes)?;
    println!("{resource}: {} searches ({source})", grid.len());
    Ok(())
}

/// Run every search for `resource` through the worker pool and export the
/// merged records as CSV.
///
/// When `dry_run` is `true` the grid is printed and nothing is fetched.
///
/// # Errors
///
/// Returns an error if the axes are invalid, the session factory cannot be
/// built, or the CSV cannot be written. Individual search failures are
/// logged and counted, not propagated.
pub(crate) async fn run_collect(
    config: &AppConfig,
    resource: ResourceKind,
    selection: &AxesArgs,
    output: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let (axes, source) = resolve_axes(config, selection)?;
    let grid = ParameterGrid::new(resource, &axes)?;

    if dry_run {
        println!(
            "dry-run: would run {} {resource} searches ({source})",
            grid.len()
        );
        for request in grid.iter().take(DRY_RUN_PREVIEW) {
            println!("  {request}");
        }
        if grid.len() > DRY_RUN_PREVIEW {
            println!("  ... and {} more", grid.len() - DRY_RUN_PREVIEW);
        }
        return Ok(());
    }

    let output = output.map_or_else(|| default_output_path(config, resource), Path::to_path_buf);
    let sessions = SessionFactory::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build session factory: {e}"))?;
    let engine = Engine::new(
        sessions,
        extractor_for(resource),
        EngineConfig::from_app_config(config),
    );

    println!(
        "Collecting {resource}: {} searches from {source}, {} workers",
        grid.len(),
        engine.config().max_workers
    );

    let report = engine.run(&grid, &LogProgress).await;
    export::write_csv(&output, &report.records)?;

    let summary = &report.summary;
    println!("{} entries", report.records.len());
    println!(
        "{} searches: {} with results, {} empty, {} failed",
        summary.total, summary.with_results, summary.empty, summary.failed
    );
    if summary.pages_failed > 0 {
        println!("{} result pages could not be fetched", summary.pages_failed);
    }
    println!("Saved to {}", output.display());
    println!("Executed In: {:.2} seconds", summary.elapsed.as_secs_f64());
    Ok(())
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
