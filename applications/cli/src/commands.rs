//! Command implementations

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use clap::ValueEnum;
use delta_importer::library::commit;
use delta_importer::source::{self, Confirm};
use delta_importer::sources::LegacyDirectoryImport;
use delta_importer::verify::{kind_for, verify_staged};
use delta_importer::{
    summarize, AggregatedReport, ImportError, ImportKind, ImportOutcome, Location, SkippedItem,
    StagedImport,
};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Kind selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Games,
    Skins,
}

impl From<KindArg> for ImportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Games => ImportKind::Games,
            KindArg::Skins => ImportKind::ControllerSkins,
        }
    }
}

/// Failure report for one kind of import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindReport {
    pub kind: ImportKind,
    #[serde(flatten)]
    pub report: AggregatedReport,
}

/// What an `import` run did
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportRun {
    Cancelled,
    Finished {
        imported: Vec<PathBuf>,
        skipped: Vec<SkippedItem>,
        reports: Vec<KindReport>,
    },
}

/// Build the shared-folder import source from configuration
pub fn legacy_source(config: &AppConfig, confirm: Arc<dyn Confirm>) -> LegacyDirectoryImport {
    LegacyDirectoryImport::new(
        config.legacy.directory.clone(),
        config.staging_area(),
        confirm,
    )
    .strategy(config.staging.strategy)
}

/// Stage everything in the shared folder
pub async fn scan(config: &AppConfig, confirm: Arc<dyn Confirm>) -> Result<ImportOutcome> {
    let source = Arc::new(legacy_source(config, confirm));
    source::spawn(source)
        .await
        .map_err(|_| AppError::SourceDropped)
}

/// Stage, verify and commit the shared folder's contents
///
/// When `kind` is `None`, skins are imported as controller skins and
/// everything else as games.
pub async fn import(
    config: &AppConfig,
    kind: Option<ImportKind>,
    confirm: Arc<dyn Confirm>,
) -> Result<ImportRun> {
    let Some(staged) = scan(config, confirm).await?.into_staged() else {
        info!("Import cancelled");
        return Ok(ImportRun::Cancelled);
    };

    let library_root = config.library.directory.clone();
    let run = tokio::task::spawn_blocking(move || process_staged(&library_root, kind, staged))
        .await
        .map_err(|_| AppError::SourceDropped)?;

    Ok(run)
}

/// Verify and commit staged files, producing at most one report per kind
pub fn process_staged(
    library_root: &Path,
    kind: Option<ImportKind>,
    staged: StagedImport,
) -> ImportRun {
    let forced = kind.is_some();
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => vec![ImportKind::Games, ImportKind::ControllerSkins],
    };

    let mut imported = Vec::new();
    let mut reports = Vec::new();
    // Failures of the scan itself are reported with the first kind
    let mut batch_errors = Some(staged.errors);

    for kind in kinds {
        let locations: Vec<&Location> = staged
            .staged
            .iter()
            .filter(|location| forced || kind_for(&location.to_path_buf()) == kind)
            .collect();

        let mut errors: HashSet<ImportError> = batch_errors.take().unwrap_or_default();
        if locations.is_empty() && errors.is_empty() {
            continue;
        }

        let verification = verify_staged(kind, locations);
        errors.extend(verification.errors);

        if !verification.accepted.is_empty() {
            let committed = commit(kind, &verification.accepted, library_root);
            imported.extend(committed.imported);
            errors.extend(committed.failure);
        }

        if !errors.is_empty() {
            reports.push(KindReport {
                kind,
                report: summarize(kind, &errors),
            });
        }
    }

    info!(
        "Imported {} file(s), {} report(s)",
        imported.len(),
        reports.len()
    );

    ImportRun::Finished {
        imported,
        skipped: staged.skipped,
        reports,
    }
}

/// Print the result of `scan`
pub fn print_outcome(outcome: &ImportOutcome) {
    let Some(staged) = outcome.staged() else {
        println!("Import cancelled.");
        return;
    };

    let mut names: Vec<&str> = staged.staged.iter().map(Location::as_str).collect();
    names.sort_unstable();

    println!("Staged {} file(s)", names.len());
    for name in names {
        println!("  {name}");
    }
    print_skipped(&staged.skipped);

    if !staged.errors.is_empty() {
        println!();
        println!("{}", summarize(ImportKind::Games, &staged.errors));
    }
}

/// Print the result of `import`, either for people or as JSON
pub fn print_run(run: &ImportRun, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(run)?);
        return Ok(());
    }

    match run {
        ImportRun::Cancelled => println!("Import cancelled."),
        ImportRun::Finished {
            imported,
            skipped,
            reports,
        } => {
            println!("Imported {} file(s)", imported.len());
            for path in imported {
                println!("  {}", path.display());
            }
            print_skipped(skipped);

            for kind_report in reports {
                println!();
                println!("{}", kind_report.report);
            }
        }
    }

    Ok(())
}

fn print_skipped(skipped: &[SkippedItem]) {
    if skipped.is_empty() {
        return;
    }

    println!("Skipped {} file(s)", skipped.len());
    for item in skipped {
        println!("  {}: {}", item.location, item.reason);
    }
}

/// Print the effective configuration
pub fn print_config(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
