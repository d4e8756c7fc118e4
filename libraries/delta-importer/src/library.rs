//! Committing verified files into the library

use crate::staging::move_file;
use crate::{ImportError, ImportKind, Location};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Result of committing one batch
#[derive(Debug, Default)]
pub struct CommitResult {
    /// Paths of the files now in the library
    pub imported: Vec<PathBuf>,

    /// Set when some or all of the batch could not be saved
    pub failure: Option<ImportError>,
}

/// Library subdirectory for a kind of import
pub fn kind_directory(kind: ImportKind) -> &'static str {
    match kind {
        ImportKind::Games => "Games",
        ImportKind::ControllerSkins => "Controller Skins",
    }
}

/// Move `accepted` files out of staging into the library under `library_root`
///
/// A file that fails to save stays in staging.
/// All save failures of the batch are folded into a single `SaveFailed`.
/// If the destination cannot be created at all, the `SaveFailed` carries
/// every accepted location, which is none for an empty batch.
pub fn commit(kind: ImportKind, accepted: &BTreeSet<Location>, library_root: &Path) -> CommitResult {
    let destination = library_root.join(kind_directory(kind));

    if let Err(e) = fs::create_dir_all(&destination) {
        error!("Failed to create {}: {}", destination.display(), e);
        return CommitResult {
            imported: Vec::new(),
            failure: Some(ImportError::save_failed(accepted.iter().cloned(), e)),
        };
    }

    let mut result = CommitResult::default();
    let mut failed = BTreeSet::new();
    let mut last_cause = None;

    for location in accepted {
        let source = location.to_path_buf();
        let target = destination.join(location.display_name());

        match move_file(&source, &target) {
            Ok(()) => result.imported.push(target),
            Err(e) => {
                error!("Failed to save {}: {}", location, e);
                failed.insert(location.clone());
                last_cause = Some(e.to_string());
            }
        }
    }

    if let Some(cause) = last_cause {
        result.failure = Some(ImportError::SaveFailed(failed, cause));
    }

    info!(
        "Saved {} of {} file(s) to {}",
        result.imported.len(),
        accepted.len(),
        destination.display()
    );

    result
}
