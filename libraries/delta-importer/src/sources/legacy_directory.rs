//! Import of files dropped into the app's shared folder (iTunes file sharing)

use crate::game_type::is_importable_file;
use crate::source::{Confirm, ImportSource};
use crate::{
    ImportError, ImportOutcome, Location, SkippedItem, StageStrategy, StagedImport, StagingArea,
};
use async_trait::async_trait;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const TITLE: &str = "iTunes";
const CONFIRM_TITLE: &str = "Import from iTunes?";
const CONFIRM_MESSAGE: &str =
    "Delta will import the games and controller skins copied over via iTunes.";

/// Picks up games, skins and archives from a shared folder after confirmation
pub struct LegacyDirectoryImport {
    directory: PathBuf,
    staging: StagingArea,
    strategy: StageStrategy,
    confirm: Arc<dyn Confirm>,
}

impl LegacyDirectoryImport {
    pub fn new(
        directory: impl Into<PathBuf>,
        staging: StagingArea,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            directory: directory.into(),
            staging,
            strategy: StageStrategy::default(),
            confirm,
        }
    }

    /// Set whether files are moved (default) or copied into staging
    pub fn strategy(mut self, strategy: StageStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl ImportSource for LegacyDirectoryImport {
    fn title(&self) -> &str {
        TITLE
    }

    async fn import(&self) -> ImportOutcome {
        if !self.confirm.confirm(CONFIRM_TITLE, CONFIRM_MESSAGE).await {
            debug!("Import from {} declined", self.directory.display());
            return ImportOutcome::Cancelled;
        }

        let directory = self.directory.clone();
        let staging = self.staging.clone();
        let strategy = self.strategy;

        match tokio::task::spawn_blocking(move || scan_and_stage(&directory, &staging, strategy))
            .await
        {
            Ok(staged) => ImportOutcome::Completed(staged),
            Err(e) => {
                warn!("Scan of {} aborted: {}", self.directory.display(), e);
                let mut staged = StagedImport::new();
                staged
                    .errors
                    .insert(ImportError::unknown(Location::from_path(&self.directory), e));
                ImportOutcome::Completed(staged)
            }
        }
    }
}

/// Stage every importable file directly inside `directory`
///
/// A missing directory means there is nothing to import. Any other failure
/// to read the directory is reported in `errors`. Files that fail to stage
/// are left out and listed in `skipped`.
pub fn scan_and_stage(
    directory: &Path,
    staging: &StagingArea,
    strategy: StageStrategy,
) -> StagedImport {
    let mut result = StagedImport::new();

    let candidates = match find_importable_files(directory, &mut result.skipped) {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("Failed to scan {}: {}", directory.display(), e);
            result.errors.insert(e);
            return result;
        }
    };

    for path in candidates {
        match staging.stage(&path, strategy) {
            Ok(staged) => {
                result.staged.insert(Location::from_path(&staged));
            }
            Err(e) => {
                warn!("Error importing file at {}: {}", path.display(), e);
                result
                    .skipped
                    .push(SkippedItem::new(Location::from_path(&path), e));
            }
        }
    }

    info!(
        "Staged {} file(s) from {} ({} skipped)",
        result.staged.len(),
        directory.display(),
        result.skipped.len()
    );

    result
}

/// List the importable, non-hidden files directly inside `directory`, sorted
///
/// Entries that cannot be read, and files whose names are not valid UTF-8,
/// are recorded in `skipped` and left where they are.
pub fn find_importable_files(
    directory: &Path,
    skipped: &mut Vec<SkippedItem>,
) -> std::result::Result<Vec<PathBuf>, ImportError> {
    let location = Location::from_path(directory);

    match fs::metadata(directory) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => return Err(ImportError::unknown(location, "not a directory")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist, nothing to import", directory.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(ImportError::unknown(location, e)),
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if e.depth() == 0 {
                    return Err(ImportError::unknown(location, e));
                }
                let entry_location = e
                    .path()
                    .map_or_else(|| location.clone(), Location::from_path);
                warn!("Failed to read {}: {}", entry_location, e);
                skipped.push(SkippedItem::new(entry_location, &e));
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || is_hidden(path) || !is_importable_file(path) {
            continue;
        }

        // Locations are UTF-8; a lossy name would not lead back to the file
        if path.to_str().is_none() {
            let entry_location = Location::from_path(path);
            warn!("Skipping {}: file name is not valid UTF-8", entry_location);
            skipped.push(SkippedItem::new(
                entry_location,
                "file name is not valid UTF-8",
            ));
            continue;
        }

        files.push(entry.into_path());
    }

    files.sort();
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_skips_hidden_and_unknown_files() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("game.nes"), b"rom").unwrap();
        fs::write(base.join(".hidden.nes"), b"rom").unwrap();
        fs::write(base.join("notes.txt"), b"text").unwrap();
        fs::create_dir(base.join("folder.zip")).unwrap();

        let mut skipped = Vec::new();
        let files = find_importable_files(base, &mut skipped).unwrap();

        assert_eq!(files, vec![base.join("game.nes")]);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_find_ignores_nested_directories() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.gba"), b"rom").unwrap();

        let mut skipped = Vec::new();
        let files = find_importable_files(temp.path(), &mut skipped).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let staging = StagingArea::new(temp.path().join("staging"));

        let result = scan_and_stage(&temp.path().join("missing"), &staging, StageStrategy::Move);

        assert!(result.staged.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_file_instead_of_directory_is_reported() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        fs::write(&file, b"x").unwrap();
        let staging = StagingArea::new(temp.path().join("staging"));

        let result = scan_and_stage(&file, &staging, StageStrategy::Move);

        assert_eq!(result.errors.len(), 1);
        let error = result.errors.iter().next().unwrap();
        let expected = Location::from_path(&file);
        assert!(matches!(error, ImportError::Unknown(location, _) if *location == expected));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_skipped_and_left_in_place() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared");
        fs::create_dir(&shared).unwrap();
        let original = shared.join(OsStr::from_bytes(b"Mario\xff.nes"));
        fs::write(&original, b"rom").unwrap();
        fs::write(shared.join("Zelda.nes"), b"rom").unwrap();

        let staging = StagingArea::new(temp.path().join("staging"));
        let result = scan_and_stage(&shared, &staging, StageStrategy::Move);

        assert_eq!(result.staged.len(), 1);
        assert!(result
            .staged
            .iter()
            .all(|location| location.to_path_buf().exists()));
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].location, Location::from_path(&original));
        assert!(result.errors.is_empty());
        assert!(original.exists());
    }
}
