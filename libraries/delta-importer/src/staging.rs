//! Temporary staging area for files on their way into the library
//!
//! Every import source normalizes its output into plain files inside one
//! staging directory. Staging a file whose name is already present replaces
//! the stale copy; two sources staging the same name at the same time will
//! clobber each other.

use crate::{StageStrategy, StagingError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Directory name used under the system temporary directory
const DEFAULT_DIRECTORY_NAME: &str = "delta-import";

/// Suffix for files still being written
const PARTIAL_SUFFIX: &str = "partial";

/// Process-private directory that staged files are moved or copied into
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

impl Default for StagingArea {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join(DEFAULT_DIRECTORY_NAME))
    }
}

impl StagingArea {
    /// Create a staging area rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the staging directory if it does not exist yet
    pub fn ensure_exists(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Where `source` ends up once staged
    pub fn destination_for(&self, source: &Path) -> Result<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| StagingError::InvalidPath(source.to_path_buf()))?;
        Ok(self.root.join(file_name))
    }

    /// Bring `source` into the staging area, replacing any stale copy
    ///
    /// # Returns
    ///
    /// Path of the staged file
    pub fn stage(&self, source: &Path, strategy: StageStrategy) -> Result<PathBuf> {
        self.ensure_exists()?;

        let destination = self.destination_for(source)?;
        if destination == source {
            return Ok(destination);
        }

        remove_existing(&destination)?;

        match strategy {
            StageStrategy::Move => move_file(source, &destination)?,
            StageStrategy::Copy => {
                fs::copy(source, &destination)?;
            }
        }

        debug!(
            "Staged {} -> {} ({:?})",
            source.display(),
            destination.display(),
            strategy
        );

        Ok(destination)
    }

    /// A fresh, unused path in the staging area
    pub fn unique_path(&self, extension: &str) -> PathBuf {
        let name = Uuid::new_v4().to_string();
        if extension.is_empty() {
            self.root.join(name)
        } else {
            self.root.join(format!("{name}.{extension}"))
        }
    }

    /// Write `data` to a new unique file, so readers never see a partial file
    pub fn write_atomic(&self, data: &[u8], extension: &str) -> Result<PathBuf> {
        self.ensure_exists()?;

        let destination = self.unique_path(extension);
        let mut partial = destination.clone().into_os_string();
        partial.push(".");
        partial.push(PARTIAL_SUFFIX);
        let partial = PathBuf::from(partial);

        if let Err(e) = fs::write(&partial, data) {
            let _ = fs::remove_file(&partial);
            return Err(e.into());
        }
        finish_partial(&partial, &destination)?;

        Ok(destination)
    }
}

/// Publish a fully written partial file under its final name
fn finish_partial(partial: &Path, destination: &Path) -> io::Result<()> {
    fs::rename(partial, destination).map_err(|e| {
        let _ = fs::remove_file(partial);
        e
    })
}

fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Rename, falling back to copy + delete when the rename is refused
/// (for example across file systems)
///
/// On failure the file is left only at `source`.
pub(crate) fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    let Err(rename_error) = fs::rename(source, destination) else {
        return Ok(());
    };
    if !source.exists() {
        return Err(rename_error);
    }

    let copied = fs::copy(source, destination).and_then(|_| fs::remove_file(source));
    if let Err(e) = copied {
        let _ = fs::remove_file(destination);
        return Err(e);
    }
    Ok(())
}
