//! Common types for the importer

use crate::error::ImportError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque identifier for a file being imported (a path or URI).
///
/// Equality and hashing are by identifier, never by file content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Last path component, as shown to the user.
    ///
    /// Falls back to the whole identifier when it has no usable component.
    pub fn display_name(&self) -> &str {
        let is_separator = |c: char| c == '/' || c == '\\';
        self.0
            .trim_end_matches(is_separator)
            .rsplit(is_separator)
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Self::from_path(path)
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Self::from_path(&path)
    }
}

/// What is being imported. Only selects the wording of reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Games,
    ControllerSkins,
}

/// How files are brought into the staging area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StageStrategy {
    /// Move files out of their source folder
    #[default]
    Move,

    /// Copy files, leaving the originals in place
    Copy,
}

/// An item an import source had to leave out of its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub location: Location,
    pub reason: String,
}

impl SkippedItem {
    pub fn new(location: Location, reason: impl ToString) -> Self {
        Self {
            location,
            reason: reason.to_string(),
        }
    }
}

/// Files produced by one completed run of an import source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedImport {
    /// Locations ready for the rest of the pipeline
    pub staged: HashSet<Location>,

    /// Items that could not be staged and were left out
    pub skipped: Vec<SkippedItem>,

    /// Failures of the whole run that should be reported to the user
    pub errors: HashSet<ImportError>,
}

impl StagedImport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            staged: locations.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Fold another run's results into this one
    pub fn merge(&mut self, other: StagedImport) {
        self.staged.extend(other.staged);
        self.skipped.extend(other.skipped);
        self.errors.extend(other.errors);
    }
}

/// Terminal result of one import source run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The source finished; the staged set may be empty
    Completed(StagedImport),

    /// The user backed out; nothing was attempted
    Cancelled,
}

impl ImportOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn staged(&self) -> Option<&StagedImport> {
        match self {
            Self::Completed(staged) => Some(staged),
            Self::Cancelled => None,
        }
    }

    pub fn into_staged(self) -> Option<StagedImport> {
        match self {
            Self::Completed(staged) => Some(staged),
            Self::Cancelled => None,
        }
    }
}
