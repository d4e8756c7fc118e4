//! Error types for the importer

use crate::types::Location;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// A single failed import attempt.
///
/// The `Display` output is the error's own description and is shown as-is
/// when a batch fails on exactly one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ImportError {
    #[error("The file does not exist.")]
    DoesNotExist(Location),

    #[error("The file is invalid.")]
    Invalid(Location),

    #[error("This file is not supported.")]
    Unsupported(Location),

    #[error("An unknown error occurred: {1}")]
    Unknown(Location, String),

    /// Saving a batch failed. May reference several locations, or none when
    /// the failure was not tied to any input file.
    #[error("The imported items could not be saved: {1}")]
    SaveFailed(BTreeSet<Location>, String),
}

impl ImportError {
    /// Create an unknown error from any displayable cause
    pub fn unknown(location: Location, cause: impl ToString) -> Self {
        Self::Unknown(location, cause.to_string())
    }

    /// Create a save failure from any displayable cause
    pub fn save_failed(
        locations: impl IntoIterator<Item = Location>,
        cause: impl ToString,
    ) -> Self {
        Self::SaveFailed(locations.into_iter().collect(), cause.to_string())
    }

    /// Every location this error refers to
    pub fn locations(&self) -> Box<dyn Iterator<Item = &Location> + '_> {
        match self {
            Self::DoesNotExist(location)
            | Self::Invalid(location)
            | Self::Unsupported(location)
            | Self::Unknown(location, _) => Box::new(std::iter::once(location)),
            Self::SaveFailed(locations, _) => Box::new(locations.iter()),
        }
    }

    /// The underlying cause, for variants that carry one
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Unknown(_, cause) | Self::SaveFailed(_, cause) => Some(cause),
            _ => None,
        }
    }
}

/// Errors raised while moving files around on disk
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file path: {}", .0.display())]
    InvalidPath(PathBuf),
}
