//! Checks staged files before they are committed to the library

use crate::game_type::{is_archive_file, is_game_file, is_skin_file};
use crate::{ImportError, ImportKind, Location};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::Path;

/// Staged locations split into those that can be committed and the failures
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Verification {
    pub accepted: BTreeSet<Location>,
    pub errors: HashSet<ImportError>,
}

/// Whether a file of this name can be imported as `kind`
pub fn accepts(kind: ImportKind, path: &Path) -> bool {
    match kind {
        ImportKind::Games => is_game_file(path) || is_archive_file(path),
        ImportKind::ControllerSkins => is_skin_file(path) || is_archive_file(path),
    }
}

/// Kind a staged file is imported as when the caller did not pick one.
/// Skins are recognized by extension, everything else goes through games.
pub fn kind_for(path: &Path) -> ImportKind {
    if is_skin_file(path) {
        ImportKind::ControllerSkins
    } else {
        ImportKind::Games
    }
}

/// Check one staged file
pub fn verify_location(kind: ImportKind, location: &Location) -> Result<(), ImportError> {
    let path = location.to_path_buf();

    let metadata = match fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ImportError::DoesNotExist(location.clone()));
        }
        Err(e) => return Err(ImportError::unknown(location.clone(), e)),
    };

    if !accepts(kind, &path) {
        return Err(ImportError::Unsupported(location.clone()));
    }

    if !metadata.is_file() || metadata.len() == 0 {
        return Err(ImportError::Invalid(location.clone()));
    }

    Ok(())
}

/// Check every staged file, collecting all failures rather than stopping at the first
pub fn verify_staged<'a>(
    kind: ImportKind,
    locations: impl IntoIterator<Item = &'a Location>,
) -> Verification {
    let mut verification = Verification::default();

    for location in locations {
        match verify_location(kind, location) {
            Ok(()) => {
                verification.accepted.insert(location.clone());
            }
            Err(e) => {
                tracing::debug!("Rejected {}: {}", location, e);
                verification.errors.insert(e);
            }
        }
    }

    verification
}
