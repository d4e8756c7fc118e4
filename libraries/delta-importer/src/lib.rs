//! Delta Importer
//!
//! This crate handles bringing games and controller skins into Delta and
//! reporting what went wrong when they could not be imported.
//!
//! # Features
//!
//! - Import sources (legacy shared folder, photo library, games database)
//! - Staging of source files into a private temporary area
//! - Verification of staged files against the kind being imported
//! - Committing verified files into the library
//! - One aggregated report per failed batch instead of one alert per file
//!
//! # Architecture
//!
//! - `source`: The `ImportSource` trait and exactly-once completion helpers
//! - `sources`: Concrete import sources
//! - `staging`: Temporary staging area shared by the sources
//! - `game_type`: Registry of known game file types
//! - `verify`: Classification of staged files into accepted files and errors
//! - `library`: Copying accepted files into the library
//! - `report`: Reduction of a set of errors into one title/message pair
//!
//! # Example
//!
//! ```
//! use delta_importer::{report, ImportError, ImportKind, Location};
//! use std::collections::HashSet;
//!
//! let errors = HashSet::from([ImportError::DoesNotExist(Location::new("/roms/a.nes"))]);
//! let report = report::summarize(ImportKind::Games, &errors);
//! assert!(report.title.contains("a.nes"));
//! ```

mod error;
mod types;

// Core modules
pub mod game_type;
pub mod library;
pub mod report;
pub mod source;
pub mod sources;
pub mod staging;
pub mod verify;

pub use error::{ImportError, StagingError};
pub use game_type::GameType;
pub use report::{summarize, AggregatedReport};
pub use source::ImportSource;
pub use staging::StagingArea;
pub use types::*;

/// Result type for staging and file-system operations
pub type Result<T> = std::result::Result<T, StagingError>;
