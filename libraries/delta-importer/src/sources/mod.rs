//! Concrete import sources

mod games_database;
mod legacy_directory;
mod photo_library;

pub use games_database::GamesDatabaseImport;
pub use legacy_directory::{find_importable_files, scan_and_stage, LegacyDirectoryImport};
pub use photo_library::PhotoLibraryImport;
