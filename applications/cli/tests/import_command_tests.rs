/// Command integration tests
/// Runs the import commands against real temporary folders
use delta_import::commands::{self, ImportRun};
use delta_import::{AppConfig, AppError};
use delta_importer::source::FixedAnswer;
use delta_importer::{ImportKind, StageStrategy};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to point every configured folder into one temp dir
fn test_config(root: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.staging.directory = root.join("staging");
    config.legacy.directory = root.join("Documents");
    config.library.directory = root.join("Library");
    fs::create_dir_all(&config.legacy.directory).unwrap();
    config
}

fn create_file(dir: &Path, name: &str, contents: &[u8]) {
    fs::write(dir.join(name), contents).unwrap();
}

#[tokio::test]
async fn test_import_sorts_files_into_library() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    let shared = config.legacy.directory.clone();

    create_file(&shared, "game.nes", b"rom");
    create_file(&shared, "skin.deltaskin", b"skin");
    create_file(&shared, "archive.zip", b"zip");
    create_file(&shared, "notes.txt", b"text");

    let run = commands::import(&config, None, Arc::new(FixedAnswer(true)))
        .await
        .unwrap();

    let ImportRun::Finished {
        imported,
        skipped,
        reports,
    } = run
    else {
        panic!("import should have finished");
    };
    assert_eq!(imported.len(), 3);
    assert!(skipped.is_empty());
    assert!(reports.is_empty());

    let library = &config.library.directory;
    assert!(library.join("Games").join("game.nes").is_file());
    assert!(library.join("Games").join("archive.zip").is_file());
    assert!(library.join("Controller Skins").join("skin.deltaskin").is_file());

    // Moved out of the shared folder; unsupported files stay put
    assert!(!shared.join("game.nes").exists());
    assert!(shared.join("notes.txt").exists());

    // Committed files do not linger in staging
    assert!(!config.staging.directory.join("game.nes").exists());
}

#[tokio::test]
async fn test_single_bad_file_gets_its_own_title() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());

    create_file(&config.legacy.directory, "good.gba", b"rom");
    create_file(&config.legacy.directory, "bad.gba", b"");

    let run = commands::import(&config, None, Arc::new(FixedAnswer(true)))
        .await
        .unwrap();

    let ImportRun::Finished {
        imported, reports, ..
    } = run
    else {
        panic!("import should have finished");
    };
    assert_eq!(imported.len(), 1);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, ImportKind::Games);
    assert_eq!(reports[0].report.title, "Could not import \"bad.gba\".");
    assert_eq!(reports[0].report.message, "The file is invalid.");
}

#[tokio::test]
async fn test_forced_kind_lists_every_rejected_file() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());

    create_file(&config.legacy.directory, "b.nes", b"rom");
    create_file(&config.legacy.directory, "a.gba", b"rom");

    let run = commands::import(
        &config,
        Some(ImportKind::ControllerSkins),
        Arc::new(FixedAnswer(true)),
    )
    .await
    .unwrap();

    let ImportRun::Finished { reports, .. } = run else {
        panic!("import should have finished");
    };
    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].report.title,
        "Error Importing Controller Skins"
    );
    assert_eq!(
        reports[0].report.message,
        "Could not import the following controller skin files:\n\na.gba\nb.nes"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_utf8_name_stays_in_shared_folder() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    let original = config
        .legacy
        .directory
        .join(OsStr::from_bytes(b"Mario\xff.nes"));
    fs::write(&original, b"rom").unwrap();

    let run = commands::import(&config, None, Arc::new(FixedAnswer(true)))
        .await
        .unwrap();

    let ImportRun::Finished {
        imported,
        skipped,
        reports,
    } = run
    else {
        panic!("import should have finished");
    };
    assert!(imported.is_empty());
    assert!(reports.is_empty());
    assert_eq!(skipped.len(), 1);
    assert!(original.exists());
}

#[tokio::test]
async fn test_declined_import_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    create_file(&config.legacy.directory, "game.nes", b"rom");

    let run = commands::import(&config, None, Arc::new(FixedAnswer(false)))
        .await
        .unwrap();

    assert!(matches!(run, ImportRun::Cancelled));
    assert!(config.legacy.directory.join("game.nes").exists());
    assert!(!config.library.directory.exists());
}

#[tokio::test]
async fn test_scan_with_copy_strategy_keeps_originals() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(temp.path());
    config.staging.strategy = StageStrategy::Copy;
    create_file(&config.legacy.directory, "game.nes", b"rom");

    let outcome = commands::scan(&config, Arc::new(FixedAnswer(true)))
        .await
        .unwrap();

    let staged = outcome.staged().expect("scan should have completed");
    assert_eq!(staged.staged.len(), 1);
    assert!(config.legacy.directory.join("game.nes").exists());
    assert!(config.staging.directory.join("game.nes").exists());
}

#[test]
fn test_config_file_round_trip() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(temp.path());
    config.staging.strategy = StageStrategy::Copy;

    let path = temp.path().join("delta-import.toml");
    fs::write(&path, config.to_toml().unwrap()).unwrap();

    let loaded = AppConfig::load(Some(&path)).unwrap();
    assert!(loaded.validate().is_ok());
    assert_eq!(loaded.staging.strategy, StageStrategy::Copy);
    assert_eq!(loaded.library.directory, config.library.directory);
    assert_eq!(loaded.legacy.directory, config.legacy.directory);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = AppConfig::load(Some(&temp.path().join("missing.toml")));
    assert!(matches!(result, Err(AppError::Config(_))));
}
