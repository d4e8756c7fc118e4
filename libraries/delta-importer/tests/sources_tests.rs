//! Tests for the photo library and games database sources


use async_trait::async_trait;
use delta_importer::source::{self, DatabaseBrowser, GameMetadata, ImagePicker, PickedImage};
use delta_importer::sources::{GamesDatabaseImport, PhotoLibraryImport};
use delta_importer::{ImportOutcome, ImportSource, Location, StagedImport, StagingArea};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use test_helpers::init_tracing;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

struct FakePicker(Option<PickedImage>);

#[async_trait]
impl ImagePicker for FakePicker {
    async fn pick_image(&self) -> Option<PickedImage> {
        self.0.clone()
    }
}

struct FakeBrowser(Option<GameMetadata>);

#[async_trait]
impl DatabaseBrowser for FakeBrowser {
    async fn select(&self) -> Option<GameMetadata> {
        self.0.clone()
    }
}

#[tokio::test]
async fn test_picked_image_is_staged_as_png() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    let picker = FakePicker(Some(PickedImage {
        data: PNG_BYTES.to_vec(),
    }));
    let import = PhotoLibraryImport::new(StagingArea::new(temp.path()), Arc::new(picker));

    let outcome = import.import().await;

    let staged = outcome.into_staged().unwrap();
    assert_eq!(staged.staged.len(), 1);
    let path = staged.staged.iter().next().unwrap().to_path_buf();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    assert_eq!(fs::read(path).unwrap(), PNG_BYTES);
}

#[tokio::test]
async fn test_dismissed_picker_cancels() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    let import = PhotoLibraryImport::new(StagingArea::new(temp.path()), Arc::new(FakePicker(None)));

    assert_eq!(import.import().await, ImportOutcome::Cancelled);
}

#[tokio::test]
async fn test_unreadable_image_completes_empty() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    let picker = FakePicker(Some(PickedImage {
        data: b"GIF89a".to_vec(),
    }));
    let import = PhotoLibraryImport::new(StagingArea::new(temp.path()), Arc::new(picker));

    let outcome = import.import().await;

    assert_eq!(outcome, ImportOutcome::Completed(StagedImport::new()));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_database_selection_yields_artwork_url() {
    let browser = FakeBrowser(Some(GameMetadata {
        name: "Super Mario World".to_string(),
        artwork_url: Some("https://example.com/artwork/smw.jpg".to_string()),
    }));
    let import = GamesDatabaseImport::new(Arc::new(browser));

    let outcome = import.import().await;

    let staged = outcome.into_staged().unwrap();
    assert_eq!(
        staged.staged.into_iter().collect::<Vec<_>>(),
        vec![Location::new("https://example.com/artwork/smw.jpg")]
    );
}

#[tokio::test]
async fn test_database_selection_without_artwork_cancels() {
    let browser = FakeBrowser(Some(GameMetadata {
        name: "Obscure Homebrew".to_string(),
        artwork_url: None,
    }));
    let import = GamesDatabaseImport::new(Arc::new(browser));

    assert!(import.import().await.is_cancelled());
}

#[tokio::test]
async fn test_run_completion_receives_outcome() {
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&delivered);

    let import = GamesDatabaseImport::new(Arc::new(FakeBrowser(None)));
    source::run(Arc::new(import), move |outcome| {
        sink.lock().unwrap().push(outcome);
    })
    .await
    .unwrap();

    assert_eq!(*delivered.lock().unwrap(), vec![ImportOutcome::Cancelled]);
}

#[test]
fn test_source_titles() {
    let temp = TempDir::new().unwrap();
    let photos = PhotoLibraryImport::new(StagingArea::new(temp.path()), Arc::new(FakePicker(None)));
    let database = GamesDatabaseImport::new(Arc::new(FakeBrowser(None)));

    assert_eq!(photos.title(), "Photo Library");
    assert_eq!(database.title(), "Games Database");
}
