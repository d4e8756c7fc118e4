//! Import of a single image from the photo library (used for game artwork)

use crate::source::{ImagePicker, ImportSource};
use crate::{ImportOutcome, Location, SkippedItem, StagedImport, StagingArea};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const TITLE: &str = "Photo Library";

/// Every PNG file starts with these bytes
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

pub struct PhotoLibraryImport {
    staging: StagingArea,
    picker: Arc<dyn ImagePicker>,
}

impl PhotoLibraryImport {
    pub fn new(staging: StagingArea, picker: Arc<dyn ImagePicker>) -> Self {
        Self { staging, picker }
    }
}

#[async_trait]
impl ImportSource for PhotoLibraryImport {
    fn title(&self) -> &str {
        TITLE
    }

    async fn import(&self) -> ImportOutcome {
        let Some(image) = self.picker.pick_image().await else {
            return ImportOutcome::Cancelled;
        };

        if !image.data.starts_with(PNG_SIGNATURE) {
            debug!("Picked image is not a readable PNG ({} bytes)", image.data.len());
            return ImportOutcome::Completed(StagedImport::new());
        }

        let staging = self.staging.clone();
        let write = tokio::task::spawn_blocking(move || staging.write_atomic(&image.data, "png"));

        let mut result = StagedImport::new();
        match write.await {
            Ok(Ok(path)) => {
                result.staged.insert(Location::from_path(&path));
            }
            Ok(Err(e)) => {
                warn!("Failed to stage picked image: {}", e);
                result
                    .skipped
                    .push(SkippedItem::new(Location::from_path(self.staging.root()), e));
            }
            Err(e) => {
                warn!("Staging picked image aborted: {}", e);
                result
                    .skipped
                    .push(SkippedItem::new(Location::from_path(self.staging.root()), e));
            }
        }

        ImportOutcome::Completed(result)
    }
}
