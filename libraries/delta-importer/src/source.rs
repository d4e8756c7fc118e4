//! Import sources and the plumbing for running them
//!
//! An import source turns one origin (a shared folder, the photo library, the
//! games database) into staged file locations. Sources usually wait on the
//! user, so they are async and are driven through [`run`] or [`spawn`], which
//! never block the caller and deliver exactly one [`ImportOutcome`].

use crate::{ImportOutcome, StagedImport};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// An origin that games or controller skins can be imported from
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// Name shown in the list of import options
    fn title(&self) -> &str;

    /// Run the source to completion
    ///
    /// Returns `ImportOutcome::Cancelled` when the user backs out. Per-item
    /// failures never escape: they are recorded in the staged import.
    async fn import(&self) -> ImportOutcome;
}

/// Run `source` in the background and hand its outcome to `completion`
///
/// `completion` is called exactly once, on a runtime worker thread. If the
/// source panics, it receives an empty completed outcome.
pub fn run<F>(source: Arc<dyn ImportSource>, completion: F) -> JoinHandle<()>
where
    F: FnOnce(ImportOutcome) + Send + 'static,
{
    tokio::spawn(async move {
        let title = source.title().to_string();
        debug!("Starting import from {}", title);

        let outcome = match tokio::spawn(async move { source.import().await }).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Import from {} aborted: {}", title, e);
                ImportOutcome::Completed(StagedImport::new())
            }
        };

        completion(outcome);
    })
}

/// Run `source` in the background, delivering its outcome over a oneshot channel
pub fn spawn(source: Arc<dyn ImportSource>) -> oneshot::Receiver<ImportOutcome> {
    let (tx, rx) = oneshot::channel();
    run(source, move |outcome| {
        // The receiver may have been dropped; nobody is waiting then.
        let _ = tx.send(outcome);
    });
    rx
}

/// Yes/no question put to the user before a source touches any files
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Answers every confirmation the same way, for non-interactive use
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl Confirm for FixedAnswer {
    async fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.0
    }
}

/// An image chosen from the photo library, already encoded as PNG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    pub data: Vec<u8>,
}

/// Presents the photo library
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// `None` when the user dismissed the picker without choosing
    async fn pick_image(&self) -> Option<PickedImage>;
}

/// Entry selected in the games database browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMetadata {
    pub name: String,
    pub artwork_url: Option<String>,
}

/// Presents the games database
#[async_trait]
pub trait DatabaseBrowser: Send + Sync {
    /// `None` when the user closed the browser without a selection
    async fn select(&self) -> Option<GameMetadata>;
}
