//! Import of artwork chosen from the games database

use crate::source::{DatabaseBrowser, ImportSource};
use crate::{ImportOutcome, Location, StagedImport};
use async_trait::async_trait;
use std::sync::Arc;

const TITLE: &str = "Games Database";

pub struct GamesDatabaseImport {
    browser: Arc<dyn DatabaseBrowser>,
}

impl GamesDatabaseImport {
    pub fn new(browser: Arc<dyn DatabaseBrowser>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl ImportSource for GamesDatabaseImport {
    fn title(&self) -> &str {
        TITLE
    }

    /// Yields the artwork URL of the selected game. A game without artwork
    /// counts as cancellation since there is nothing to import.
    async fn import(&self) -> ImportOutcome {
        match self.browser.select().await.and_then(|game| game.artwork_url) {
            Some(url) => {
                ImportOutcome::Completed(StagedImport::from_locations([Location::new(url)]))
            }
            None => ImportOutcome::Cancelled,
        }
    }
}
