//! Registry of the game file types Delta knows how to import

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File extension of a controller skin package
pub const SKIN_EXTENSION: &str = "deltaskin";

/// File extension of an archive that may hold games or skins
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Shown when a collection identifier does not map to a known system
const UNKNOWN_NAME: &str = "Unknown";

const IDENTIFIER_PREFIX: &str = "com.rileytestut.delta.game.";

/// A system whose games can be imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Nes,
    Snes,
    N64,
    Gbc,
    Gba,
    Ds,
    Genesis,
}

impl GameType {
    pub const ALL: [GameType; 7] = [
        GameType::Nes,
        GameType::Snes,
        GameType::N64,
        GameType::Gbc,
        GameType::Gba,
        GameType::Ds,
        GameType::Genesis,
    ];

    fn slug(self) -> &'static str {
        match self {
            GameType::Nes => "nes",
            GameType::Snes => "snes",
            GameType::N64 => "n64",
            GameType::Gbc => "gbc",
            GameType::Gba => "gba",
            GameType::Ds => "ds",
            GameType::Genesis => "genesis",
        }
    }

    /// Stable identifier, also used as the game collection identifier
    pub fn identifier(self) -> String {
        format!("{IDENTIFIER_PREFIX}{}", self.slug())
    }

    /// Lowercase file extensions for this system
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            GameType::Nes => &["nes"],
            GameType::Snes => &["smc", "sfc", "fig"],
            GameType::N64 => &["n64", "z64"],
            GameType::Gbc => &["gbc", "gb"],
            GameType::Gba => &["gba"],
            GameType::Ds => &["nds"],
            GameType::Genesis => &["gen", "md", "smd"],
        }
    }

    pub fn localized_name(self) -> &'static str {
        match self {
            GameType::Nes => "Nintendo",
            GameType::Snes => "Super Nintendo",
            GameType::N64 => "Nintendo 64",
            GameType::Gbc => "Game Boy Color",
            GameType::Gba => "Game Boy Advance",
            GameType::Ds => "Nintendo DS",
            GameType::Genesis => "Sega Genesis",
        }
    }

    pub fn localized_short_name(self) -> &'static str {
        match self {
            GameType::Nes => "NES",
            GameType::Snes => "SNES",
            GameType::N64 => "N64",
            GameType::Gbc => "GBC",
            GameType::Gba => "GBA",
            GameType::Ds => "DS",
            GameType::Genesis => "Genesis",
        }
    }

    /// Look up a game type by file extension, ignoring case
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|game_type| game_type.extensions().contains(&extension.as_str()))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let slug = identifier.strip_prefix(IDENTIFIER_PREFIX)?;
        Self::ALL
            .into_iter()
            .find(|game_type| game_type.slug() == slug)
    }
}

/// Display name for a game collection identifier
pub fn collection_name(identifier: &str) -> &'static str {
    GameType::from_identifier(identifier).map_or(UNKNOWN_NAME, GameType::localized_name)
}

/// Short display name for a game collection identifier
pub fn collection_short_name(identifier: &str) -> &'static str {
    GameType::from_identifier(identifier).map_or(UNKNOWN_NAME, GameType::localized_short_name)
}

/// Lowercased extension of a path, if it has a UTF-8 one
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn is_skin_file(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| ext == SKIN_EXTENSION)
}

pub fn is_archive_file(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| ext == ARCHIVE_EXTENSION)
}

pub fn is_game_file(path: &Path) -> bool {
    GameType::from_path(path).is_some()
}

/// Whether a file found in the legacy shared folder should be picked up
pub fn is_importable_file(path: &Path) -> bool {
    is_game_file(path) || is_skin_file(path) || is_archive_file(path)
}
