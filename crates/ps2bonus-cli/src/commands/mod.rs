//! CLI command implementations.

pub mod args;
pub mod check;
pub mod launch;
pub mod list;
pub mod patch;
pub mod remove;
pub mod states;

use anyhow::{Context, Result, bail};
use ps2bonus::{Game, LauncherSettings, LibraryStore};

/// Load the library store named by the settings
pub(crate) fn load_library(settings: &LauncherSettings) -> Result<LibraryStore> {
    let path = settings.library_path();
    LibraryStore::load(&path)
        .with_context(|| format!("Failed to load library from {}", path.display()))
}

/// Index of the game titled `title`; an exact match wins over a
/// case-insensitive one
pub(crate) fn find_game(games: &[Game], title: &str) -> Result<usize> {
    if let Some(index) = games.iter().position(|g| g.title == title) {
        return Ok(index);
    }
    let lowered = title.to_lowercase();
    if let Some(index) = games.iter().position(|g| g.title.to_lowercase() == lowered) {
        return Ok(index);
    }
    bail!("No game titled {:?} in the library", title)
}
