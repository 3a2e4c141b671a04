//! Widescreen patch installation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ps2bonus::{LauncherSettings, save_widescreen_patch};

use super::{find_game, load_library};

pub fn run(settings: &LauncherSettings, title: &str, crc: &str, file: &Path) -> Result<()> {
    let store = load_library(settings)?;
    let games = store.games();
    let game = &games[find_game(&games, title)?];

    let contents = fs::read_to_string(file)
        .with_context(|| format!("Failed to read patch file {}", file.display()))?;
    let path = save_widescreen_patch(&settings.pcsx2_dir, crc, &contents)?;

    println!("Installed widescreen patch for {} at {}", game.title, path.display());
    Ok(())
}
