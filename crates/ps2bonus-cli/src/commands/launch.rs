//! Launch command: run one emulator session and record its play-time.

use std::time::Duration;

use anyhow::{Context, Result};
use ps2bonus::{LauncherSettings, SessionController, format_play_time};

use super::{find_game, load_library};
use crate::console::ConsoleUi;

pub fn run(settings: LauncherSettings, title: &str, tv: bool) -> Result<()> {
    let library_path = settings.library_path();
    let mut store = load_library(&settings)?;
    let mut games = store.games();
    let index = find_game(&games, title)?;

    let mut ui = ConsoleUi::new(&settings);
    let mut controller = SessionController::new(settings);

    let pid = controller
        .launch(&games[index], tv, &mut ui)
        .with_context(|| format!("Failed to launch {}", games[index].title))?;
    eprintln!("Waiting for PCSX2 (pid {}) to exit...", pid);

    let exit = controller.wait_for_exit()?;
    let elapsed = controller.finish(exit, &mut games[index], &mut store, &mut ui)?;

    store
        .save(&library_path)
        .with_context(|| format!("Failed to save library to {}", library_path.display()))?;

    let game = &games[index];
    println!(
        "Played {} for {} (total {})",
        game.title,
        format_play_time(Duration::from_secs(elapsed.as_secs())),
        format_play_time(Duration::from_secs(game.play_time.as_secs()))
    );
    Ok(())
}
