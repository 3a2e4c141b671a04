//! UI collaborator interface.
//!
//! The session controller never draws anything itself. It asks the host to
//! hide or show its main window, pop message boxes and toasts, and update the
//! "currently playing" tray status through this trait.

use crate::game::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

pub trait LauncherUi {
    /// Modal message box
    fn show_message(&mut self, message: &str, kind: MessageKind);

    /// Toast; `None` keeps it up until [`LauncherUi::hide_toast`]
    fn show_toast(&mut self, message: &str, duration_ms: Option<u64>);

    fn hide_toast(&mut self);

    fn hide_main_window(&mut self);

    fn show_main_window(&mut self);

    /// Set or clear (`None`) the "currently playing" tray status
    fn set_tray_status(&mut self, status: Option<&str>);

    /// Per-game notification shown while the game is running
    fn show_game_notification(&mut self, game: &Game) {
        self.show_toast(&format!("Now playing {}", game.title), None);
    }

    /// Bring the full-screen TV mode window to the foreground.
    ///
    /// Returns `false` when no such window exists.
    fn focus_fullscreen_window(&mut self) -> bool;
}
