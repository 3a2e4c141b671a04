//! Console implementation of the launcher UI.
//!
//! There is no main window to hide on the command line, so visibility
//! changes are only logged. Messages and toasts go to the terminal.

use owo_colors::OwoColorize;
use ps2bonus::{LauncherSettings, LauncherUi, MessageKind};
use tracing::debug;

pub struct ConsoleUi {
    tv_window_title: String,
    toast: Option<String>,
}

impl ConsoleUi {
    pub fn new(settings: &LauncherSettings) -> Self {
        Self {
            tv_window_title: settings.tv_window_title.clone(),
            toast: None,
        }
    }

    /// Toast currently on screen
    pub fn toast(&self) -> Option<&str> {
        self.toast.as_deref()
    }
}

impl LauncherUi for ConsoleUi {
    fn show_message(&mut self, message: &str, kind: MessageKind) {
        match kind {
            MessageKind::Info => println!("{}", message),
            MessageKind::Error => eprintln!("{} {}", "error:".red().bold(), message),
        }
    }

    fn show_toast(&mut self, message: &str, duration_ms: Option<u64>) {
        eprintln!("{}", message.cyan());
        // Timed toasts disappear on their own
        self.toast = match duration_ms {
            Some(_) => None,
            None => Some(message.to_string()),
        };
    }

    fn hide_toast(&mut self) {
        if let Some(toast) = self.toast.take() {
            debug!("Dismissed toast: {}", toast);
        }
    }

    fn hide_main_window(&mut self) {
        debug!("Launcher hidden while the game runs");
    }

    fn show_main_window(&mut self) {
        debug!("Launcher restored");
    }

    fn set_tray_status(&mut self, status: Option<&str>) {
        match status {
            Some(status) => eprintln!("{}", status.dimmed()),
            None => debug!("Cleared tray status"),
        }
    }

    fn focus_fullscreen_window(&mut self) -> bool {
        ps2bonus::window::focus_window_by_title(&self.tv_window_title)
    }
}
