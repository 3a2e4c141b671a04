use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::process::{ProcessSpawner, SystemSpawner};
use super::ui::{LauncherUi, MessageKind};
use crate::error::{Error, Result};
use crate::game::{Game, STATUS_TITLE_LIMIT};
use crate::launch::{LaunchPlan, install_shader};
use crate::library::LibraryStore;
use crate::settings::LauncherSettings;

/// The running emulator session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub title: String,
    pub pid: u32,
    pub started_at: DateTime<Local>,
    pub tv_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Checking the image and starting the process
    Launching { title: String },
    /// Image missing in TV mode; handing focus back to the full-screen window
    ForegroundRedirect { title: String },
    Running(ActiveSession),
}

/// Exit notification sent from the watcher thread to the owning thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionExit {
    pub pid: u32,
    pub exit_code: Option<i32>,
}

/// Owns the emulator process for one launch at a time.
///
/// The controller lives on the thread that owns the game records and UI
/// state. A watcher thread waits on the process and only sends a
/// [`SessionExit`] back; all mutation happens in [`SessionController::finish`]
/// on the owning thread.
pub struct SessionController<S = SystemSpawner, C = SystemClock> {
    settings: LauncherSettings,
    spawner: S,
    clock: C,
    state: SessionState,
    exit_tx: Sender<SessionExit>,
    exit_rx: Receiver<SessionExit>,
}

impl SessionController {
    pub fn new(settings: LauncherSettings) -> Self {
        Self::with_parts(settings, SystemSpawner, SystemClock)
    }
}

impl<S: ProcessSpawner, C: Clock> SessionController<S, C> {
    pub fn with_parts(settings: LauncherSettings, spawner: S, clock: C) -> Self {
        let (exit_tx, exit_rx) = mpsc::channel();
        Self {
            settings,
            spawner,
            clock,
            state: SessionState::Idle,
            exit_tx,
            exit_rx,
        }
    }

    pub fn settings(&self) -> &LauncherSettings {
        &self.settings
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SessionState::Idle
    }

    pub fn active_session(&self) -> Option<&ActiveSession> {
        match &self.state {
            SessionState::Running(session) => Some(session),
            _ => None,
        }
    }

    /// Resolve and compose the launch for a game without starting it
    pub fn prepare(&self, game: &Game) -> LaunchPlan {
        LaunchPlan::prepare(game, &self.settings)
    }

    /// Prepare and start a session for a game. Returns the emulator's PID.
    pub fn launch(&mut self, game: &Game, tv_mode: bool, ui: &mut dyn LauncherUi) -> Result<u32> {
        let plan = self.prepare(game);
        self.start(game, &plan, tv_mode, ui)
    }

    /// Start a session from a prepared plan.
    ///
    /// Rejects the call while another session is active. A missing image is
    /// reported through `ui`; in TV mode the full-screen window is brought
    /// back instead of leaving the user on a hidden launcher. A failed shader
    /// copy is reported and the launch continues.
    pub fn start(
        &mut self,
        game: &Game,
        plan: &LaunchPlan,
        tv_mode: bool,
        ui: &mut dyn LauncherUi,
    ) -> Result<u32> {
        if let Some(title) = self.blocking_title() {
            warn!("Rejected launch of {}: {} is still running", game.title, title);
            return Err(Error::SessionAlreadyActive { title });
        }

        self.state = SessionState::Launching {
            title: game.title.clone(),
        };

        if !game.location.is_file() {
            ui.show_message("Unable to find image file!", MessageKind::Error);
            if tv_mode {
                self.state = SessionState::ForegroundRedirect {
                    title: game.title.clone(),
                };
                if !ui.focus_fullscreen_window() {
                    debug!("No full-screen window to return to");
                }
            }
            self.state = SessionState::Idle;
            return Err(Error::ImageNotFound(game.location.clone()));
        }

        if let Err(e) = install_shader(
            plan.config.shader_source.as_deref(),
            &plan.config.working_dir,
        ) {
            warn!("{}", e);
            ui.show_message(
                &format!("Could not save shader file! Details: {e}"),
                MessageKind::Error,
            );
        }

        let command = plan.command();
        let process = match self.spawner.spawn(&command) {
            Ok(process) => process,
            Err(e) => {
                self.state = SessionState::Idle;
                let err = Error::ProcessSpawn {
                    executable: command.executable,
                    source: e,
                };
                ui.show_message(&err.to_string(), MessageKind::Error);
                return Err(err);
            }
        };

        let pid = process.id();
        let started_at = self.clock.now();
        let exit_tx = self.exit_tx.clone();
        thread::spawn(move || {
            let exit_code = match process.wait() {
                Ok(code) => code,
                Err(e) => {
                    warn!("Failed to wait for emulator process {}: {}", pid, e);
                    None
                }
            };
            // The receiver is gone only if the controller was dropped
            let _ = exit_tx.send(SessionExit { pid, exit_code });
        });

        ui.hide_main_window();
        if self.settings.enable_game_toast {
            ui.show_game_notification(game);
        }
        let status = format!(
            "Currently playing [{}]",
            game.short_title(STATUS_TITLE_LIMIT)
        );
        ui.set_tray_status(Some(&status));

        info!(
            "Started {} (pid {}) with {} {}",
            game.title,
            pid,
            command.executable.display(),
            command.arguments
        );
        self.state = SessionState::Running(ActiveSession {
            title: game.title.clone(),
            pid,
            started_at,
            tv_mode,
        });
        Ok(pid)
    }

    /// Block until the running session's process exits
    pub fn wait_for_exit(&self) -> Result<SessionExit> {
        if self.active_session().is_none() {
            return Err(Error::NoActiveSession);
        }
        // The controller holds a sender, so the channel never disconnects
        self.exit_rx.recv().map_err(|_| Error::NoActiveSession)
    }

    /// Non-blocking check for an exit notification
    pub fn poll_exit(&self) -> Option<SessionExit> {
        match self.exit_rx.try_recv() {
            Ok(exit) => Some(exit),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Commit an exited session.
    ///
    /// Adds the elapsed wall-clock time to `game`, writes the new total to
    /// the matching store record, restores the UI and returns to idle.
    /// Returns the session's duration.
    ///
    /// `game` must be the record the session was started for. Any other
    /// record is rejected and the session stays running, so the same exit can
    /// be committed again with the right one.
    pub fn finish(
        &mut self,
        exit: SessionExit,
        game: &mut Game,
        store: &mut LibraryStore,
        ui: &mut dyn LauncherUi,
    ) -> Result<Duration> {
        let session = match &self.state {
            SessionState::Running(session) if session.pid == exit.pid => session.clone(),
            SessionState::Running(session) => {
                warn!(
                    "Ignoring exit of pid {}, session pid is {}",
                    exit.pid, session.pid
                );
                return Err(Error::NoActiveSession);
            }
            _ => return Err(Error::NoActiveSession),
        };

        if game.title != session.title {
            warn!(
                "Session for {} finished with game record {}",
                session.title, game.title
            );
            return Err(Error::SessionMismatch {
                session: session.title,
                game: game.title.clone(),
            });
        }

        let elapsed = (self.clock.now() - session.started_at)
            .to_std()
            .unwrap_or_default();
        game.play_time += elapsed;

        if !store.update_play_time(&session.title, game.play_time) {
            debug!("No library record for {}, play-time not persisted", session.title);
        }

        if session.tv_mode && !ui.focus_fullscreen_window() {
            debug!("No full-screen window to return to");
        }
        ui.set_tray_status(None);
        if self.settings.enable_game_toast {
            ui.hide_toast();
        }
        ui.show_main_window();

        info!(
            "{} exited (code {:?}) after {}s, total play-time {}s",
            session.title,
            exit.exit_code,
            elapsed.as_secs(),
            game.play_time.as_secs()
        );
        self.state = SessionState::Idle;
        Ok(elapsed)
    }

    fn blocking_title(&self) -> Option<String> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Launching { title } | SessionState::ForegroundRedirect { title } => {
                Some(title.clone())
            }
            SessionState::Running(session) => Some(session.title.clone()),
        }
    }
}
