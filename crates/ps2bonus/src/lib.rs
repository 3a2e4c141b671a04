//! # ps2bonus
//!
//! Core library for the PS2 Bonus launcher, a front-end for PCSX2 game
//! libraries.
//!
//! This crate provides:
//! - Launcher settings (emulator paths, per-game config root, preferences)
//! - Game records and the persisted XML library store
//! - Per-game override resolution and emulator argument composition
//! - The session controller that owns one emulator process from launch to exit
//!   and commits play-time when it ends
//! - Save state and widescreen patch file helpers
//!
//! ## UI collaborators
//!
//! Window visibility, message boxes, toasts and the tray status are consumed
//! through the [`LauncherUi`] trait. The host owns the controller on a single
//! thread and hands exit notifications back to it with
//! [`SessionController::finish`].

pub mod error;
pub mod game;
pub mod launch;
pub mod library;
pub mod prelude;
pub mod session;
pub mod settings;
pub mod window;

pub use error::{Error, Result};
pub use game::{Game, format_play_time, parse_play_time};
pub use launch::{
    BootFlag, BootFlags, EffectiveLaunchConfig, GameOverrides, LaunchCommand, LaunchPlan,
    OVERRIDE_FILE_NAME, SHADER_TARGET_NAME, compose_arguments, game_config_dir, install_shader,
    resolve_launch_config,
};
pub use library::{
    GameEntry, LibraryStore, SaveState, SortOrder, delete_save_states, filter_by_title,
    list_save_states, save_widescreen_patch, sort_games,
};
pub use session::{
    ActiveSession, Clock, LauncherUi, MessageKind, ProcessSpawner, RunningProcess, SessionController,
    SessionExit, SessionState, SystemClock, SystemSpawner,
};
pub use settings::{LauncherSettings, LauncherSettingsBuilder};
