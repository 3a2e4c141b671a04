//! Prelude module for convenient imports
//!
//! ```ignore
//! use ps2bonus::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Settings: `LauncherSettings`, `LauncherSettingsBuilder`
//! - Library: `Game`, `LibraryStore`, `SortOrder`
//! - Sessions: `SessionController`, `SessionState`, `SessionExit`, `LauncherUi`, `MessageKind`
//! - Launching: `LaunchPlan`, `BootFlags`
//! - Error handling: `Error`, `Result`

// Settings
pub use crate::settings::{LauncherSettings, LauncherSettingsBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Library
pub use crate::game::Game;
pub use crate::library::{LibraryStore, SortOrder};

// Launching
pub use crate::launch::{BootFlags, LaunchPlan};

// Sessions
pub use crate::session::{LauncherUi, MessageKind, SessionController, SessionExit, SessionState};
