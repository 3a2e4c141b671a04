use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::args::compose_arguments;
use super::overrides::{BootFlags, GameOverrides, OVERRIDE_FILE_NAME};
use crate::game::Game;
use crate::settings::LauncherSettings;

/// Resolved executable, working directory and boot flags for one launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveLaunchConfig {
    pub executable: PathBuf,
    pub working_dir: PathBuf,
    pub flags: BootFlags,
    pub shader_source: Option<PathBuf>,
    /// Per-game config directory, set only when it exists on disk
    pub config_dir: Option<PathBuf>,
}

/// Everything needed to start the emulator for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub config: EffectiveLaunchConfig,
    pub arguments: String,
}

/// Process invocation handed to a spawner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub executable: PathBuf,
    pub working_dir: PathBuf,
    pub arguments: String,
}

impl LaunchPlan {
    /// Resolve the game's configuration and compose its argument string
    pub fn prepare(game: &Game, settings: &LauncherSettings) -> Self {
        let config = resolve_launch_config(game, settings);
        let arguments = compose_arguments(&game.location, config.config_dir.as_deref(), &config.flags);
        Self { config, arguments }
    }

    pub fn command(&self) -> LaunchCommand {
        LaunchCommand {
            executable: self.config.executable.clone(),
            working_dir: self.config.working_dir.clone(),
            arguments: self.arguments.clone(),
        }
    }
}

/// Directory holding a game's per-game configuration
pub fn game_config_dir(settings: &LauncherSettings, game: &Game) -> PathBuf {
    settings.configs_dir().join(game.file_safe_title())
}

/// Merge the game's override file, if any, with the global settings.
///
/// A malformed override file is logged and treated as empty, so every flag
/// is off and the global executable is used.
pub fn resolve_launch_config(game: &Game, settings: &LauncherSettings) -> EffectiveLaunchConfig {
    let dir = game_config_dir(settings, game);
    let config_dir = dir.is_dir().then(|| dir.clone());

    let override_path = dir.join(OVERRIDE_FILE_NAME);
    let overrides = if override_path.is_file() {
        match GameOverrides::load(&override_path) {
            Ok(overrides) => {
                debug!("Loaded overrides for {}: {:?}", game.title, overrides);
                overrides
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                GameOverrides::default()
            }
        }
    } else {
        GameOverrides::default()
    };

    let (executable, working_dir) = match overrides.executable {
        Some(exe) => {
            let dir = executable_dir(&exe).unwrap_or_else(|| settings.pcsx2_dir.clone());
            (exe, dir)
        }
        None => (settings.pcsx2_exe.clone(), settings.pcsx2_dir.clone()),
    };

    EffectiveLaunchConfig {
        executable,
        working_dir,
        flags: overrides.flags,
        shader_source: overrides.shader,
        config_dir,
    }
}

/// Parent directory of an executable path, accepting either separator
fn executable_dir(exe: &Path) -> Option<PathBuf> {
    if let Some(parent) = exe.parent()
        && !parent.as_os_str().is_empty()
    {
        return Some(parent.to_path_buf());
    }

    let s = exe.to_string_lossy();
    let idx = s.rfind(['\\', '/'])?;
    let parent = &s[..idx];
    if parent.is_empty() || parent.ends_with(':') {
        // Keep the separator for drive roots such as `C:\`
        Some(PathBuf::from(&s[..=idx]))
    } else {
        Some(PathBuf::from(parent))
    }
}
