//! Launcher settings.
//!
//! Global emulator paths and preferences, loaded from a TOML file and passed
//! into the resolver and session controller by value.
//!
//! ## Example
//!
//! ```ignore
//! use ps2bonus::LauncherSettings;
//!
//! let settings = LauncherSettings::builder()
//!     .pcsx2_exe(r"C:\PCSX2\pcsx2.exe")
//!     .pcsx2_dir(r"C:\PCSX2")
//!     .root_dir(r"C:\PCSX2Bonus")
//!     .build();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::library::SortOrder;

/// Folders PCSX2 expects inside its data directory
pub const REQUIRED_DATA_FOLDERS: [&str; 6] = ["inis", "bios", "logs", "memcards", "snaps", "sstates"];

/// Title of the full-screen companion window used by TV mode
pub const DEFAULT_TV_WINDOW_TITLE: &str = "wndFullScreen";

const LIBRARY_FILE: &str = "PCSX2Bonus.xml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// Default emulator executable
    pub pcsx2_exe: PathBuf,
    /// Default emulator directory, used as the working directory
    pub pcsx2_dir: PathBuf,
    /// PCSX2 data directory (bios, inis, memcards, sstates, ...)
    pub pcsx2_data_dir: PathBuf,
    /// Launcher root; per-game configs live under `<root_dir>/Configs`
    pub root_dir: PathBuf,
    /// Library store location, defaults to `<root_dir>/PCSX2Bonus.xml`
    pub library_path: Option<PathBuf>,
    /// Show a toast with the game's details while it is running
    pub enable_game_toast: bool,
    pub default_sort: SortOrder,
    pub tv_window_title: String,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            pcsx2_exe: PathBuf::from("pcsx2.exe"),
            pcsx2_dir: PathBuf::from("."),
            pcsx2_data_dir: PathBuf::from("."),
            root_dir: PathBuf::from("."),
            library_path: None,
            enable_game_toast: false,
            default_sort: SortOrder::default(),
            tv_window_title: DEFAULT_TV_WINDOW_TITLE.to_string(),
        }
    }
}

impl LauncherSettings {
    /// Create a new settings builder
    pub fn builder() -> LauncherSettingsBuilder {
        LauncherSettingsBuilder::default()
    }

    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let settings: LauncherSettings = toml::from_str(&content)?;
        debug!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or invalid
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "Failed to load settings from {}: {}, using defaults",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save settings to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Settings(e.to_string()))?;
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Root of the per-game configuration directories
    pub fn configs_dir(&self) -> PathBuf {
        self.root_dir.join("Configs")
    }

    pub fn library_path(&self) -> PathBuf {
        self.library_path
            .clone()
            .unwrap_or_else(|| self.root_dir.join(LIBRARY_FILE))
    }

    /// Check that the emulator and data directories are usable.
    ///
    /// Both must be set and exist, and the data directory must contain every
    /// folder in [`REQUIRED_DATA_FOLDERS`].
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.pcsx2_dir.as_os_str().is_empty() {
            problems.push("PCSX2 directory is not set".to_string());
        } else if !self.pcsx2_dir.is_dir() {
            problems.push(format!(
                "PCSX2 directory does not exist: {}",
                self.pcsx2_dir.display()
            ));
        }

        if self.pcsx2_data_dir.as_os_str().is_empty() {
            problems.push("PCSX2 data directory is not set".to_string());
        } else if !self.pcsx2_data_dir.is_dir() {
            problems.push(format!(
                "PCSX2 data directory does not exist: {}",
                self.pcsx2_data_dir.display()
            ));
        } else {
            let missing: Vec<&str> = REQUIRED_DATA_FOLDERS
                .iter()
                .copied()
                .filter(|name| !self.pcsx2_data_dir.join(name).is_dir())
                .collect();
            if !missing.is_empty() {
                problems.push(format!(
                    "PCSX2 data directory is missing: {}",
                    missing.join(", ")
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Settings(problems.join("; ")))
        }
    }
}

/// Builder for LauncherSettings
#[derive(Debug, Clone, Default)]
pub struct LauncherSettingsBuilder {
    pcsx2_exe: Option<PathBuf>,
    pcsx2_dir: Option<PathBuf>,
    pcsx2_data_dir: Option<PathBuf>,
    root_dir: Option<PathBuf>,
    library_path: Option<PathBuf>,
    enable_game_toast: Option<bool>,
    default_sort: Option<SortOrder>,
    tv_window_title: Option<String>,
}

impl LauncherSettingsBuilder {
    pub fn pcsx2_exe<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.pcsx2_exe = Some(path.into());
        self
    }

    pub fn pcsx2_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.pcsx2_dir = Some(path.into());
        self
    }

    pub fn pcsx2_data_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.pcsx2_data_dir = Some(path.into());
        self
    }

    pub fn root_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.root_dir = Some(path.into());
        self
    }

    pub fn library_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.library_path = Some(path.into());
        self
    }

    pub fn enable_game_toast(mut self, enabled: bool) -> Self {
        self.enable_game_toast = Some(enabled);
        self
    }

    pub fn default_sort(mut self, sort: SortOrder) -> Self {
        self.default_sort = Some(sort);
        self
    }

    pub fn tv_window_title<S: Into<String>>(mut self, title: S) -> Self {
        self.tv_window_title = Some(title.into());
        self
    }

    /// Build the settings
    pub fn build(self) -> LauncherSettings {
        let default = LauncherSettings::default();
        LauncherSettings {
            pcsx2_exe: self.pcsx2_exe.unwrap_or(default.pcsx2_exe),
            pcsx2_dir: self.pcsx2_dir.unwrap_or(default.pcsx2_dir),
            pcsx2_data_dir: self.pcsx2_data_dir.unwrap_or(default.pcsx2_data_dir),
            root_dir: self.root_dir.unwrap_or(default.root_dir),
            library_path: self.library_path.or(default.library_path),
            enable_game_toast: self.enable_game_toast.unwrap_or(default.enable_game_toast),
            default_sort: self.default_sort.unwrap_or(default.default_sort),
            tv_window_title: self.tv_window_title.unwrap_or(default.tv_window_title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builder_overrides_defaults() {
        let settings = LauncherSettings::builder()
            .pcsx2_exe("emu/pcsx2.exe")
            .root_dir("bonus")
            .enable_game_toast(true)
            .build();

        assert_eq!(settings.pcsx2_exe, PathBuf::from("emu/pcsx2.exe"));
        assert_eq!(settings.pcsx2_dir, PathBuf::from("."));
        assert!(settings.enable_game_toast);
        assert_eq!(settings.configs_dir(), PathBuf::from("bonus").join("Configs"));
        assert_eq!(
            settings.library_path(),
            PathBuf::from("bonus").join("PCSX2Bonus.xml")
        );
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "pcsx2_exe = 'C:/PCSX2/pcsx2.exe'\ndefault_sort = 'Serial'\n",
        )
        .unwrap();

        let settings = LauncherSettings::load(&path).unwrap();
        assert_eq!(settings.pcsx2_exe, PathBuf::from("C:/PCSX2/pcsx2.exe"));
        assert_eq!(settings.default_sort, SortOrder::Serial);
        assert_eq!(settings.tv_window_title, DEFAULT_TV_WINDOW_TITLE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = LauncherSettings::builder()
            .pcsx2_dir("emu")
            .library_path("lib.xml")
            .build();

        settings.save(&path).unwrap();
        let loaded = LauncherSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let settings = LauncherSettings::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(settings, LauncherSettings::default());
    }

    #[test]
    fn test_validate_reports_missing_data_folders() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        for name in ["inis", "bios", "logs", "memcards"] {
            fs::create_dir_all(data.join(name)).unwrap();
        }

        let settings = LauncherSettings::builder()
            .pcsx2_dir(dir.path())
            .pcsx2_data_dir(&data)
            .build();

        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("snaps"));
        assert!(err.contains("sstates"));

        fs::create_dir_all(data.join("snaps")).unwrap();
        fs::create_dir_all(data.join("sstates")).unwrap();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_dirs() {
        let settings = LauncherSettings::builder()
            .pcsx2_dir("")
            .pcsx2_data_dir("")
            .build();
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("PCSX2 directory is not set"));
        assert!(err.contains("PCSX2 data directory is not set"));
    }
}
