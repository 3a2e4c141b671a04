//! Per-game override file (`PCSX2Bonus.ini`).
//!
//! ```ini
//! [Additional Executables]
//! Default=C:\PCSX2-dev\pcsx2.exe
//! [Boot]
//! NoGUI=true
//! UseCD=false
//! NoHacks=false
//! FullBoot=true
//! [Shader]
//! Default=C:\Shaders\crt.fx
//! ```
//!
//! Section and key lookups are case-insensitive. Flag values are parsed as
//! booleans; anything other than `true` means off.

use std::fs;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};
use tracing::debug;

use crate::error::{Error, Result};

/// Name of the override file inside a game's config directory
pub const OVERRIDE_FILE_NAME: &str = "PCSX2Bonus.ini";

const EXECUTABLES_SECTION: &str = "Additional Executables";
const BOOT_SECTION: &str = "Boot";
const SHADER_SECTION: &str = "Shader";
const DEFAULT_KEY: &str = "Default";

/// Emulator boot flag.
///
/// Variants are declared in command-line order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr, Display,
)]
pub enum BootFlag {
    #[strum(serialize = "--fullboot")]
    FullBoot,
    #[strum(serialize = "--nohacks")]
    NoHacks,
    #[strum(serialize = "--usecd")]
    UseCd,
    #[strum(serialize = "--nogui")]
    NoGui,
}

impl BootFlag {
    /// Command-line switch for this flag
    pub fn as_arg(&self) -> &'static str {
        self.into()
    }

    /// Key under `[Boot]` in the override file
    pub fn ini_key(&self) -> &'static str {
        match self {
            Self::FullBoot => "FullBoot",
            Self::NoHacks => "NoHacks",
            Self::UseCd => "UseCD",
            Self::NoGui => "NoGUI",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BootFlags {
    pub no_gui: bool,
    pub use_cd: bool,
    pub no_hacks: bool,
    pub full_boot: bool,
}

impl BootFlags {
    pub fn is_set(&self, flag: BootFlag) -> bool {
        match flag {
            BootFlag::FullBoot => self.full_boot,
            BootFlag::NoHacks => self.no_hacks,
            BootFlag::UseCd => self.use_cd,
            BootFlag::NoGui => self.no_gui,
        }
    }

    pub fn set(&mut self, flag: BootFlag, value: bool) {
        match flag {
            BootFlag::FullBoot => self.full_boot = value,
            BootFlag::NoHacks => self.no_hacks = value,
            BootFlag::UseCd => self.use_cd = value,
            BootFlag::NoGui => self.no_gui = value,
        }
    }

    /// Enabled flags in command-line order
    pub fn enabled(&self) -> impl Iterator<Item = BootFlag> + '_ {
        BootFlag::iter().filter(|flag| self.is_set(*flag))
    }
}

/// Parsed contents of a per-game override file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameOverrides {
    pub executable: Option<PathBuf>,
    pub flags: BootFlags,
    pub shader: Option<PathBuf>,
}

impl GameOverrides {
    /// Read and parse an override file.
    ///
    /// The file is decoded as UTF-8 (or UTF-16 with a BOM), falling back to
    /// Windows-1252 for legacy ANSI files.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let text = decode_ini_bytes(&bytes);
        Self::parse(&text).map_err(|message| Error::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse override file contents
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        // Values are raw Windows paths: no escapes, no quote stripping
        let option = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, option).map_err(|e| e.to_string())?;

        let executable = lookup(&ini, EXECUTABLES_SECTION, DEFAULT_KEY).map(PathBuf::from);
        let shader = lookup(&ini, SHADER_SECTION, DEFAULT_KEY).map(PathBuf::from);

        let mut flags = BootFlags::default();
        for flag in BootFlag::iter() {
            flags.set(flag, parse_flag(lookup(&ini, BOOT_SECTION, flag.ini_key())));
        }

        Ok(Self {
            executable,
            flags,
            shader,
        })
    }
}

/// Parse a flag value, defaulting to `false` when missing or not a boolean
fn parse_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => v.parse::<bool>().unwrap_or_else(|_| {
            debug!("Ignoring non-boolean boot flag value: {:?}", v);
            false
        }),
        None => false,
    }
}

/// Look up a non-empty value, ignoring case in section and key names
fn lookup<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    ini.iter()
        .filter(|(name, _)| name.is_some_and(|n| n.trim().eq_ignore_ascii_case(section)))
        .flat_map(|(_, props)| props.iter())
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

fn decode_ini_bytes(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_file() {
        let content = "\
[Additional Executables]
Default=C:\\PCSX2-dev\\pcsx2.exe
[Boot]
NoGUI=true
UseCD=false
NoHacks=true
FullBoot=true
[Shader]
Default=C:\\Shaders\\crt.fx
";
        let overrides = GameOverrides::parse(content).unwrap();
        assert_eq!(
            overrides.executable,
            Some(PathBuf::from("C:\\PCSX2-dev\\pcsx2.exe"))
        );
        assert_eq!(overrides.shader, Some(PathBuf::from("C:\\Shaders\\crt.fx")));
        assert!(overrides.flags.no_gui);
        assert!(!overrides.flags.use_cd);
        assert!(overrides.flags.no_hacks);
        assert!(overrides.flags.full_boot);
    }

    #[test]
    fn test_non_boolean_flags_are_off() {
        let content = "[Boot]\nNoGUI=yes\nUseCD=True\nNoHacks=1\nFullBoot=\n";
        let overrides = GameOverrides::parse(content).unwrap();
        assert_eq!(overrides.flags, BootFlags::default());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let content = "[boot]\nfullboot=true\n[ADDITIONAL EXECUTABLES]\ndefault=pcsx2-qt.exe\n";
        let overrides = GameOverrides::parse(content).unwrap();
        assert!(overrides.flags.full_boot);
        assert_eq!(overrides.executable, Some(PathBuf::from("pcsx2-qt.exe")));
    }

    #[test]
    fn test_empty_values_are_none() {
        let content = "[Additional Executables]\nDefault=\n[Shader]\nDefault=   \n";
        let overrides = GameOverrides::parse(content).unwrap();
        assert_eq!(overrides.executable, None);
        assert_eq!(overrides.shader, None);
    }

    #[test]
    fn test_enabled_flags_in_command_line_order() {
        let flags = BootFlags {
            no_gui: true,
            use_cd: false,
            no_hacks: true,
            full_boot: true,
        };
        let enabled: Vec<BootFlag> = flags.enabled().collect();
        assert_eq!(
            enabled,
            vec![BootFlag::FullBoot, BootFlag::NoHacks, BootFlag::NoGui]
        );
        assert_eq!(BootFlag::UseCd.as_arg(), "--usecd");
    }

    #[test]
    fn test_load_windows_1252_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(OVERRIDE_FILE_NAME);
        // "Pokémon" with a Windows-1252 é
        let mut bytes = b"[Shader]\nDefault=Pok".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"mon.fx\n[Boot]\nNoHacks=true\n");
        fs::write(&path, bytes).unwrap();

        let overrides = GameOverrides::load(&path).unwrap();
        assert_eq!(overrides.shader, Some(PathBuf::from("Pokémon.fx")));
        assert!(overrides.flags.no_hacks);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = GameOverrides::load(dir.path().join(OVERRIDE_FILE_NAME)).unwrap_err();
        assert!(err.is_not_found());
    }
}
