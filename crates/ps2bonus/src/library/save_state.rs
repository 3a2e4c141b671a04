//! Save state files in the emulator's `sstates` folder.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::error::Result;
use crate::game::Game;

const SAVE_STATE_DIR: &str = "sstates";
const SAVE_STATE_EXTENSION: &str = "p2s";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveState {
    pub path: PathBuf,
    /// Slot number parsed from a `.NN.p2s` suffix
    pub slot: Option<u8>,
    pub modified: Option<DateTime<Local>>,
}

impl SaveState {
    fn from_path(path: PathBuf) -> Self {
        let slot = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.rsplit_once('.'))
            .and_then(|(_, slot)| slot.parse().ok());
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);
        Self {
            path,
            slot,
            modified,
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Save states belonging to `game`, ordered by slot.
///
/// A state belongs to a game when its file name starts with the game's
/// serial. A missing `sstates` folder means there are none.
pub fn list_save_states(game: &Game, data_dir: &Path) -> Result<Vec<SaveState>> {
    let serial = game.serial.trim().to_uppercase();
    if serial.is_empty() {
        debug!("{} has no serial, skipping save state lookup", game.title);
        return Ok(Vec::new());
    }

    let dir = data_dir.join(SAVE_STATE_DIR);
    let read_dir = match fs::read_dir(&dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut states = Vec::new();
    for entry in read_dir {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_state = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SAVE_STATE_EXTENSION));
        let matches_serial = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().to_uppercase().starts_with(&serial));
        if is_state && matches_serial {
            states.push(SaveState::from_path(path));
        }
    }

    states.sort_by(|a, b| {
        (a.slot.is_none(), a.slot, &a.path).cmp(&(b.slot.is_none(), b.slot, &b.path))
    });
    debug!("Found {} save states for {}", states.len(), game.title);
    Ok(states)
}

/// Delete every state in `selected` and return the ones left over.
pub fn delete_save_states(states: Vec<SaveState>, selected: &[PathBuf]) -> Result<Vec<SaveState>> {
    let mut remaining = Vec::with_capacity(states.len());
    for state in states {
        if selected.contains(&state.path) {
            fs::remove_file(&state.path)?;
            info!("Deleted save state {}", state.path.display());
        } else {
            remaining.push(state);
        }
    }
    Ok(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn okami() -> Game {
        Game {
            serial: "SLUS-21115".to_string(),
            ..Game::new("Okami", "okami.iso")
        }
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"state").unwrap();
        path
    }

    #[test]
    fn test_list_matches_serial_and_extension() {
        let data = tempdir().unwrap();
        let sstates = data.path().join("sstates");
        fs::create_dir(&sstates).unwrap();

        touch(&sstates, "SLUS-21115 (0C88A7EA).02.p2s");
        touch(&sstates, "slus-21115 (0C88A7EA).00.P2S");
        touch(&sstates, "SLUS-21115 (0C88A7EA).backup");
        touch(&sstates, "SCUS-97265 (5E115FB6).00.p2s");

        let states = list_save_states(&okami(), data.path()).unwrap();
        let slots: Vec<_> = states.iter().map(|s| s.slot).collect();
        assert_eq!(slots, [Some(0), Some(2)]);
        assert!(states.iter().all(|s| s.modified.is_some()));
        assert_eq!(states[1].file_name(), "SLUS-21115 (0C88A7EA).02.p2s");
    }

    #[test]
    fn test_list_without_folder_or_serial() {
        let data = tempdir().unwrap();
        assert!(list_save_states(&okami(), data.path()).unwrap().is_empty());

        fs::create_dir(data.path().join("sstates")).unwrap();
        touch(&data.path().join("sstates"), "anything.p2s");
        let unknown = Game::new("Homebrew", "homebrew.elf");
        assert!(list_save_states(&unknown, data.path()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_returns_survivors() {
        let data = tempdir().unwrap();
        let sstates = data.path().join("sstates");
        fs::create_dir(&sstates).unwrap();
        let first = touch(&sstates, "SLUS-21115 (0C88A7EA).00.p2s");
        let second = touch(&sstates, "SLUS-21115 (0C88A7EA).01.p2s");

        let states = list_save_states(&okami(), data.path()).unwrap();
        let remaining = delete_save_states(states, std::slice::from_ref(&first)).unwrap();

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].path, second);
        assert!(!first.exists());
        assert!(second.exists());
    }
}
