//! Save state listing and deletion.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ps2bonus::{LauncherSettings, SaveState, delete_save_states, list_save_states};

use super::{find_game, load_library};

/// Which save states to delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    ListOnly,
    Slots(Vec<u8>),
    All,
}

pub fn run(settings: &LauncherSettings, title: &str, delete: &Deletion) -> Result<()> {
    let store = load_library(settings)?;
    let games = store.games();
    let game = &games[find_game(&games, title)?];

    let states = list_save_states(game, &settings.pcsx2_data_dir)
        .with_context(|| format!("Failed to read save states for {}", game.title))?;

    if *delete == Deletion::ListOnly {
        print_states(&states);
        return Ok(());
    }

    let selected = select(&states, delete);
    let remaining = delete_save_states(states, &selected)?;
    eprintln!(
        "Deleted {} save states, {} left",
        selected.len(),
        remaining.len()
    );
    print_states(&remaining);
    Ok(())
}

/// Paths of the states chosen for deletion
fn select(states: &[SaveState], delete: &Deletion) -> Vec<PathBuf> {
    states
        .iter()
        .filter(|s| match delete {
            Deletion::ListOnly => false,
            Deletion::Slots(slots) => s.slot.is_some_and(|slot| slots.contains(&slot)),
            Deletion::All => true,
        })
        .map(|s| s.path.clone())
        .collect()
}

fn print_states(states: &[SaveState]) {
    if states.is_empty() {
        eprintln!("No save states");
        return;
    }
    for state in states {
        let slot = state
            .slot
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let modified = state
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("{:>4}  {:<16}  {}", slot, modified, state.file_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn state(slot: Option<u8>) -> SaveState {
        SaveState {
            path: PathBuf::from(format!("{slot:?}.p2s")),
            slot,
            modified: None,
        }
    }

    #[test]
    fn test_select() {
        let states = vec![state(Some(0)), state(Some(1)), state(None)];
        assert!(select(&states, &Deletion::ListOnly).is_empty());
        assert_eq!(select(&states, &Deletion::All).len(), 3);
        assert_eq!(
            select(&states, &Deletion::Slots(vec![1, 7])),
            vec![PathBuf::from("Some(1).p2s")]
        );
    }

    #[test]
    fn test_only_selected_slots_are_deleted() {
        let dir = tempdir().unwrap();
        let sstates = dir.path().join("sstates");
        fs::create_dir(&sstates).unwrap();
        let slot0 = sstates.join("SLUS-21115 (0C88A7EA).00.p2s");
        let slot1 = sstates.join("SLUS-21115 (0C88A7EA).01.p2s");
        fs::write(&slot0, b"state").unwrap();
        fs::write(&slot1, b"state").unwrap();

        let library = dir.path().join("PCSX2Bonus.xml");
        fs::write(
            &library,
            "<Games><Game><Name>Okami</Name><Serial>SLUS-21115</Serial></Game></Games>",
        )
        .unwrap();
        let settings = LauncherSettings::builder()
            .pcsx2_data_dir(dir.path())
            .library_path(&library)
            .build();

        run(&settings, "Okami", &Deletion::ListOnly).unwrap();
        assert!(slot0.exists() && slot1.exists());

        run(&settings, "Okami", &Deletion::Slots(vec![1])).unwrap();
        assert!(slot0.exists());
        assert!(!slot1.exists());

        run(&settings, "Okami", &Deletion::All).unwrap();
        assert!(!slot0.exists());
    }
}
