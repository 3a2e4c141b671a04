//! Remove command: drop games from the library.

use anyhow::{Context, Result, bail};
use ps2bonus::LauncherSettings;

use super::{find_game, load_library};

pub fn run(settings: &LauncherSettings, titles: &[String]) -> Result<()> {
    let library_path = settings.library_path();
    let mut store = load_library(settings)?;
    let games = store.games();

    // Resolve every title first so a typo removes nothing
    let mut resolved = Vec::with_capacity(titles.len());
    for title in titles {
        let index = find_game(&games, title)?;
        resolved.push(games[index].title.as_str());
    }

    let removed = store.remove(&resolved);
    if removed == 0 {
        bail!("Nothing was removed");
    }

    store
        .save(&library_path)
        .with_context(|| format!("Failed to save library to {}", library_path.display()))?;
    println!("Removed {} games", removed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps2bonus::LibraryStore;
    use std::fs;
    use tempfile::tempdir;

    const LIBRARY: &str = "<Games><!-- mine --><Game><Name>Okami</Name></Game><Game><Name>Jak II</Name></Game><Game><Name>Ico</Name></Game></Games>";

    #[test]
    fn test_removes_and_saves() {
        let dir = tempdir().unwrap();
        let library = dir.path().join("PCSX2Bonus.xml");
        fs::write(&library, LIBRARY).unwrap();
        let settings = LauncherSettings::builder().library_path(&library).build();

        run(&settings, &["okami".to_string(), "Ico".to_string()]).unwrap();

        let store = LibraryStore::load(&library).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.find("Jak II").is_some());
        assert!(fs::read_to_string(&library).unwrap().contains("<!-- mine -->"));
    }

    #[test]
    fn test_unknown_title_removes_nothing() {
        let dir = tempdir().unwrap();
        let library = dir.path().join("PCSX2Bonus.xml");
        fs::write(&library, LIBRARY).unwrap();
        let settings = LauncherSettings::builder().library_path(&library).build();

        assert!(run(&settings, &["Okami".to_string(), "Rez".to_string()]).is_err());
        assert_eq!(fs::read_to_string(&library).unwrap(), LIBRARY);
    }
}
