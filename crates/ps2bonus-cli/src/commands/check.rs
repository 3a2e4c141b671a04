//! Check command: startup validation of the emulator setup.

use std::path::Path;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use ps2bonus::LauncherSettings;

use super::load_library;

pub fn run(settings: &LauncherSettings, settings_path: &Path) -> Result<()> {
    eprintln!("Settings: {}", settings_path.display());
    eprintln!("PCSX2:    {}", settings.pcsx2_exe.display());
    eprintln!("Data:     {}", settings.pcsx2_data_dir.display());

    let problems = problems(settings);
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("{} {}", "x".red(), problem);
        }
        bail!("Setup is incomplete ({} problems)", problems.len());
    }

    let store = load_library(settings)?;
    println!(
        "{} Setup OK, {} games in {}",
        "ok".green(),
        store.len(),
        settings.library_path().display()
    );
    Ok(())
}

fn problems(settings: &LauncherSettings) -> Vec<String> {
    let mut problems = Vec::new();
    if let Err(e) = settings.validate() {
        match e {
            ps2bonus::Error::Settings(message) => {
                problems.extend(message.split("; ").map(str::to_string))
            }
            other => problems.push(other.to_string()),
        }
    }
    // A bare program name is looked up on PATH at launch
    let exe = &settings.pcsx2_exe;
    if exe.components().count() > 1 && !exe.is_file() {
        problems.push(format!("PCSX2 executable does not exist: {}", exe.display()));
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_complete_setup_has_no_problems() {
        let dir = tempdir().unwrap();
        for name in ps2bonus::settings::REQUIRED_DATA_FOLDERS {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        let exe = dir.path().join("pcsx2.exe");
        fs::write(&exe, b"").unwrap();

        let settings = LauncherSettings::builder()
            .pcsx2_exe(&exe)
            .pcsx2_dir(dir.path())
            .pcsx2_data_dir(dir.path())
            .build();
        assert!(problems(&settings).is_empty());
    }

    #[test]
    fn test_reports_each_problem() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("bios")).unwrap();

        let settings = LauncherSettings::builder()
            .pcsx2_exe(dir.path().join("missing").join("pcsx2.exe"))
            .pcsx2_dir(dir.path())
            .pcsx2_data_dir(dir.path())
            .build();
        let problems = problems(&settings);

        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("inis"));
        assert!(!problems[0].contains("bios"));
        assert!(problems[1].contains("executable"));
    }
}
