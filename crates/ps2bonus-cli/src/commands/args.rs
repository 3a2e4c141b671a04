//! Args command: show how a game would be launched.

use anyhow::Result;
use ps2bonus::{LaunchPlan, LauncherSettings};

use super::{find_game, load_library};

pub fn run(settings: &LauncherSettings, title: &str) -> Result<()> {
    let store = load_library(settings)?;
    let games = store.games();
    let game = &games[find_game(&games, title)?];

    println!("{}", describe(&LaunchPlan::prepare(game, settings)));
    Ok(())
}

fn describe(plan: &LaunchPlan) -> String {
    let config = &plan.config;
    let flags: Vec<&str> = config.flags.enabled().map(|f| f.as_arg()).collect();

    let mut lines = vec![
        format!("executable:  {}", config.executable.display()),
        format!("working dir: {}", config.working_dir.display()),
    ];
    if let Some(dir) = &config.config_dir {
        lines.push(format!("config dir:  {}", dir.display()));
    }
    if let Some(shader) = &config.shader_source {
        lines.push(format!("shader:      {}", shader.display()));
    }
    if !flags.is_empty() {
        lines.push(format!("flags:       {}", flags.join(" ")));
    }
    lines.push(format!("arguments:   {}", plan.arguments));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps2bonus::Game;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_describe_with_overrides() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join("Configs").join("Okami");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("PCSX2Bonus.ini"),
            "[Boot]\nNoGUI=true\nFullBoot=true\n",
        )
        .unwrap();

        let settings = LauncherSettings::builder()
            .pcsx2_exe("pcsx2.exe")
            .pcsx2_dir("emu")
            .root_dir(dir.path())
            .build();
        let game = Game::new("Okami", "okami.iso");
        let text = describe(&LaunchPlan::prepare(&game, &settings));

        assert!(text.contains("executable:  pcsx2.exe"));
        assert!(text.contains("config dir:"));
        assert!(text.contains("flags:       --fullboot --nogui"));
        assert!(text.contains("\"okami.iso\""));
    }
}
