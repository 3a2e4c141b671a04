mod cli;
mod commands;
mod console;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ps2bonus::LauncherSettings;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "ps2bonus=debug"
    } else {
        "ps2bonus=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let settings_path = match cli.settings {
        Some(path) => path,
        None => default_settings_path()?,
    };
    debug!("Using settings file {}", settings_path.display());
    let settings = LauncherSettings::load_or_default(&settings_path);

    match cli.command {
        Command::Launch { title, tv } => commands::launch::run(settings, &title, tv),
        Command::List { search, sort, json } => {
            commands::list::run(&settings, search.as_deref(), sort, json)
        }
        Command::Check => commands::check::run(&settings, &settings_path),
        Command::States { title, slot, all } => {
            let delete = if all {
                commands::states::Deletion::All
            } else if slot.is_empty() {
                commands::states::Deletion::ListOnly
            } else {
                commands::states::Deletion::Slots(slot)
            };
            commands::states::run(&settings, &title, &delete)
        }
        Command::Remove { titles } => commands::remove::run(&settings, &titles),
        Command::Patch { title, crc, file } => commands::patch::run(&settings, &title, &crc, &file),
        Command::Args { title } => commands::args::run(&settings, &title),
    }
}

fn default_settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
    Ok(config_dir.join("ps2bonus").join("settings.toml"))
}
