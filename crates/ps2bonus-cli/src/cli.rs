use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ps2bonus::SortOrder;

#[derive(Parser)]
#[command(name = "ps2bonus")]
#[command(version, about = "PCSX2 game library launcher")]
pub struct Cli {
    /// Settings file (defaults to <config dir>/ps2bonus/settings.toml)
    #[arg(short, long, global = true, env = "PS2BONUS_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Launch a game and wait for the emulator to exit
    Launch {
        /// Game title as stored in the library
        title: String,

        /// Return focus to the full-screen window when the session ends
        #[arg(long)]
        tv: bool,
    },

    /// List the games in the library
    List {
        /// Only show titles containing this text
        #[arg(long)]
        search: Option<String>,

        /// Sort order: alphabetical, serial or default
        #[arg(long)]
        sort: Option<SortOrder>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate the emulator and data directories
    Check,

    /// List a game's save states, or delete them with --slot or --all
    States {
        title: String,

        /// Delete the save states in the given slots
        #[arg(long, value_delimiter = ',', conflicts_with = "all")]
        slot: Vec<u8>,

        /// Delete every save state of the game
        #[arg(long)]
        all: bool,
    },

    /// Remove games from the library
    Remove {
        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Install a widescreen patch for a game
    Patch {
        title: String,

        /// Game CRC as shown by PCSX2 (8 hex digits)
        #[arg(long)]
        crc: String,

        /// File containing the patch text
        #[arg(long)]
        file: PathBuf,
    },

    /// Show the command line a launch would use, without starting it
    Args { title: String },
}
