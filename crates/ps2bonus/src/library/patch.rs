use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

const CHEATS_DIR: &str = "Cheats";

/// Write a widescreen patch as `<pcsx2_dir>/Cheats/<CRC>.pnach`.
///
/// The CRC is the game's 8 hex digit checksum as PCSX2 reports it; it is
/// stored upper-case. An existing patch for the same CRC is replaced.
pub fn save_widescreen_patch(pcsx2_dir: &Path, crc: &str, contents: &str) -> Result<PathBuf> {
    let crc = crc.trim();
    if crc.len() != 8 || !crc.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidCrc(crc.to_string()));
    }

    let dir = pcsx2_dir.join(CHEATS_DIR);
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{}.pnach", crc.to_ascii_uppercase()));
    fs::write(&path, contents)?;
    info!("Saved widescreen patch to {}", path.display());
    Ok(path)
}
