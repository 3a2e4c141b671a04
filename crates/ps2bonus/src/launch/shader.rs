use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

/// File name PCSX2 loads its post-processing shader from
pub const SHADER_TARGET_NAME: &str = "shader.fx";

/// Copy a per-game shader into the emulator directory, overwriting any existing one.
///
/// Returns the installed path, or `None` when there is nothing to install.
pub fn install_shader(source: Option<&Path>, emulator_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(source) = source.filter(|s| !s.as_os_str().is_empty()) else {
        return Ok(None);
    };

    let target = emulator_dir.join(SHADER_TARGET_NAME);
    fs::copy(source, &target).map_err(|e| Error::ShaderCopy {
        path: source.to_path_buf(),
        source: e,
    })?;

    info!("Installed shader {} -> {}", source.display(), target.display());
    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_no_source_is_noop() {
        let dir = tempdir().unwrap();
        assert!(install_shader(None, dir.path()).unwrap().is_none());
        assert!(install_shader(Some(Path::new("")), dir.path()).unwrap().is_none());
        assert!(!dir.path().join(SHADER_TARGET_NAME).exists());
    }

    #[test]
    fn test_copy_overwrites_existing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("crt.fx");
        fs::write(&source, "new shader").unwrap();
        let emulator = dir.path().join("pcsx2");
        fs::create_dir_all(&emulator).unwrap();
        fs::write(emulator.join(SHADER_TARGET_NAME), "old shader").unwrap();

        let installed = install_shader(Some(source.as_path()), &emulator).unwrap().unwrap();
        assert_eq!(installed, emulator.join(SHADER_TARGET_NAME));
        assert_eq!(fs::read_to_string(installed).unwrap(), "new shader");
    }

    #[test]
    fn test_missing_source_is_shader_copy_error() {
        let dir = tempdir().unwrap();
        let err = install_shader(Some(dir.path().join("missing.fx").as_path()), dir.path()).unwrap_err();
        assert!(matches!(err, Error::ShaderCopy { .. }));
        assert!(err.is_not_found());
    }
}
