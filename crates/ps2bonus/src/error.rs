use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to find image file: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("A session is already active for {title}")]
    SessionAlreadyActive { title: String },

    #[error("No active session")]
    NoActiveSession,

    #[error("Session for {session} cannot be committed to {game}")]
    SessionMismatch { session: String, game: String },

    #[error("Could not save shader file {}: {source}", .path.display())]
    ShaderCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start {}: {source}", .executable.display())]
    ProcessSpawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed override file {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Failed to parse library store: {0}")]
    LibraryParse(String),

    #[error("Invalid game CRC {0:?}: expected 8 hex digits")]
    InvalidCrc(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::ImageNotFound(_) => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            Error::ShaderCopy { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_image_not_found_message() {
        let err = Error::ImageNotFound(PathBuf::from("missing.iso"));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing.iso"));
    }
}
