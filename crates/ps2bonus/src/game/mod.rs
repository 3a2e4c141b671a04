mod play_time;

pub use play_time::*;

use std::path::PathBuf;
use std::time::Duration;

/// Characters Windows rejects in file names
const INVALID_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum title length shown in the "currently playing" status
pub const STATUS_TITLE_LIMIT: usize = 40;

/// A game in the user's library
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub serial: String,
    pub title: String,
    pub region: String,
    /// Disc image location
    pub location: PathBuf,
    /// Cumulative play-time across all sessions
    pub play_time: Duration,
    pub compatibility: i32,
    pub description: Option<String>,
    pub image_path: Option<PathBuf>,
}

impl Game {
    pub fn new<T: Into<String>, L: Into<PathBuf>>(title: T, location: L) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            ..Default::default()
        }
    }

    /// Title with every character that is invalid in a Windows file name removed.
    ///
    /// Used as the directory name of the game's per-game configuration.
    pub fn file_safe_title(&self) -> String {
        let safe: String = self
            .title
            .chars()
            .filter(|c| !c.is_control() && !INVALID_FILE_NAME_CHARS.contains(c))
            .collect();
        safe.trim_end_matches(['.', ' ']).trim_start().to_string()
    }

    /// Title truncated for status displays, with an ellipsis when shortened
    pub fn short_title(&self, limit: usize) -> String {
        if self.title.chars().count() <= limit {
            return self.title.clone();
        }
        let truncated: String = self.title.chars().take(limit).collect();
        format!("{}...", truncated.trim_end())
    }
}
