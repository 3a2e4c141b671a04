//! Persisted library store.
//!
//! The library is an XML document with one `Game` element per game:
//!
//! ```xml
//! <Games>
//!   <Game>
//!     <Name>Okami</Name>
//!     <Serial>SLUS-21115</Serial>
//!     <Region>NTSC-U</Region>
//!     <Location>C:\Games\Okami.iso</Location>
//!     <Time>01:42:10</Time>
//!   </Game>
//! </Games>
//! ```
//!
//! The whole document is kept, including attributes, comments and elements
//! this crate does not interpret, so saving never drops data written by other
//! tools. Only `Time` is ever rewritten, and whole `Game` elements removed.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::xml::{Document, Element, Node};
use crate::error::Result;
use crate::game::{Game, format_play_time, parse_play_time};

const ROOT_ELEMENT: &str = "Games";
const GAME_ELEMENT: &str = "Game";

const NAME: &str = "Name";
const SERIAL: &str = "Serial";
const REGION: &str = "Region";
const LOCATION: &str = "Location";
const DESCRIPTION: &str = "Description";
const IMAGE_PATH: &str = "ImagePath";
const COMPATIBILITY: &str = "Compatibility";
const TIME: &str = "Time";

/// Read-only view of one `Game` element
#[derive(Debug, Clone, Copy)]
pub struct GameEntry<'a> {
    element: &'a Element,
}

impl<'a> GameEntry<'a> {
    /// Text of the first child element called `name`
    pub fn get(&self, name: &str) -> Option<String> {
        self.element.child(name).map(|e| e.text().into_owned())
    }

    pub fn has(&self, name: &str) -> bool {
        self.element.child(name).is_some()
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element.attribute(name)
    }

    pub fn title(&self) -> Option<String> {
        self.get(NAME)
    }

    /// Build the in-memory game record for this entry
    pub fn to_game(&self) -> Game {
        let text = |name: &str| self.get(name).unwrap_or_default();
        let optional = |name: &str| self.get(name).filter(|v| !v.trim().is_empty());

        let play_time = match self.get(TIME) {
            Some(raw) => parse_play_time(&raw).unwrap_or_else(|| {
                warn!("Invalid play-time {:?} for {}, using zero", raw, text(NAME));
                Duration::ZERO
            }),
            None => Duration::ZERO,
        };

        Game {
            serial: text(SERIAL),
            title: text(NAME),
            region: text(REGION),
            location: PathBuf::from(text(LOCATION)),
            play_time,
            compatibility: self
                .get(COMPATIBILITY)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            description: optional(DESCRIPTION),
            image_path: optional(IMAGE_PATH).map(PathBuf::from),
        }
    }
}

/// In-memory representation of the library XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryStore {
    document: Document,
}

impl Default for LibraryStore {
    fn default() -> Self {
        Self {
            document: Document::new(Element::new(ROOT_ELEMENT)),
        }
    }
}

impl LibraryStore {
    /// Load the store from disk. A missing file yields an empty library.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No library at {}, starting empty", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let store = Self::from_xml_str(&content)?;
        debug!("Loaded {} games from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let xml = self.to_xml_string()?;
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path.as_ref(), xml)?;
        info!("Saved library to {}", path.as_ref().display());
        Ok(())
    }

    pub fn from_xml_str(xml: &str) -> Result<Self> {
        Ok(Self {
            document: Document::parse(xml)?,
        })
    }

    pub fn to_xml_string(&self) -> Result<String> {
        self.document.to_xml_string()
    }

    /// `Game` entries in document order
    pub fn entries(&self) -> impl Iterator<Item = GameEntry<'_>> {
        self.document
            .root
            .elements()
            .filter(|e| e.name == GAME_ELEMENT)
            .map(|element| GameEntry { element })
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// First entry whose `Name` is exactly `title`
    pub fn find(&self, title: &str) -> Option<GameEntry<'_>> {
        self.entries()
            .find(|e| e.title().as_deref() == Some(title))
    }

    /// Raw `Time` text of the entry named `title`
    pub fn play_time_of(&self, title: &str) -> Option<String> {
        self.find(title).and_then(|e| e.get(TIME))
    }

    /// Write a new cumulative play-time to an existing record.
    ///
    /// Only the `Time` element of the first entry whose `Name` matches is
    /// touched. Returns `false` without changing anything when there is no
    /// such entry or it has no `Time` element; records are never created here.
    pub fn update_play_time(&mut self, title: &str, total: Duration) -> bool {
        let Some(entry) = self
            .document
            .root
            .elements_mut()
            .find(|e| is_game_titled(e, title))
        else {
            return false;
        };
        let Some(time) = entry.elements_mut().find(|e| e.name == TIME) else {
            return false;
        };
        time.set_text(&format_play_time(total));
        true
    }

    /// Remove every entry whose `Name` matches one of `titles`.
    ///
    /// Returns the number of entries removed.
    pub fn remove(&mut self, titles: &[&str]) -> usize {
        let before = self.document.root.children.len();
        self.document.root.children.retain(|node| match node {
            Node::Element(e) => !titles.iter().any(|title| is_game_titled(e, title)),
            _ => true,
        });
        let removed = before - self.document.root.children.len();
        if removed > 0 {
            info!("Removed {} games from the library", removed);
        }
        removed
    }

    /// Game records for every entry, in document order
    pub fn games(&self) -> Vec<Game> {
        self.entries().map(|e| e.to_game()).collect()
    }
}

fn is_game_titled(element: &Element, title: &str) -> bool {
    element.name == GAME_ELEMENT && element.child(NAME).is_some_and(|name| name.text() == title)
}
