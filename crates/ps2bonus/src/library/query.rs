//! Library search and ordering.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::game::Game;

/// Placeholder text the search box shows when empty
const SEARCH_PLACEHOLDER: &str = "Search";

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Alphabetical,
    Serial,
    /// Library document order
    #[strum(to_string = "Default", serialize = "Unsorted")]
    #[serde(rename = "Default", alias = "Unsorted")]
    Unsorted,
}

/// Games whose title contains `query`, ignoring case.
///
/// An empty query, or the search box placeholder, matches everything.
pub fn filter_by_title<'a>(games: &'a [Game], query: &str) -> Vec<&'a Game> {
    let query = query.trim();
    if query.is_empty() || query == SEARCH_PLACEHOLDER {
        return games.iter().collect();
    }

    let needle = query.to_lowercase();
    games
        .iter()
        .filter(|g| g.title.to_lowercase().contains(&needle))
        .collect()
}

pub fn sort_games(games: &mut [Game], order: SortOrder) {
    match order {
        SortOrder::Alphabetical => games.sort_by_cached_key(|g| g.title.to_lowercase()),
        SortOrder::Serial => games.sort_by_cached_key(|g| g.serial.to_uppercase()),
        SortOrder::Unsorted => {}
    }
}
