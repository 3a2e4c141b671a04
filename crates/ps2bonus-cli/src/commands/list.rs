//! List command for browsing the library.

use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;
use ps2bonus::{Game, LauncherSettings, SortOrder, filter_by_title, format_play_time, sort_games};
use serde::Serialize;

use super::load_library;

#[derive(Debug, Serialize, PartialEq)]
struct GameRow {
    title: String,
    serial: String,
    region: String,
    location: String,
    play_time: String,
}

impl From<&Game> for GameRow {
    fn from(game: &Game) -> Self {
        Self {
            title: game.title.clone(),
            serial: game.serial.clone(),
            region: game.region.clone(),
            location: game.location.display().to_string(),
            play_time: format_play_time(Duration::from_secs(game.play_time.as_secs())),
        }
    }
}

pub fn run(
    settings: &LauncherSettings,
    search: Option<&str>,
    sort: Option<SortOrder>,
    json: bool,
) -> Result<()> {
    let store = load_library(settings)?;
    let rows = rows(store.games(), search, sort.unwrap_or(settings.default_sort));

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        eprintln!("No games found");
        return Ok(());
    }

    let width = rows.iter().map(|r| r.title.chars().count()).max().unwrap_or(0);
    for row in &rows {
        println!(
            "{:<width$}  {:<10}  {:<8}  {}",
            row.title.bold(),
            row.serial,
            row.region,
            row.play_time.green(),
            width = width
        );
    }
    eprintln!("{} games", rows.len());
    Ok(())
}

fn rows(mut games: Vec<Game>, search: Option<&str>, sort: SortOrder) -> Vec<GameRow> {
    sort_games(&mut games, sort);
    filter_by_title(&games, search.unwrap_or_default())
        .into_iter()
        .map(GameRow::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games() -> Vec<Game> {
        vec![
            Game {
                serial: "SLUS-21115".to_string(),
                play_time: Duration::from_millis(3_723_500),
                ..Game::new("Okami", "C:\\Games\\Okami.iso")
            },
            Game {
                serial: "SCUS-97265".to_string(),
                ..Game::new("Jak II", "C:\\Games\\Jak2.iso")
            },
        ]
    }

    #[test]
    fn test_rows_sorted_and_filtered() {
        let all = rows(games(), None, SortOrder::Alphabetical);
        assert_eq!(all[0].title, "Jak II");
        assert_eq!(all[1].play_time, "01:02:03");

        let hits = rows(games(), Some("oka"), SortOrder::Unsorted);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].serial, "SLUS-21115");
    }

    #[test]
    fn test_rows_serialize() {
        let rows = rows(games(), Some("jak"), SortOrder::Serial);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["title"], "Jak II");
        assert_eq!(json[0]["play_time"], "00:00:00");
    }
}
