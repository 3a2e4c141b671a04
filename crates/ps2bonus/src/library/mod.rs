//! Game library: the persisted XML store plus the file helpers around it.

mod patch;
mod query;
mod save_state;
mod store;
mod xml;

pub use patch::save_widescreen_patch;
pub use query::{SortOrder, filter_by_title, sort_games};
pub use save_state::{SaveState, delete_save_states, list_save_states};
pub use store::{GameEntry, LibraryStore};
