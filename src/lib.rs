pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod view;

#[cfg(test)]
pub(crate) mod test_guards;

pub use catalog::{
    CatalogPage, CatalogProvider, Character, CharacterId, DisplayPolicy, MarvelClient, Thumbnail,
};
pub use config::Config;
pub use debounce::{Debouncer, OneShot, SearchInput, SearchTrigger};
pub use error::{HerodexError, Result};
pub use favorites::{FavoritesStore, FileStore, KeyValueStore, MemoryStore};
pub use view::{LoadOutcome, Tab, Theme, ViewController, ViewMode, ViewModel};
