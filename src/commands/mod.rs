//! Command implementations for the `herodex` binary.
//!
//! Each command builds a [`ViewController`], drives it through the named
//! operations and prints the resulting view model as text or JSON.

mod browse;
mod config;
mod favorites;
mod interactive;
mod search;
mod show;

pub use browse::cmd_browse;
pub use config::cmd_config_show;
pub use favorites::{cmd_favorite_toggle, cmd_favorites};
pub use interactive::{InteractiveCommand, cmd_interactive};
pub use search::cmd_search;
pub use show::cmd_show;

use serde_json::Value;

use crate::catalog::MarvelClient;
use crate::config::Config;
use crate::debounce::OneShot;
use crate::error::Result;
use crate::favorites::{FavoritesStore, FileStore};
use crate::view::{LoadOutcome, ViewController};

/// Controller wired to the live catalog and on-disk favorites
pub type AppController = ViewController<MarvelClient, FileStore>;

/// Output of a command in both of its forms
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output_json: bool) -> Result<()> {
        match self.text {
            Some(text) if !output_json => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}

/// Build the controller from configuration
pub fn open_controller(config: &Config) -> Result<AppController> {
    let client = MarvelClient::from_config(config)?;
    let store = FileStore::new(config.data_dir()?);
    let favorites = FavoritesStore::load_initial(store);
    Ok(ViewController::from_config(client, favorites, config))
}

/// Load page 1, announcing it on stderr only if it takes a while
pub async fn load_with_splash(
    controller: &mut AppController,
    config: &Config,
    quiet: bool,
) -> LoadOutcome {
    let splash = (!quiet).then(|| {
        OneShot::start(config.splash_delay(), || {
            eprintln!("Loading characters...");
        })
    });
    let outcome = controller.load_initial().await;
    drop(splash);
    outcome
}
