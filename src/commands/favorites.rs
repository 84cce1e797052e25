use owo_colors::OwoColorize;
use serde_json::json;

use crate::catalog::CharacterId;
use crate::config::Config;
use crate::display::{format_view, view_json};
use crate::error::Result;
use crate::view::Tab;

use super::{CommandOutput, open_controller};

/// List favorite characters
pub async fn cmd_favorites(config: &Config, output_json: bool) -> Result<()> {
    let mut controller = open_controller(config)?;
    controller.hydrate_favorites().await;
    controller.select_tab(Tab::Favorites);

    let vm = controller.view_model();
    CommandOutput::new(view_json(&vm))
        .with_text(format_view(&vm))
        .print(output_json)
}

/// Add a character to favorites, or remove it if already there
pub async fn cmd_favorite_toggle(config: &Config, id: CharacterId, output_json: bool) -> Result<()> {
    let mut controller = open_controller(config)?;
    let known_name = controller.lookup(id).map(|c| c.name.clone());

    let is_favorite = controller.toggle_favorite_fetching(id).await?;
    let name = known_name
        .or_else(|| controller.lookup(id).map(|c| c.name.clone()))
        .unwrap_or_else(|| id.to_string());

    let text = if is_favorite {
        format!("{} {}", "Added to favorites:".green(), name.bold())
    } else {
        format!("{} {}", "Removed from favorites:".yellow(), name.bold())
    };

    CommandOutput::new(json!({
        "id": id,
        "name": name,
        "favorite": is_favorite,
        "favorite_count": controller.favorites().count(),
    }))
    .with_text(text)
    .print(output_json)
}
