use owo_colors::OwoColorize;

use crate::view::Palette;

pub mod cli_formatting;
pub mod data_formatting;
pub mod formatters;

pub use cli_formatting::*;
pub use data_formatting::*;
pub use formatters::CharacterFormatter;

/// Paint `text` in a palette color, leaving it plain if the hex is invalid
pub fn paint(text: &str, hex: &str) -> String {
    match Palette::rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.to_string(),
    }
}
