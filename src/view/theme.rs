//! Color themes.
//!
//! The theme is part of the view state and is handed to the presentation
//! layer through the view model; nothing reads it from global scope.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HerodexError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    WhiteLabel,
}

/// Hex colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub primary: &'static str,
    pub card: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::WhiteLabel];

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: "#ffffff",
                text: "#20232a",
                primary: "#eb8015",
                card: "#f5f5f5",
            },
            Theme::Dark => Palette {
                background: "#20232a",
                text: "#ffffff",
                primary: "#61dafb",
                card: "#2c2f36",
            },
            Theme::WhiteLabel => Palette {
                background: "#f0f0ff",
                text: "#333333",
                primary: "#8a2be2",
                card: "#e6e6fa",
            },
        }
    }

    /// Next theme in the Light, Dark, WhiteLabel cycle
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::WhiteLabel,
            Theme::WhiteLabel => Theme::Light,
        }
    }
}

impl Palette {
    /// Parse a `#rrggbb` color
    pub fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::WhiteLabel => write!(f, "white_label"),
        }
    }
}

impl FromStr for Theme {
    type Err = HerodexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "white_label" | "whitelabel" => Ok(Theme::WhiteLabel),
            _ => Err(HerodexError::InvalidInput(format!(
                "unknown theme '{s}', expected 'light', 'dark' or 'white_label'"
            ))),
        }
    }
}
