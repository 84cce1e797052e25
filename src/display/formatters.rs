//! Multi-line formatters for the detail view

use owo_colors::OwoColorize;

use super::paint;
use crate::view::{DetailViewModel, Palette};

/// Related entries listed per section before eliding the rest
const SECTION_LIMIT: usize = 10;

pub struct CharacterFormatter;

impl CharacterFormatter {
    /// Format the detail view of one character
    pub fn format_detail(detail: &DetailViewModel, palette: &Palette) -> String {
        let mut out = String::new();
        let star = if detail.is_favorite { " ★" } else { "" };
        out.push_str(&format!(
            "{}{}\n",
            paint(&detail.name, palette.primary).bold(),
            star.yellow()
        ));
        out.push_str(&format!("{} {}\n", "id:".dimmed(), detail.id));
        out.push_str(&format!("{} {}\n", "image:".dimmed(), detail.thumbnail_url));
        if let Some(modified) = &detail.modified {
            out.push_str(&format!("{} {}\n", "modified:".dimmed(), modified));
        }

        out.push('\n');
        if detail.description.is_empty() {
            out.push_str(&format!("{}\n", "No description available.".dimmed()));
        } else {
            out.push_str(&detail.description);
            out.push('\n');
        }

        out.push_str(&Self::format_section(
            &format!("Comics ({})", detail.comics_available),
            &detail.comics,
        ));
        out.push_str(&Self::format_section("Series", &detail.series));
        out.push_str(&Self::format_section("Stories", &detail.stories));
        out.push_str(&Self::format_section("Events", &detail.events));

        if !detail.links.is_empty() {
            out.push_str(&format!("\n{}\n", "Links".cyan().bold()));
            for (kind, url) in &detail.links {
                out.push_str(&format!("- {kind}: {url}\n"));
            }
        }
        out
    }

    /// Format a titled bullet list, eliding entries past the limit
    pub fn format_section(title: &str, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        let mut out = format!("\n{}\n", title.cyan().bold());
        for item in items.iter().take(SECTION_LIMIT) {
            out.push_str(&format!("- {item}\n"));
        }
        if items.len() > SECTION_LIMIT {
            out.push_str(&format!(
                "{}\n",
                format!("  ... and {} more", items.len() - SECTION_LIMIT).dimmed()
            ));
        }
        out
    }
}
