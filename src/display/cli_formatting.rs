use owo_colors::OwoColorize;

use super::paint;
use crate::view::{
    CardViewModel, EmptyState, PageSlot, PaginationViewModel, Palette, Tab, ViewMode, ViewModel,
};

/// Format a card for single-line display with colors
///
/// `index` is the 1-based position used by interactive commands.
pub fn format_card_line(index: usize, card: &CardViewModel, palette: &Palette) -> String {
    let marker = if card.is_favorite {
        "★".yellow().to_string()
    } else {
        " ".to_string()
    };
    let id = format!("{:>8}", card.id);
    let mut line = format!(
        "{:>3}. {} {} {}",
        index,
        marker,
        id.cyan(),
        paint(&card.name, palette.primary).bold()
    );
    if !card.description.is_empty() {
        line.push_str(&format!(" - {}", card.description.dimmed()));
    }
    line
}

/// Tab strip with the favorites count
pub fn format_tabs(active: Tab, favorite_count: usize, palette: &Palette) -> String {
    let all = "All";
    let favorites = format!("Favorites ({favorite_count})");
    match active {
        Tab::All => format!(
            "[{}]  {}",
            paint(all, palette.primary).bold(),
            favorites.dimmed()
        ),
        Tab::Favorites => format!(
            "{}  [{}]",
            all.dimmed(),
            paint(&favorites, palette.primary).bold()
        ),
    }
}

/// Page strip, e.g. `< Previous  [1] 2 3 … 157  Next >`
pub fn format_pagination(pagination: &PaginationViewModel) -> String {
    if pagination.total_pages == 0 {
        return String::new();
    }
    let previous = if pagination.has_previous {
        "< Previous".to_string()
    } else {
        "< Previous".dimmed().to_string()
    };
    let next = if pagination.has_next {
        "Next >".to_string()
    } else {
        "Next >".dimmed().to_string()
    };
    let pages: Vec<String> = pagination
        .pages
        .iter()
        .map(|slot| match slot {
            PageSlot::Page(n) if *n == pagination.current => format!("[{n}]").bold().to_string(),
            PageSlot::Page(n) => n.to_string(),
            PageSlot::Gap => "…".to_string(),
        })
        .collect();

    if pages.is_empty() {
        format!("{previous}  page {} of {}  {next}", pagination.current, pagination.total_pages)
    } else {
        format!("{previous}  {}  {next}", pages.join(" "))
    }
}

pub fn format_empty_state(empty: &EmptyState) -> String {
    match empty {
        EmptyState::FetchFailed { .. } | EmptyState::FavoritesUnavailable { .. } => {
            empty.message().red().to_string()
        }
        _ => empty.message().dimmed().to_string(),
    }
}

/// Format the whole screen: tabs, search line, cards and controls
pub fn format_view(vm: &ViewModel) -> String {
    let palette = &vm.palette;
    let mut out = String::new();

    out.push_str(&format_tabs(vm.active_tab, vm.favorite_count, palette));
    out.push('\n');
    if !vm.search_text.is_empty() && vm.active_tab == Tab::All {
        out.push_str(&format!("{} {}\n", "Search:".cyan(), vm.search_text));
    }
    out.push('\n');

    if let Some(banner) = &vm.banner {
        out.push_str(&format!("{} {}\n", "Featured:".dimmed(), banner.dimmed()));
    }

    if vm.loading.initial && vm.mode == ViewMode::Browsing {
        out.push_str(&format!("{}\n", "Loading characters...".dimmed()));
    } else if vm.loading.any() {
        out.push_str(&format!("{}\n", "Loading...".dimmed()));
    }

    for (i, card) in vm.cards.iter().enumerate() {
        out.push_str(&format_card_line(i + 1, card, palette));
        out.push('\n');
    }

    if let Some(empty) = &vm.empty_state {
        out.push_str(&format_empty_state(empty));
        out.push('\n');
    }

    if let Some(pagination) = &vm.pagination {
        let strip = format_pagination(pagination);
        if !strip.is_empty() {
            out.push('\n');
            out.push_str(&strip);
            out.push('\n');
        }
    }
    out
}
