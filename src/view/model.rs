//! View model types for testable state management
//!
//! This module separates state ([`ViewState`]) from what the presentation
//! layer draws ([`ViewModel`]). Everything here is a pure function of its
//! inputs, so it can be tested without any terminal or network.

use crate::catalog::{Character, CharacterId, PLACEHOLDER_THUMBNAIL};

use super::state::{FetchStatus, LoadingFlags, Tab, ViewMode, ViewState};
use super::theme::{Palette, Theme};

/// Pages shown either side of the current one in the page strip
const PAGE_WINDOW: u32 = 2;

/// Cards show at most this many description characters
const CARD_DESCRIPTION_CHARS: usize = 120;

// ============================================================================
// View Model Types
// ============================================================================

/// Computed view model for rendering the whole screen
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub mode: ViewMode,
    pub active_tab: Tab,
    pub favorite_count: usize,
    pub cards: Vec<CardViewModel>,
    /// Present only while browsing
    pub pagination: Option<PaginationViewModel>,
    pub loading: LoadingFlags,
    pub empty_state: Option<EmptyState>,
    pub search_text: String,
    pub banner: Option<String>,
    pub detail: Option<DetailViewModel>,
    pub theme: Theme,
    pub palette: Palette,
}

/// One character card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardViewModel {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    pub thumbnail_url: String,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationViewModel {
    pub current: u32,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub pages: Vec<PageSlot>,
}

/// An entry of the page strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Gap,
}

/// Why nothing is on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    NoFavorites,
    /// Favorites exist but none of their characters could be loaded
    FavoritesUnavailable { count: usize },
    NoMatches { query: String },
    NoCharacters,
    FetchFailed { reason: String },
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            EmptyState::NoFavorites => {
                "No favorites yet. Mark characters as favorites to see them here.".to_string()
            }
            EmptyState::FavoritesUnavailable { count } => format!(
                "{count} favorite(s) could not be loaded. Try again when the catalog is reachable."
            ),
            EmptyState::NoMatches { query } => format!("No characters found for \"{query}\"."),
            EmptyState::NoCharacters => "No characters to show.".to_string(),
            EmptyState::FetchFailed { .. } => {
                "Could not load characters. Try again.".to_string()
            }
        }
    }
}

/// Detail view for the selected character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewModel {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    pub thumbnail_url: String,
    pub is_favorite: bool,
    /// Date of last modification, when the catalog reports a valid one
    pub modified: Option<String>,
    pub comics_available: u32,
    pub comics: Vec<String>,
    pub series: Vec<String>,
    pub stories: Vec<String>,
    pub events: Vec<String>,
    /// (type, url)
    pub links: Vec<(String, String)>,
}

// ============================================================================
// Pure Functions
// ============================================================================

/// `ceil(total / limit)`, 0 for an empty catalog
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pages that can actually be navigated to
///
/// The reported total is untrusted: once the catalog has been seen to run
/// dry, the last retrievable page caps navigation.
pub fn retrievable_pages(state: &ViewState) -> u32 {
    let nominal = total_pages(state.total, state.page_size);
    match state.last_page {
        Some(last) if nominal == 0 => last,
        Some(last) => nominal.min(last),
        None => nominal,
    }
}

/// Whether `page` is a valid navigation target
pub fn can_navigate_to(state: &ViewState, page: u32) -> bool {
    // Page 1 is always reachable so a fresh view can load it
    page == 1 || (page > 1 && page <= retrievable_pages(state))
}

/// The collection currently shown, derived from mode, state and favorites
pub fn displayed_collection<'a>(
    state: &'a ViewState,
    favorites: &[&'a Character],
) -> Vec<&'a Character> {
    match state.mode {
        ViewMode::FavoritesOnly => favorites.to_vec(),
        ViewMode::Searching => state
            .search_results
            .iter()
            .filter(|c| state.policy.admits(c))
            .collect(),
        ViewMode::Browsing => state
            .page_items
            .iter()
            .filter(|c| state.policy.admits(c))
            .collect(),
    }
}

/// Page strip: first page, a window around `current`, last page, with gaps
pub fn visible_pages(current: u32, total: u32) -> Vec<PageSlot> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let start = current.saturating_sub(PAGE_WINDOW).max(2);
    let end = (current + PAGE_WINDOW).min(total - 1);

    let mut slots = vec![PageSlot::Page(1)];
    if current > PAGE_WINDOW + 2 {
        slots.push(PageSlot::Gap);
    }
    slots.extend((start..=end).map(PageSlot::Page));
    if current + PAGE_WINDOW < total - 1 {
        slots.push(PageSlot::Gap);
    }
    slots.push(PageSlot::Page(total));
    slots
}

/// Pagination controls; only meaningful while browsing
pub fn compute_pagination(state: &ViewState) -> Option<PaginationViewModel> {
    if state.mode != ViewMode::Browsing {
        return None;
    }
    let total = retrievable_pages(state);
    let current = state.page;
    Some(PaginationViewModel {
        current,
        total_pages: total,
        has_previous: current > 1,
        has_next: total > 0 && current < total,
        pages: visible_pages(current, total),
    })
}

/// Empty-state message, when nothing is displayed and nothing is loading
pub fn empty_state(
    state: &ViewState,
    displayed: usize,
    favorite_count: usize,
) -> Option<EmptyState> {
    if displayed > 0 {
        return None;
    }
    let failed = match &state.last_fetch {
        FetchStatus::Failed(reason) => Some(reason.clone()),
        _ => None,
    };
    match state.mode {
        ViewMode::FavoritesOnly if favorite_count > 0 => Some(EmptyState::FavoritesUnavailable {
            count: favorite_count,
        }),
        ViewMode::FavoritesOnly => Some(EmptyState::NoFavorites),
        ViewMode::Searching if state.loading.search => None,
        ViewMode::Searching => Some(match failed {
            Some(reason) => EmptyState::FetchFailed { reason },
            None => EmptyState::NoMatches {
                query: state.search_text.trim().to_string(),
            },
        }),
        ViewMode::Browsing if state.loading.page || state.loading.initial => None,
        ViewMode::Browsing => Some(match failed {
            Some(reason) => EmptyState::FetchFailed { reason },
            None => EmptyState::NoCharacters,
        }),
    }
}

pub fn compute_card(character: &Character, is_favorite: bool) -> CardViewModel {
    CardViewModel {
        id: character.id,
        name: character.name.trim().to_string(),
        description: truncate_chars(character.description.trim(), CARD_DESCRIPTION_CHARS),
        thumbnail_url: thumbnail_or_placeholder(character),
        is_favorite,
    }
}

pub fn compute_detail(character: &Character, is_favorite: bool) -> DetailViewModel {
    let names = |items: &[crate::catalog::RelatedItem]| -> Vec<String> {
        items
            .iter()
            .map(|item| match &item.kind {
                Some(kind) if !kind.is_empty() => format!("{} ({kind})", item.name),
                _ => item.name.clone(),
            })
            .collect()
    };

    DetailViewModel {
        id: character.id,
        name: character.name.trim().to_string(),
        description: character.description.trim().to_string(),
        thumbnail_url: thumbnail_or_placeholder(character),
        is_favorite,
        modified: character.modified.as_deref().and_then(format_modified),
        comics_available: character.comics.available,
        comics: names(&character.comics.items),
        series: names(&character.series.items),
        stories: names(&character.stories.items),
        events: names(&character.events.items),
        links: character
            .urls
            .iter()
            .map(|link| (link.kind.clone(), link.url.clone()))
            .collect(),
    }
}

/// Compute the full view model
///
/// `favorites` are the favorites with known snapshots, in display order;
/// `is_favorite` answers membership for cards outside that list.
pub fn compute_view_model(
    state: &ViewState,
    favorites: &[&Character],
    is_favorite: impl Fn(CharacterId) -> bool,
    favorite_count: usize,
) -> ViewModel {
    let displayed = displayed_collection(state, favorites);
    let cards: Vec<CardViewModel> = displayed
        .iter()
        .map(|c| compute_card(c, is_favorite(c.id)))
        .collect();

    let detail = state.selected.and_then(|id| {
        find_character(state, favorites, id).map(|c| compute_detail(c, is_favorite(id)))
    });

    ViewModel {
        mode: state.mode,
        active_tab: state.mode.tab(),
        favorite_count,
        empty_state: empty_state(state, cards.len(), favorite_count),
        cards,
        pagination: compute_pagination(state),
        loading: state.loading,
        search_text: state.search_text.clone(),
        banner: state.banner.clone(),
        detail,
        theme: state.theme,
        palette: state.theme.palette(),
    }
}

/// Look a character up in everything the view currently knows about
pub fn find_character<'a>(
    state: &'a ViewState,
    favorites: &[&'a Character],
    id: CharacterId,
) -> Option<&'a Character> {
    state
        .page_items
        .iter()
        .chain(state.search_results.iter())
        .chain(state.detail_item.iter())
        .chain(favorites.iter().copied())
        .find(|c| c.id == id)
}

fn thumbnail_or_placeholder(character: &Character) -> String {
    character
        .thumbnail_url()
        .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string())
}

/// Calendar date of a catalog timestamp such as `2014-04-29T14:18:17-0400`
fn format_modified(raw: &str) -> Option<String> {
    jiff::fmt::strtime::parse("%Y-%m-%dT%H:%M:%S%z", raw)
        .and_then(|tm| tm.to_date())
        .ok()
        .map(|date| date.to_string())
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
