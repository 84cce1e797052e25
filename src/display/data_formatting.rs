use serde_json::{Value, json};

use crate::view::{
    CardViewModel, DetailViewModel, EmptyState, PageSlot, PaginationViewModel, ViewModel,
};

pub fn card_json(card: &CardViewModel) -> Value {
    json!({
        "id": card.id,
        "name": card.name,
        "description": card.description,
        "thumbnail": card.thumbnail_url,
        "favorite": card.is_favorite,
    })
}

pub fn pagination_json(pagination: &PaginationViewModel) -> Value {
    let pages: Vec<Value> = pagination
        .pages
        .iter()
        .map(|slot| match slot {
            PageSlot::Page(n) => json!(n),
            PageSlot::Gap => Value::Null,
        })
        .collect();
    json!({
        "current": pagination.current,
        "total_pages": pagination.total_pages,
        "has_previous": pagination.has_previous,
        "has_next": pagination.has_next,
        "pages": pages,
    })
}

pub fn empty_state_json(empty: &EmptyState) -> Value {
    let kind = match empty {
        EmptyState::NoFavorites => "no_favorites",
        EmptyState::FavoritesUnavailable { .. } => "favorites_unavailable",
        EmptyState::NoMatches { .. } => "no_matches",
        EmptyState::NoCharacters => "no_characters",
        EmptyState::FetchFailed { .. } => "fetch_failed",
    };
    let mut value = json!({
        "kind": kind,
        "message": empty.message(),
    });
    match empty {
        EmptyState::FetchFailed { reason } => value["reason"] = json!(reason),
        EmptyState::FavoritesUnavailable { count } => value["count"] = json!(count),
        _ => {}
    }
    value
}

pub fn detail_json(detail: &DetailViewModel) -> Value {
    let links: Vec<Value> = detail
        .links
        .iter()
        .map(|(kind, url)| json!({ "type": kind, "url": url }))
        .collect();
    json!({
        "id": detail.id,
        "name": detail.name,
        "description": detail.description,
        "thumbnail": detail.thumbnail_url,
        "favorite": detail.is_favorite,
        "modified": detail.modified,
        "comics_available": detail.comics_available,
        "comics": detail.comics,
        "series": detail.series,
        "stories": detail.stories,
        "events": detail.events,
        "urls": links,
    })
}

/// JSON form of a whole screen
pub fn view_json(vm: &ViewModel) -> Value {
    let mode = match vm.mode {
        crate::view::ViewMode::Browsing => "browsing",
        crate::view::ViewMode::Searching => "searching",
        crate::view::ViewMode::FavoritesOnly => "favorites_only",
    };
    let search = (!vm.search_text.is_empty()).then_some(&vm.search_text);
    let items: Vec<Value> = vm.cards.iter().map(card_json).collect();
    json!({
        "mode": mode,
        "theme": vm.theme.to_string(),
        "favorite_count": vm.favorite_count,
        "search": search,
        "items": items,
        "pagination": vm.pagination.as_ref().map(pagination_json),
        "loading": {
            "initial": vm.loading.initial,
            "page": vm.loading.page,
            "search": vm.loading.search,
        },
        "empty_state": vm.empty_state.as_ref().map(empty_state_json),
        "banner": vm.banner,
        "detail": vm.detail.as_ref().map(detail_json),
    })
}
