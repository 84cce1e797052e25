//! View-state controller
//!
//! Owns the [`ViewState`] and is the only place it changes. Every fetch is
//! started by a named operation and split in two halves: `begin_*` tags the
//! request and flips the loading flags, `complete_*` applies the response
//! only if no newer request of the same kind has been issued since. The
//! async wrappers run both halves back to back for callers that never
//! overlap requests.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::catalog::{CatalogPage, CatalogProvider, Character, CharacterId, DisplayPolicy};
use crate::config::Config;
use crate::error::{HerodexError, Result};
use crate::favorites::{FavoritesStore, KeyValueStore};

use super::model::{self, ViewModel};
use super::state::{
    FetchStatus, LoadOutcome, PageRequest, RequestKind, RequestTracker, SearchRequest, Tab,
    ViewMode, ViewState,
};
use super::theme::Theme;

pub struct ViewController<C, S> {
    catalog: C,
    favorites: FavoritesStore<S>,
    state: ViewState,
    tracker: RequestTracker,
    rng: StdRng,
    /// Replaces the catalog's reported total when set
    nominal_total: Option<u64>,
}

impl<C: CatalogProvider, S: KeyValueStore> ViewController<C, S> {
    pub fn new(
        catalog: C,
        favorites: FavoritesStore<S>,
        page_size: u32,
        policy: DisplayPolicy,
    ) -> Self {
        Self {
            catalog,
            favorites,
            state: ViewState::new(page_size, policy),
            tracker: RequestTracker::new(),
            rng: StdRng::from_os_rng(),
            nominal_total: None,
        }
    }

    pub fn from_config(catalog: C, favorites: FavoritesStore<S>, config: &Config) -> Self {
        let mut controller = Self::new(
            catalog,
            favorites,
            config.page_size,
            config.display_policy,
        )
        .with_nominal_total(config.nominal_total);
        controller.state.theme = config.theme;
        controller
    }

    pub fn with_nominal_total(mut self, total: Option<u64>) -> Self {
        self.nominal_total = total;
        self
    }

    /// Make banner selection reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view_model(&self) -> ViewModel {
        let favorites = self.favorites.items();
        model::compute_view_model(
            &self.state,
            &favorites,
            |id| self.favorites.is_favorite(id),
            self.favorites.count(),
        )
    }

    /// Characters currently on screen, in display order
    pub fn displayed(&self) -> Vec<&Character> {
        let favorites = self.favorites.items();
        model::displayed_collection(&self.state, &favorites)
    }

    /// Any character the view knows about, loaded or favorited
    pub fn lookup(&self, id: CharacterId) -> Option<&Character> {
        let favorites = self.favorites.items();
        model::find_character(&self.state, &favorites, id)
    }

    // ------------------------------------------------------------------
    // Page loads
    // ------------------------------------------------------------------

    /// Start loading page `page`, or `None` if navigation is not allowed
    pub fn begin_page_load(&mut self, page: u32) -> Option<PageRequest> {
        if self.state.mode != ViewMode::Browsing {
            tracing::debug!(page, mode = ?self.state.mode, "page change ignored outside browsing");
            return None;
        }
        if !model::can_navigate_to(&self.state, page) {
            tracing::debug!(
                page,
                total_pages = model::retrievable_pages(&self.state),
                "page change out of range"
            );
            return None;
        }
        Some(self.start_page_load(page))
    }

    fn start_page_load(&mut self, page: u32) -> PageRequest {
        let id = self.tracker.issue(RequestKind::Page);
        self.state.loading.page = true;
        let request = PageRequest {
            id,
            page,
            limit: self.state.page_size,
            offset: self.state.offset_for(page),
        };
        tracing::debug!(page, offset = request.offset, "page load started");
        request
    }

    /// Apply the response to `request` if it is still the latest page load
    pub fn complete_page_load(
        &mut self,
        request: &PageRequest,
        result: Result<CatalogPage>,
    ) -> LoadOutcome {
        if !self.tracker.is_current(RequestKind::Page, request.id) {
            tracing::debug!(page = request.page, "discarding stale page response");
            return LoadOutcome::Stale;
        }
        self.tracker.finish(RequestKind::Page, request.id);
        self.state.loading.page = false;
        self.state.loading.initial = false;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(page = request.page, "failed to load characters: {e}");
                self.state.last_fetch = FetchStatus::Failed(e.to_string());
                return LoadOutcome::Failed;
            }
        };
        self.state.last_fetch = FetchStatus::Succeeded;

        if page.items.is_empty() && page.exhausted && request.page > 1 {
            let last = request.page - 1;
            tracing::debug!(page = request.page, last, "catalog ran dry, clamping navigation");
            self.state.last_page = Some(last);
            return LoadOutcome::PastEnd;
        }

        self.state.total = self.nominal_total.unwrap_or(page.total);
        self.state.page = request.page;
        self.state.page_offsets.insert(request.page, request.offset);
        self.state
            .page_offsets
            .insert(request.page + 1, page.next_offset);

        if page.exhausted {
            self.state.last_page = Some(request.page);
        } else if self.state.last_page.is_some_and(|last| last <= request.page) {
            self.state.last_page = None;
        }

        self.state.page_items = page.items;
        self.state.loaded_page = Some(request.page);
        self.reroll_banner();
        self.refresh_favorites(RequestKind::Page);
        tracing::debug!(
            page = request.page,
            items = self.state.page_items.len(),
            total = self.state.total,
            "page applied"
        );
        LoadOutcome::Applied
    }

    pub async fn change_page(&mut self, page: u32) -> LoadOutcome {
        let Some(request) = self.begin_page_load(page) else {
            return LoadOutcome::Rejected;
        };
        self.run_page_load(request).await
    }

    pub async fn next_page(&mut self) -> LoadOutcome {
        self.change_page(self.state.page.saturating_add(1)).await
    }

    pub async fn previous_page(&mut self) -> LoadOutcome {
        if self.state.page <= 1 {
            return LoadOutcome::Rejected;
        }
        self.change_page(self.state.page - 1).await
    }

    async fn run_page_load(&mut self, request: PageRequest) -> LoadOutcome {
        let result = self
            .catalog
            .fetch_page(request.limit, request.offset)
            .await;
        self.complete_page_load(&request, result)
    }

    /// Fresh start: hydrate id-only favorites, then load page 1
    pub async fn load_initial(&mut self) -> LoadOutcome {
        self.hydrate_favorites().await;
        self.state.mode = ViewMode::Browsing;
        let request = self.start_page_load(1);
        self.run_page_load(request).await
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Switch to search mode for `text`; `None` when it trims to empty
    pub fn begin_search(&mut self, text: &str) -> Option<SearchRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let prior_mode = self.state.mode;
        let id = self.tracker.issue(RequestKind::Search);
        self.state.mode = ViewMode::Searching;
        self.state.search_text = text.to_string();
        self.state.loading.search = true;
        tracing::debug!(text, "search started");
        Some(SearchRequest {
            id,
            text: text.to_string(),
            prior_mode,
        })
    }

    /// Apply search results if `request` is still the latest search
    pub fn complete_search(
        &mut self,
        request: &SearchRequest,
        result: Result<Vec<Character>>,
    ) -> LoadOutcome {
        if !self.tracker.is_current(RequestKind::Search, request.id) {
            tracing::debug!(text = %request.text, "discarding stale search response");
            return LoadOutcome::Stale;
        }
        self.tracker.finish(RequestKind::Search, request.id);
        self.state.loading.search = false;

        match result {
            Ok(results) => {
                tracing::debug!(text = %request.text, results = results.len(), "search applied");
                self.state.search_results = results;
                self.state.page = 1;
                self.state.last_fetch = FetchStatus::Succeeded;
                self.refresh_favorites(RequestKind::Search);
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(text = %request.text, "search failed: {e}");
                self.state.last_fetch = FetchStatus::Failed(e.to_string());
                if self.state.mode == ViewMode::Searching {
                    self.state.mode = request.prior_mode;
                }
                LoadOutcome::Failed
            }
        }
    }

    pub async fn submit_search(&mut self, text: &str) -> LoadOutcome {
        let Some(request) = self.begin_search(text) else {
            return LoadOutcome::Rejected;
        };
        let result = self.catalog.search_by_name_prefix(&request.text).await;
        self.complete_search(&request, result)
    }

    /// Leave search mode and reload page 1
    ///
    /// Any search still in flight is discarded when it resolves.
    pub fn begin_reset_search(&mut self) -> PageRequest {
        self.tracker.invalidate(RequestKind::Search);
        self.state.loading.search = false;
        self.state.search_text.clear();
        self.state.search_results.clear();
        self.state.mode = ViewMode::Browsing;
        self.start_page_load(1)
    }

    pub async fn reset_search(&mut self) -> LoadOutcome {
        let request = self.begin_reset_search();
        self.run_page_load(request).await
    }

    // ------------------------------------------------------------------
    // Local actions
    // ------------------------------------------------------------------

    /// Switch tabs, reusing browse data when it still matches the page
    ///
    /// A search resets page tracking to 1, so returning to the All tab
    /// afterwards starts a page 1 load unless page 1 is what is held.
    pub fn select_tab(&mut self, tab: Tab) -> Option<PageRequest> {
        self.state.mode = match tab {
            Tab::All => ViewMode::Browsing,
            Tab::Favorites => ViewMode::FavoritesOnly,
        };
        let stale = self
            .state
            .loaded_page
            .is_some_and(|loaded| loaded != self.state.page);
        (tab == Tab::All && stale).then(|| self.start_page_load(self.state.page))
    }

    /// [`select_tab`](Self::select_tab), running the page load if one starts
    pub async fn switch_tab(&mut self, tab: Tab) -> Option<LoadOutcome> {
        let request = self.select_tab(tab)?;
        Some(self.run_page_load(request).await)
    }

    /// Toggle a character the view knows about
    ///
    /// Returns whether it is a favorite afterwards. Unknown ids can only be
    /// removed, since adding needs a snapshot.
    pub fn toggle_favorite(&mut self, id: CharacterId) -> Result<bool> {
        match self.lookup(id).cloned() {
            Some(character) => self.favorites.toggle(&character),
            None if self.favorites.is_favorite(id) => self.favorites.toggle_id(id),
            None => Err(HerodexError::CharacterNotFound(id.0)),
        }
    }

    /// Toggle any character, fetching it first when the view has no copy
    pub async fn toggle_favorite_fetching(&mut self, id: CharacterId) -> Result<bool> {
        if self.lookup(id).is_some() || self.favorites.is_favorite(id) {
            return self.toggle_favorite(id);
        }
        let character = self.catalog.fetch_character(id).await?;
        self.favorites.toggle(&character)
    }

    /// Open the detail view; false if the character is not known
    pub fn select_item(&mut self, id: CharacterId) -> bool {
        if self.lookup(id).is_none() {
            return false;
        }
        self.state.selected = Some(id);
        true
    }

    /// Open the detail view, fetching the character when necessary
    pub async fn show_item(&mut self, id: CharacterId) -> Result<Character> {
        if let Some(character) = self.lookup(id).cloned() {
            self.state.selected = Some(id);
            return Ok(character);
        }
        let character = self.catalog.fetch_character(id).await?;
        self.state.detail_item = Some(character.clone());
        self.state.selected = Some(id);
        Ok(character)
    }

    pub fn close_detail(&mut self) {
        self.state.selected = None;
        self.state.detail_item = None;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
    }

    /// Fetch snapshots for favorites stored by id only
    ///
    /// Returns how many were filled in. Failures are logged and skipped.
    pub async fn hydrate_favorites(&mut self) -> usize {
        let missing = self.favorites.missing_snapshots();
        if missing.is_empty() {
            return 0;
        }
        let mut fetched = Vec::with_capacity(missing.len());
        for id in missing {
            match self.catalog.fetch_character(id).await {
                Ok(character) => fetched.push(character),
                Err(e) => tracing::warn!(%id, "could not fetch favorite: {e}"),
            }
        }
        match self.favorites.refresh_snapshots(&fetched) {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("could not persist favorite snapshots: {e}");
                0
            }
        }
    }

    fn refresh_favorites(&mut self, kind: RequestKind) {
        let fresh = match kind {
            RequestKind::Page => &self.state.page_items,
            RequestKind::Search => &self.state.search_results,
        };
        if let Err(e) = self.favorites.refresh_snapshots(fresh) {
            tracing::warn!("could not persist favorite snapshots: {e}");
        }
    }

    fn reroll_banner(&mut self) {
        let candidates: Vec<String> = self
            .state
            .page_items
            .iter()
            .filter_map(Character::thumbnail_url)
            .collect();
        if let Some(url) = candidates.choose(&mut self.rng) {
            self.state.banner = Some(url.clone());
        }
    }
}
