//! State types for the character view

use std::collections::HashMap;

use crate::catalog::{Character, CharacterId, DisplayPolicy};

use super::theme::Theme;

/// Which collection is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Paginated catalog windows
    #[default]
    Browsing,
    /// Unpaginated result of the last name search
    Searching,
    /// The favorites set
    FavoritesOnly,
}

/// Tabs the user can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    All,
    Favorites,
}

impl ViewMode {
    pub fn tab(self) -> Tab {
        match self {
            ViewMode::Browsing | ViewMode::Searching => Tab::All,
            ViewMode::FavoritesOnly => Tab::Favorites,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingFlags {
    /// No page load has completed since startup
    pub initial: bool,
    pub page: bool,
    pub search: bool,
}

impl LoadingFlags {
    pub fn any(&self) -> bool {
        self.page || self.search
    }

    pub fn phase(&self) -> LoadPhase {
        if self.any() {
            LoadPhase::Loading
        } else {
            LoadPhase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
}

/// Outcome of the most recent applied or failed request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    NotStarted,
    Succeeded,
    Failed(String),
}

impl FetchStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchStatus::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Page,
    Search,
}

/// Identity of one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Tags requests so only the latest of each kind may update state
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    next: u64,
    latest: HashMap<RequestKind, RequestId>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new id, superseding every earlier request of `kind`
    pub fn issue(&mut self, kind: RequestKind) -> RequestId {
        self.next += 1;
        let id = RequestId(self.next);
        self.latest.insert(kind, id);
        id
    }

    pub fn is_current(&self, kind: RequestKind, id: RequestId) -> bool {
        self.latest.get(&kind) == Some(&id)
    }

    /// Mark the current request of `kind` as resolved
    pub fn finish(&mut self, kind: RequestKind, id: RequestId) {
        if self.is_current(kind, id) {
            self.latest.remove(&kind);
        }
    }

    /// Discard any outstanding request of `kind`
    pub fn invalidate(&mut self, kind: RequestKind) {
        self.latest.remove(&kind);
    }

    pub fn is_outstanding(&self, kind: RequestKind) -> bool {
        self.latest.contains_key(&kind)
    }
}

/// A page window load that has been started but not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub id: RequestId,
    pub page: u32,
    pub limit: u32,
    /// Raw catalog offset of the window
    pub offset: u64,
}

/// A name search that has been started but not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: RequestId,
    pub text: String,
    /// Mode to fall back to if the search fails
    pub prior_mode: ViewMode,
}

/// What happened to a request's response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// Navigation target out of range or wrong mode; nothing was requested
    Rejected,
    /// A newer request of the same kind superseded this one
    Stale,
    /// The request failed; previous data was kept
    Failed,
    /// The catalog ran dry before this page; navigation was clamped
    PastEnd,
}

/// Raw state that changes during user interaction
#[derive(Debug, Clone)]
pub struct ViewState {
    pub mode: ViewMode,

    // Browsing
    pub page: u32,
    pub page_size: u32,
    /// Catalog size as reported upstream (or configured override)
    pub total: u64,
    /// Last page known to be retrievable, discovered by exhausting the catalog
    pub last_page: Option<u32>,
    pub page_items: Vec<Character>,
    /// Page that `page_items` were loaded for
    pub loaded_page: Option<u32>,
    /// Raw catalog offset where each page window starts
    pub page_offsets: HashMap<u32, u64>,

    // Searching
    pub search_text: String,
    pub search_results: Vec<Character>,

    pub loading: LoadingFlags,
    pub last_fetch: FetchStatus,
    pub selected: Option<CharacterId>,
    /// Character fetched directly for the detail view
    pub detail_item: Option<Character>,
    /// Banner art picked from the current page
    pub banner: Option<String>,
    pub theme: Theme,
    pub policy: DisplayPolicy,
}

impl ViewState {
    pub fn new(page_size: u32, policy: DisplayPolicy) -> Self {
        Self {
            mode: ViewMode::Browsing,
            page: 1,
            page_size: page_size.max(1),
            total: 0,
            last_page: None,
            page_items: Vec::new(),
            loaded_page: None,
            page_offsets: HashMap::new(),
            search_text: String::new(),
            search_results: Vec::new(),
            loading: LoadingFlags {
                initial: true,
                ..LoadingFlags::default()
            },
            last_fetch: FetchStatus::NotStarted,
            selected: None,
            detail_item: None,
            banner: None,
            theme: Theme::default(),
            policy,
        }
    }

    /// Raw offset for `page`, falling back to the unfiltered position
    pub fn offset_for(&self, page: u32) -> u64 {
        if page <= 1 {
            return 0;
        }
        self.page_offsets
            .get(&page)
            .copied()
            .unwrap_or_else(|| u64::from(page - 1) * u64::from(self.page_size))
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(10, DisplayPolicy::default())
    }
}
