//! View-state controller and the pure derivations behind it.
//!
//! - [`state`]: raw state, modes and request tracking
//! - [`model`]: pure functions from state to what is drawn
//! - [`controller`]: the operations that change state
//! - [`theme`]: color themes passed down to the presentation layer

pub mod controller;
pub mod model;
pub mod state;
pub mod theme;

pub use controller::ViewController;
pub use model::{
    CardViewModel, DetailViewModel, EmptyState, PageSlot, PaginationViewModel, ViewModel,
    compute_detail, compute_pagination, compute_view_model, displayed_collection, empty_state,
    retrievable_pages, total_pages, visible_pages,
};
pub use state::{
    FetchStatus, LoadOutcome, LoadPhase, LoadingFlags, PageRequest, RequestId, RequestKind,
    RequestTracker, SearchRequest, Tab, ViewMode, ViewState,
};
pub use theme::{Palette, Theme};
