//! Search state controller
//!
//! Owns the query, the filter set, pagination and loading flags, the raw
//! result cache, and the reconciliation between that state and the route.
//!
//! A controller is constructed once per session and shared by cloning; all
//! clones see the same state. The state lock is never held across a backend
//! call, so two overlapping fetches both complete and the last one to finish
//! writes the final results.
//!
//! ```text
//! action ──► state change ──► FiltersChanged ──► route write (if different)
//!                        └──► fetch_results ──► SearchBackend ──► merge results
//! navigation ──► RouteChanged ──► decode + patch (if different) ──► fetch_results
//! ```

mod state;

pub use state::SearchState;

use crate::display::SubtitleCount;
use crate::proxy::{SearchEnvelope, SearchParams, SearchProxy, SearchRequest, UpstreamTransport};
use crate::route::{Navigator, SearchRoute};
use crate::types::{AssetType, FiltersPatch, SearchFilters};
use crate::url_codec;
use crate::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, warn};

const DEFAULT_FETCH_ERROR: &str = "An error occurred while fetching results";

/// Where the controller sends search requests
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchEnvelope>;
}

#[async_trait]
impl<T: UpstreamTransport> SearchBackend for SearchProxy<T> {
    async fn search(&self, request: &SearchRequest) -> Result<SearchEnvelope> {
        Ok(self.handle(&SearchParams::from(request)).await)
    }
}

/// Messages that drive store/route reconciliation
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Query or filters changed in the store; write them to the route
    FiltersChanged,
    /// The route changed from outside (back/forward, deep link)
    RouteChanged(SearchRoute),
}

#[derive(Clone)]
pub struct SearchController {
    state: Arc<RwLock<SearchState>>,
    backend: Arc<dyn SearchBackend>,
    navigator: Arc<dyn Navigator>,
    subtitle_count: SubtitleCount,
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("state", &*self.state.read())
            .field("subtitle_count", &self.subtitle_count)
            .finish()
    }
}

impl SearchController {
    pub fn new(backend: Arc<dyn SearchBackend>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SearchState::default())),
            backend,
            navigator,
            subtitle_count: SubtitleCount::default(),
        }
    }

    /// Choose which count the subtitle reports
    pub fn with_subtitle_count(mut self, subtitle_count: SubtitleCount) -> Self {
        self.subtitle_count = subtitle_count;
        self
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SearchState {
        self.state.read().clone()
    }

    pub fn query(&self) -> String {
        self.state.read().query.clone()
    }

    pub fn filters(&self) -> SearchFilters {
        self.state.read().filters
    }

    pub fn title(&self) -> String {
        self.state.read().search_title()
    }

    pub fn subtitle(&self) -> String {
        self.state.read().search_subtitle(self.subtitle_count)
    }

    /// Set the query and start a new search. Returns `false` if the trimmed
    /// query equals the current one.
    pub async fn update_query(&self, new_query: &str) -> bool {
        let trimmed = new_query.trim();
        {
            let mut state = self.state.write();
            if state.query == trimmed {
                return false;
            }
            state.query = trimmed.to_string();
        }

        debug!("Query updated to '{}'", trimmed);
        self.dispatch(SearchEvent::FiltersChanged).await;
        self.fetch_results(true).await;
        true
    }

    /// Apply a batch of filter changes. At most one new search is started,
    /// and only if a changed field affects what upstream returns.
    pub async fn update_filters(&self, patch: FiltersPatch) -> bool {
        let changed = self.state.write().filters.apply(&patch);
        if changed.is_empty() {
            return false;
        }

        debug!(?changed, "Filters updated");
        self.dispatch(SearchEvent::FiltersChanged).await;

        if changed.requires_refetch() {
            self.fetch_results(true).await;
        }
        true
    }

    /// Restore default filters and start a new search
    pub async fn reset_filters(&self) {
        self.state.write().filters = SearchFilters::default();
        self.dispatch(SearchEvent::FiltersChanged).await;
        self.fetch_results(true).await;
    }

    /// Fetch the current page.
    ///
    /// A new search resets to page 1 and replaces the loaded items; otherwise
    /// the caller has already advanced `current_page` and results are
    /// appended. A failed new search clears results; a failed load-more keeps
    /// what is already loaded.
    pub async fn fetch_results(&self, is_new_search: bool) {
        let request = {
            let mut state = self.state.write();

            if state.query.trim().is_empty() {
                state.raw_results.clear();
                state.api_total_items = 0;
                state.error = None;
                return;
            }

            if is_new_search {
                state.is_loading = true;
                state.error = None;
                state.current_page = 1;
            } else {
                state.is_loading_more = true;
            }

            state.request()
        };

        debug!(
            query = %request.query,
            page = request.page,
            new_search = is_new_search,
            "Fetching search results"
        );
        let outcome = self.backend.search(&request).await;

        let mut state = self.state.write();
        let failure = match outcome {
            Ok(envelope) if !envelope.is_error() => {
                let page = envelope.into_items_page();
                let total_items = page.total_count().unwrap_or(0) as usize;
                if is_new_search || request.page == 1 {
                    state.raw_results = page.data;
                } else {
                    state.raw_results.extend(page.data);
                }
                state.api_total_items = total_items;
                state.error = None;
                None
            }
            Ok(envelope) => Some(
                envelope
                    .message
                    .unwrap_or_else(|| DEFAULT_FETCH_ERROR.to_string()),
            ),
            Err(e) => Some(e.to_string()),
        };

        if let Some(message) = failure {
            error!("Error fetching results: {}", message);
            if is_new_search {
                state.raw_results.clear();
                state.api_total_items = 0;
            }
            state.error = Some(message);
        }

        state.is_loading = false;
        state.is_loading_more = false;
    }

    /// Advance to the next page and append it. No-op while any fetch is in
    /// flight or when everything has been loaded.
    pub async fn load_more_results(&self) -> bool {
        {
            let mut state = self.state.write();
            if state.is_loading || state.is_loading_more || !state.has_more_pages() {
                return false;
            }
            state.current_page += 1;
        }

        self.fetch_results(false).await;
        true
    }

    /// Patch the store from `route`. Returns whether a new search was started.
    ///
    /// The path carries the asset type and query; mapped query-string
    /// parameters carry the other filters. Absent parameters leave the store
    /// as it is.
    pub async fn initialize_from_route(&self, route: &SearchRoute) -> bool {
        let needs_fetch = {
            let mut state = self.state.write();
            let mut patch = url_codec::decode_filters(&route.params, &state.filters);

            match route.asset_segment.parse::<AssetType>() {
                Ok(asset_type) if asset_type != state.filters.asset_type => {
                    patch.asset_type = Some(asset_type);
                }
                Ok(_) => {}
                Err(_) => warn!(
                    "Unknown asset type \"{}\" in route. Ignoring it.",
                    route.asset_segment
                ),
            }

            let query = route.query.as_deref().unwrap_or("").trim();
            let query_changed = query != state.query;
            if query_changed {
                state.query = query.to_string();
            }

            let changed = state.filters.apply(&patch);
            if query_changed || !changed.is_empty() {
                debug!(?changed, query_changed, "Store patched from route {}", route);
            }
            query_changed || changed.requires_refetch()
        };

        if needs_fetch {
            self.fetch_results(true).await;
        }
        needs_fetch
    }

    /// Write the query and filters to the route. Returns `false` when the
    /// route already matches.
    pub fn update_route(&self) -> bool {
        let current = self.navigator.current();
        let next = {
            let state = self.state.read();
            let query = state.query.trim();
            SearchRoute {
                asset_segment: state.filters.asset_type.as_str().to_string(),
                query: (!query.is_empty()).then(|| query.to_string()),
                params: url_codec::merge_filters_into_params(&current.params, &state.filters),
            }
        };

        if next == current {
            return false;
        }
        self.navigator.replace(next);
        true
    }

    pub async fn dispatch(&self, event: SearchEvent) {
        match event {
            SearchEvent::FiltersChanged => {
                self.update_route();
            }
            SearchEvent::RouteChanged(route) => {
                self.initialize_from_route(&route).await;
            }
        }
    }
}
