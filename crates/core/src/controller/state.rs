//! Search state and its derived views

use crate::asset_type::humanize_asset_type;
use crate::display::{search_subtitle, search_title, SubtitleCount};
use crate::proxy::SearchRequest;
use crate::types::{AssetItem, SearchFilters};
use serde::Serialize;

/// Everything the search controller owns
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub query: String,
    pub filters: SearchFilters,
    /// Every item loaded for the current query+filters, in page order
    pub raw_results: Vec<AssetItem>,
    /// Total reported by upstream, before client-side exclusive filtering
    pub api_total_items: usize,
    pub current_page: u32,
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            filters: SearchFilters::default(),
            raw_results: Vec::new(),
            api_total_items: 0,
            current_page: 1,
            is_loading: false,
            is_loading_more: false,
            error: None,
        }
    }
}

impl SearchState {
    /// Loaded items, restricted to exclusive ones when that filter is on
    pub fn results(&self) -> Vec<&AssetItem> {
        self.raw_results
            .iter()
            .filter(|item| !self.filters.exclusive || item.is_exclusive())
            .collect()
    }

    /// Upstream total, or, under the exclusive filter, the number of loaded
    /// exclusive items. Upstream cannot count exclusives for us.
    pub fn total_items(&self) -> usize {
        if self.filters.exclusive {
            self.exclusive_items_count()
        } else {
            self.api_total_items
        }
    }

    pub fn exclusive_items_count(&self) -> usize {
        self.raw_results
            .iter()
            .filter(|item| item.is_exclusive())
            .count()
    }

    pub fn has_more_pages(&self) -> bool {
        self.raw_results.len() < self.api_total_items
    }

    pub fn humanized_asset_type(&self) -> String {
        humanize_asset_type(self.filters.asset_type.as_str())
    }

    pub fn search_title(&self) -> String {
        search_title(
            &self.query,
            self.total_items(),
            &self.humanized_asset_type(),
            self.is_loading,
        )
    }

    pub fn search_subtitle(&self, count: SubtitleCount) -> String {
        let count = match count {
            SubtitleCount::Total => self.total_items(),
            SubtitleCount::Exclusive => self.exclusive_items_count(),
        };
        search_subtitle(count, &self.humanized_asset_type())
    }

    /// Request for the current query, filters and page
    pub(crate) fn request(&self) -> SearchRequest {
        let asset_type = self.filters.asset_type;
        SearchRequest {
            query: self.query.trim().to_string(),
            asset_type,
            page: self.current_page,
            per_page: asset_type.page_size(),
            sort: self.filters.sort_by,
            price: self.filters.price,
            view: self.filters.view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssetType;
    use serde_json::json;

    fn item(id: u64, exclusive: Option<bool>) -> AssetItem {
        match exclusive {
            Some(flag) => AssetItem(json!({
                "id": id,
                "additional_informations": { "iconscout_exclusive": flag }
            })),
            None => AssetItem(json!({ "id": id })),
        }
    }

    fn mixed_state() -> SearchState {
        SearchState {
            query: "test".to_string(),
            raw_results: vec![
                item(1, Some(true)),
                item(2, Some(false)),
                item(3, Some(true)),
                item(4, None),
                item(5, Some(true)),
            ],
            api_total_items: 500,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let state = SearchState::default();
        assert_eq!(state.query, "");
        assert!(state.results().is_empty());
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.exclusive_items_count(), 0);
        assert_eq!(state.current_page, 1);
        assert!(!state.is_loading);
        assert!(!state.has_more_pages());
        assert_eq!(state.humanized_asset_type(), "All Assets");
    }

    #[test]
    fn test_results_without_exclusive_filter() {
        let state = mixed_state();
        assert_eq!(state.results().len(), 5);
        assert_eq!(state.total_items(), 500);
    }

    #[test]
    fn test_results_with_exclusive_filter() {
        let mut state = mixed_state();
        state.filters.exclusive = true;

        let ids: Vec<_> = state.results().iter().filter_map(|i| i.id()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
        assert_eq!(state.exclusive_items_count(), 3);
        assert_eq!(state.total_items(), 3);
        assert_eq!(state.api_total_items, 500);
        assert_eq!(state.raw_results.len(), 5);
    }

    #[test]
    fn test_has_more_pages() {
        let mut state = mixed_state();
        assert!(state.has_more_pages());
        state.api_total_items = 5;
        assert!(!state.has_more_pages());
    }

    #[test]
    fn test_title_and_subtitle() {
        let mut state = mixed_state();
        state.filters.asset_type = AssetType::ThreeDIllustrations;
        state.api_total_items = 1200;

        assert_eq!(state.search_title(), "1,200 test 3D Illustrations");
        assert_eq!(
            state.search_subtitle(SubtitleCount::Exclusive),
            "3 3D Illustrations exclusively selected by our designer community."
        );
        assert_eq!(
            state.search_subtitle(SubtitleCount::Total),
            "1,200 3D Illustrations exclusively selected by our designer community."
        );

        state.is_loading = true;
        assert_eq!(state.search_title(), "Searching for test 3D Illustrations...");
    }

    #[test]
    fn test_request_uses_type_dependent_page_size() {
        let mut state = mixed_state();
        state.query = "  padded ".to_string();
        state.filters.asset_type = AssetType::Icons;
        state.current_page = 3;

        let request = state.request();
        assert_eq!(request.query, "padded");
        assert_eq!(request.per_page, 60);
        assert_eq!(request.page, 3);

        state.filters.asset_type = AssetType::Illustrations;
        assert_eq!(state.request().per_page, 30);
    }
}
