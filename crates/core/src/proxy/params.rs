//! Inbound `/api/search` parameters and the upstream query built from them

use crate::asset_type::normalize_asset_type;
use crate::types::{AssetType, Price, SortBy, View};
use crate::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_PER_PAGE: &str = "30";
pub const DEFAULT_PAGE: &str = "1";
pub const DEFAULT_SORT: &str = "relevant";
pub const DEFAULT_VIEW: &str = "item";

/// Query parameters accepted by `GET /api/search`
///
/// Values are kept as received; the proxy forwards them verbatim apart from
/// the normalisations documented on [`UpstreamQuery::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// What the search controller asks for on every fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub asset_type: AssetType,
    pub page: u32,
    pub per_page: u32,
    pub sort: SortBy,
    pub price: Price,
    pub view: View,
}

impl From<&SearchRequest> for SearchParams {
    fn from(request: &SearchRequest) -> Self {
        Self {
            query: Some(request.query.clone()),
            asset_type: Some(request.asset_type.as_str().to_string()),
            page: Some(request.page.to_string()),
            per_page: Some(request.per_page.to_string()),
            sort: Some(request.sort.as_str().to_string()),
            price: Some(request.price.as_str().to_string()),
            view: Some(request.view.as_str().to_string()),
            ..Default::default()
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The ordered upstream query string, without the credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    view: String,
    pairs: Vec<(&'static str, String)>,
}

impl UpstreamQuery {
    /// Validate `params` and build the upstream parameter list.
    ///
    /// - `asset_type` and a non-blank `query` are required.
    /// - `lottie` always requests `price=free`; otherwise `price` is sent
    ///   unless it is `all`.
    /// - `color` loses its leading `#`.
    /// - `exclude=true` adds `iconscout_exclusive=true`.
    pub fn build(params: &SearchParams) -> Result<Self> {
        let asset_type = present(&params.asset_type)
            .ok_or_else(|| ScoutError::validation("Asset type is required"))?;

        let query = params
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ScoutError::validation("Search query is required"))?;

        let asset = normalize_asset_type(asset_type);
        let view = present(&params.view).unwrap_or(DEFAULT_VIEW).to_string();

        let mut pairs: Vec<(&'static str, String)> = vec![
            ("query", query.to_string()),
            ("product_type", view.clone()),
            ("asset", asset.to_string()),
            (
                "per_page",
                present(&params.per_page).unwrap_or(DEFAULT_PER_PAGE).to_string(),
            ),
            ("page", present(&params.page).unwrap_or(DEFAULT_PAGE).to_string()),
            ("sort", present(&params.sort).unwrap_or(DEFAULT_SORT).to_string()),
        ];

        // Upstream has no paid animations in the formats we render
        if asset == "lottie" {
            pairs.push(("price", "free".to_string()));
        } else if let Some(price) = present(&params.price).filter(|p| *p != "all") {
            pairs.push(("price", price.to_string()));
        }

        if let Some(color) = present(&params.color) {
            pairs.push(("color", color.strip_prefix('#').unwrap_or(color).to_string()));
        }

        let passthrough = [
            ("style", &params.style),
            ("license", &params.license),
            ("format", &params.format),
            ("category", &params.category),
            ("subcategory", &params.subcategory),
            ("tag", &params.tag),
        ];
        for (name, value) in passthrough {
            if let Some(value) = present(value) {
                pairs.push((name, value.to_string()));
            }
        }

        if present(&params.exclude) == Some("true") {
            pairs.push(("iconscout_exclusive", "true".to_string()));
        }

        Ok(Self { view, pairs })
    }

    /// The `product_type` this query asks for; decides how the response is reshaped
    pub fn view(&self) -> &str {
        &self.view
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// `endpoint` with this query appended; safe to log
    pub fn to_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str, asset_type: &str) -> SearchParams {
        SearchParams {
            query: Some(query.to_string()),
            asset_type: Some(asset_type.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_asset_type() {
        let err = UpstreamQuery::build(&SearchParams {
            query: Some("cat".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Asset type is required");
    }

    #[test]
    fn test_blank_query() {
        let err = UpstreamQuery::build(&params("   ", "icons")).unwrap_err();
        assert_eq!(err.to_string(), "Search query is required");

        let err = UpstreamQuery::build(&SearchParams {
            asset_type: Some("icons".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ScoutError::Validation { .. }));
    }

    #[test]
    fn test_required_defaults() {
        let query = UpstreamQuery::build(&params("  cat  ", "icons")).unwrap();
        assert_eq!(
            query.pairs(),
            &[
                ("query", "cat".to_string()),
                ("product_type", "item".to_string()),
                ("asset", "icon".to_string()),
                ("per_page", "30".to_string()),
                ("page", "1".to_string()),
                ("sort", "relevant".to_string()),
            ]
        );
        assert_eq!(query.view(), "item");
    }

    #[test]
    fn test_lottie_forces_free_price() {
        let mut p = params("loader", "lottie-animations");
        p.price = Some("premium".to_string());
        let query = UpstreamQuery::build(&p).unwrap();
        assert_eq!(query.get("asset"), Some("lottie"));
        assert_eq!(query.get("price"), Some("free"));
        assert_eq!(query.pairs().iter().filter(|(k, _)| *k == "price").count(), 1);
    }

    #[test]
    fn test_price_all_is_omitted() {
        let mut p = params("cat", "illustrations");
        p.price = Some("all".to_string());
        assert_eq!(UpstreamQuery::build(&p).unwrap().get("price"), None);

        p.price = Some("premium".to_string());
        assert_eq!(UpstreamQuery::build(&p).unwrap().get("price"), Some("premium"));
    }

    #[test]
    fn test_optional_passthrough() {
        let p = SearchParams {
            color: Some("#ff0000".to_string()),
            style: Some("outline".to_string()),
            tag: Some("animal".to_string()),
            exclude: Some("true".to_string()),
            view: Some("pack".to_string()),
            page: Some("3".to_string()),
            per_page: Some("60".to_string()),
            sort: Some("latest".to_string()),
            ..params("cat", "3d-illustrations")
        };
        let query = UpstreamQuery::build(&p).unwrap();

        assert_eq!(query.get("color"), Some("ff0000"));
        assert_eq!(query.get("style"), Some("outline"));
        assert_eq!(query.get("tag"), Some("animal"));
        assert_eq!(query.get("license"), None);
        assert_eq!(query.get("iconscout_exclusive"), Some("true"));
        assert_eq!(query.get("product_type"), Some("pack"));
        assert_eq!(query.get("asset"), Some("3d"));
        assert_eq!(query.get("page"), Some("3"));
        assert_eq!(query.get("per_page"), Some("60"));
        assert_eq!(query.get("sort"), Some("latest"));
        assert_eq!(query.view(), "pack");
    }

    #[test]
    fn test_exclude_other_than_true_is_ignored() {
        let mut p = params("cat", "icons");
        p.exclude = Some("false".to_string());
        assert_eq!(UpstreamQuery::build(&p).unwrap().get("iconscout_exclusive"), None);
    }

    #[test]
    fn test_unknown_asset_type_passes_through() {
        let query = UpstreamQuery::build(&params("cat", "mockup")).unwrap();
        assert_eq!(query.get("asset"), Some("mockup"));
    }

    #[test]
    fn test_to_url() {
        let endpoint = Url::parse("https://api.example.com/v2/search").unwrap();
        let url = UpstreamQuery::build(&params("red cat", "icons"))
            .unwrap()
            .to_url(&endpoint);
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v2/search?query=red+cat&product_type=item&asset=icon&per_page=30&page=1&sort=relevant"
        );
    }

    #[test]
    fn test_request_converts_to_params() {
        let request = SearchRequest {
            query: "cat".to_string(),
            asset_type: AssetType::Icons,
            page: 2,
            per_page: 60,
            sort: SortBy::Featured,
            price: Price::All,
            view: View::Item,
        };
        let p = SearchParams::from(&request);
        assert_eq!(p.asset_type.as_deref(), Some("icons"));
        assert_eq!(p.page.as_deref(), Some("2"));
        assert_eq!(p.per_page.as_deref(), Some("60"));
        assert_eq!(p.sort.as_deref(), Some("featured"));
        assert_eq!(p.price.as_deref(), Some("all"));
        assert_eq!(p.exclude, None);
    }
}
