//! Bidirectional mapping between [`SearchFilters`] and URL query parameters
//!
//! | field       | parameter             |
//! |-------------|-----------------------|
//! | `price`     | `price`               |
//! | `view`      | `product_type`        |
//! | `sort_by`   | `sort`                |
//! | `exclusive` | `iconscout_exclusive` |
//!
//! `asset_type` travels in the path, not the query string. Values equal to
//! the [`SearchFilters::default`] record are never written.

use crate::types::{FiltersPatch, Price, SearchFilters, SortBy, View};
use indexmap::IndexMap;
use tracing::warn;

pub const PRICE_PARAM: &str = "price";
pub const VIEW_PARAM: &str = "product_type";
pub const SORT_PARAM: &str = "sort";
pub const EXCLUSIVE_PARAM: &str = "iconscout_exclusive";

/// Parameter values for every mapped field; `None` means "omit"
pub fn encode_filters(filters: &SearchFilters) -> [(&'static str, Option<String>); 4] {
    let defaults = SearchFilters::default();

    let non_default = |value: &str, default: &str| {
        if value == default {
            None
        } else {
            Some(value.to_string())
        }
    };

    [
        (
            PRICE_PARAM,
            non_default(filters.price.as_str(), defaults.price.as_str()),
        ),
        (
            VIEW_PARAM,
            non_default(filters.view.as_str(), defaults.view.as_str()),
        ),
        (
            SORT_PARAM,
            non_default(filters.sort_by.as_str(), defaults.sort_by.as_str()),
        ),
        (
            EXCLUSIVE_PARAM,
            filters.exclusive.then(|| "true".to_string()),
        ),
    ]
}

/// Merge the encoded filters into existing parameters.
///
/// Unmapped parameters keep their value and position; mapped parameters are
/// overwritten or removed.
pub fn merge_filters_into_params(
    current: &IndexMap<String, String>,
    filters: &SearchFilters,
) -> IndexMap<String, String> {
    let mut merged = current.clone();

    for (name, value) in encode_filters(filters) {
        match value {
            Some(value) => {
                merged.insert(name.to_string(), value);
            }
            None => {
                merged.shift_remove(name);
            }
        }
    }

    merged
}

/// Read mapped parameters that are present and valid, keeping only values
/// that differ from `current`.
///
/// Absent parameters leave the store value untouched; invalid values are
/// logged and ignored.
pub fn decode_filters(params: &IndexMap<String, String>, current: &SearchFilters) -> FiltersPatch {
    let mut patch = FiltersPatch::default();

    if let Some(raw) = params.get(PRICE_PARAM) {
        match raw.parse::<Price>() {
            Ok(price) if price != current.price => patch.price = Some(price),
            Ok(_) => {}
            Err(_) => warn_invalid(PRICE_PARAM, raw),
        }
    }

    if let Some(raw) = params.get(VIEW_PARAM) {
        match raw.parse::<View>() {
            Ok(view) if view != current.view => patch.view = Some(view),
            Ok(_) => {}
            Err(_) => warn_invalid(VIEW_PARAM, raw),
        }
    }

    if let Some(raw) = params.get(SORT_PARAM) {
        match raw.parse::<SortBy>() {
            Ok(sort_by) if sort_by != current.sort_by => patch.sort_by = Some(sort_by),
            Ok(_) => {}
            Err(_) => warn_invalid(SORT_PARAM, raw),
        }
    }

    if let Some(raw) = params.get(EXCLUSIVE_PARAM) {
        let exclusive = raw == "true";
        if exclusive != current.exclusive {
            patch.exclusive = Some(exclusive);
        }
    }

    patch
}

fn warn_invalid(param: &str, value: &str) {
    warn!(
        "Invalid value \"{}\" for URL parameter \"{}\". Ignoring this parameter.",
        value, param
    );
}
