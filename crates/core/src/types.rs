//! Core type definitions for AssetScout

use crate::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Pricing tier filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Price {
    /// Any price; never sent upstream
    #[default]
    All,
    Free,
    Premium,
}

impl Price {
    pub const ALL: [Price; 3] = [Price::All, Price::Free, Price::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Free => "free",
            Self::Premium => "premium",
        }
    }
}

/// Whether results are single items or bundles of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Item,
    Pack,
}

impl View {
    pub const ALL: [View; 2] = [View::Item, View::Pack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Pack => "pack",
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Featured,
    Popular,
    Latest,
    Relevant,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [
        SortBy::Featured,
        SortBy::Popular,
        SortBy::Latest,
        SortBy::Relevant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Popular => "popular",
            Self::Latest => "latest",
            Self::Relevant => "relevant",
        }
    }
}

/// User-facing asset category, as it appears in routes and tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssetType {
    #[default]
    #[serde(rename = "all-assets")]
    AllAssets,
    #[serde(rename = "icons")]
    Icons,
    #[serde(rename = "illustrations")]
    Illustrations,
    #[serde(rename = "3d-illustrations")]
    ThreeDIllustrations,
    #[serde(rename = "lottie-animations")]
    LottieAnimations,
}

impl AssetType {
    pub const ALL: [AssetType; 5] = [
        AssetType::AllAssets,
        AssetType::Icons,
        AssetType::Illustrations,
        AssetType::ThreeDIllustrations,
        AssetType::LottieAnimations,
    ];

    /// Route/tab label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllAssets => "all-assets",
            Self::Icons => "icons",
            Self::Illustrations => "illustrations",
            Self::ThreeDIllustrations => "3d-illustrations",
            Self::LottieAnimations => "lottie-animations",
        }
    }

    /// Page size used when the controller requests this category
    pub fn page_size(&self) -> u32 {
        match self {
            Self::Icons => 60,
            _ => 30,
        }
    }
}

macro_rules! impl_label_enum {
    ($ty:ty, $name:literal) => {
        impl FromStr for $ty {
            type Err = ScoutError;

            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| ScoutError::validation(format!("Invalid {}: {}", $name, s)))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_label_enum!(Price, "price");
impl_label_enum!(View, "view");
impl_label_enum!(SortBy, "sort");
impl_label_enum!(AssetType, "asset type");

/// The complete filter record owned by the search controller
///
/// Every field always holds one of its enumerated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Restrict to marketplace-exclusive assets (client-side only)
    pub exclusive: bool,
    pub price: Price,
    pub asset_type: AssetType,
    pub view: View,
    pub sort_by: SortBy,
}

impl SearchFilters {
    /// Apply a patch, returning the patch restricted to fields that actually changed
    pub fn apply(&mut self, patch: &FiltersPatch) -> FiltersPatch {
        let mut changed = FiltersPatch::default();

        if let Some(exclusive) = patch.exclusive.filter(|v| *v != self.exclusive) {
            self.exclusive = exclusive;
            changed.exclusive = Some(exclusive);
        }
        if let Some(price) = patch.price.filter(|v| *v != self.price) {
            self.price = price;
            changed.price = Some(price);
        }
        if let Some(asset_type) = patch.asset_type.filter(|v| *v != self.asset_type) {
            self.asset_type = asset_type;
            changed.asset_type = Some(asset_type);
        }
        if let Some(view) = patch.view.filter(|v| *v != self.view) {
            self.view = view;
            changed.view = Some(view);
        }
        if let Some(sort_by) = patch.sort_by.filter(|v| *v != self.sort_by) {
            self.sort_by = sort_by;
            changed.sort_by = Some(sort_by);
        }

        changed
    }
}

/// Partial filter update; `None` leaves the field untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<AssetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
}

impl FiltersPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether applying this patch changes what the upstream API returns
    ///
    /// `exclusive` is evaluated client-side and never requires a new fetch.
    pub fn requires_refetch(&self) -> bool {
        self.price.is_some()
            || self.asset_type.is_some()
            || self.view.is_some()
            || self.sort_by.is_some()
    }
}

/// An asset returned by the upstream search API
///
/// The payload is passed through untouched; only the identifier and the
/// exclusivity flag are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetItem(pub Value);

impl AssetItem {
    /// `id`, falling back to `uuid`
    pub fn id(&self) -> Option<String> {
        ["id", "uuid"]
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Display name, if the payload carries one
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Display label for the upstream `asset` code, e.g. `"3d"` → `"3D Illustrations"`
    pub fn asset_label(&self) -> Option<String> {
        self.0
            .get("asset")
            .and_then(Value::as_str)
            .map(crate::asset_type::label_for_code)
    }

    pub fn is_exclusive(&self) -> bool {
        self.0
            .get("additional_informations")
            .and_then(|info| info.get("iconscout_exclusive"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl From<Value> for AssetItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
