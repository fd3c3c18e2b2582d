//! Route model (`/{assetType}/{query?}?{params}`) and navigation abstraction

use crate::{Result, ScoutError};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::fmt;

/// A search page location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoute {
    /// First path segment, e.g. `icons`
    pub asset_segment: String,
    /// Decoded second path segment, if any
    pub query: Option<String>,
    /// Query-string parameters in order of first appearance
    pub params: IndexMap<String, String>,
}

impl SearchRoute {
    pub fn new<S: Into<String>>(asset_segment: S) -> Self {
        Self {
            asset_segment: asset_segment.into(),
            query: None,
            params: IndexMap::new(),
        }
    }

    pub fn with_query<S: Into<String>>(mut self, query: S) -> Self {
        let query = query.into();
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    pub fn with_param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parse a path with optional query string, e.g. `/icons/arrow%20left?price=free`
    ///
    /// Segments are split by hand; URL resolution would drop `.` and `..`
    /// queries, percent-encoded or not.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.split('#').next().unwrap_or_default();
        let (path, query_string) = input.split_once('?').unwrap_or((input, ""));

        let mut segments = path.split('/').filter(|s| !s.is_empty());

        let asset_segment = segments
            .next()
            .ok_or_else(|| ScoutError::validation(format!("Route has no asset type: {}", input)))?;
        let asset_segment = decode_segment(asset_segment)?;

        let query = match segments.next() {
            Some(segment) => Some(decode_segment(segment)?),
            None => None,
        };

        let params: IndexMap<String, String> = url::form_urlencoded::parse(query_string.as_bytes())
            .into_owned()
            .collect();

        Ok(Self {
            asset_segment,
            query,
            params,
        })
    }
}

/// Percent-encode a path segment; dot-only segments are fully escaped
fn encode_segment(segment: &str) -> Cow<'_, str> {
    if segment.chars().all(|c| c == '.') {
        Cow::Owned("%2E".repeat(segment.len()))
    } else {
        urlencoding::encode(segment)
    }
}

fn decode_segment(segment: &str) -> Result<String> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|e| ScoutError::validation(format!("Invalid route segment '{}': {}", segment, e)))
}

impl fmt::Display for SearchRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", encode_segment(&self.asset_segment))?;

        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            write!(f, "/{}", encode_segment(query))?;
        }

        if !self.params.is_empty() {
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            serializer.extend_pairs(self.params.iter());
            write!(f, "?{}", serializer.finish())?;
        }

        Ok(())
    }
}

/// Where the controller reads and writes the current location
pub trait Navigator: Send + Sync {
    fn current(&self) -> SearchRoute;

    /// Replace the current location without adding a history entry
    fn replace(&self, route: SearchRoute);
}

/// In-memory navigator that records every replacement
#[derive(Debug)]
pub struct MemoryNavigator {
    inner: Mutex<NavigatorState>,
}

#[derive(Debug)]
struct NavigatorState {
    current: SearchRoute,
    history: Vec<SearchRoute>,
}

impl MemoryNavigator {
    pub fn new(initial: SearchRoute) -> Self {
        Self {
            inner: Mutex::new(NavigatorState {
                current: initial,
                history: Vec::new(),
            }),
        }
    }

    /// Every route passed to `replace`, oldest first
    pub fn history(&self) -> Vec<SearchRoute> {
        self.inner.lock().history.clone()
    }

    pub fn replace_count(&self) -> usize {
        self.inner.lock().history.len()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new(SearchRoute::new(crate::types::AssetType::default().as_str()))
    }
}

impl Navigator for MemoryNavigator {
    fn current(&self) -> SearchRoute {
        self.inner.lock().current.clone()
    }

    fn replace(&self, route: SearchRoute) {
        let mut inner = self.inner.lock();
        tracing::debug!("Navigating to {}", route);
        inner.history.push(route.clone());
        inner.current = route;
    }
}
