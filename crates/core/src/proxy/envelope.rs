//! Response envelopes exchanged between the upstream API, the proxy and the controller

use crate::types::AssetItem;
use crate::{Result, ScoutError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `status` as reported by upstream: a word such as `"success"` or a numeric code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeStatus {
    Text(String),
    Code(i64),
}

/// `{status, message?, response?}`; fields this crate does not model are kept
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnvelopeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseBody>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchEnvelope {
    /// The error envelope every proxy failure is reported as
    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            status: Some(EnvelopeStatus::Text("error".to_string())),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn success(items: ItemsPage) -> Self {
        Self {
            status: Some(EnvelopeStatus::Text("success".to_string())),
            response: Some(ResponseBody {
                items: Some(items),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(&self.status, Some(EnvelopeStatus::Text(s)) if s == "error")
    }

    /// The `response.items` page, or an empty page when absent
    pub fn into_items_page(self) -> ItemsPage {
        self.response.and_then(|r| r.items).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsPage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packs: Option<ItemsPage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemsPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<Numeric>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<AssetItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Numeric>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemsPage {
    /// `total` read as a count; absent or unreadable totals are `None`
    pub fn total_count(&self) -> Option<u64> {
        self.total.as_ref().and_then(Numeric::as_u64)
    }
}

/// A number upstream may send as `25` or `"25"`, re-emitted in the form it arrived in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Numeric(Value);

impl Numeric {
    pub fn as_u64(&self) -> Option<u64> {
        match &self.0 {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<u64> for Numeric {
    fn from(value: u64) -> Self {
        Self(Value::from(value))
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Upstream payload, tagged by the `view` the request was made with
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResponse {
    /// `view=item`: results under `response.items`
    Items(SearchEnvelope),
    /// `view=pack`: results under `response.packs`
    Packs(SearchEnvelope),
}

impl UpstreamResponse {
    pub fn from_slice(view: &str, body: &[u8]) -> Result<Self> {
        let envelope: SearchEnvelope = serde_json::from_slice(body)
            .map_err(|e| ScoutError::malformed(e.to_string()))?;

        Ok(if view == "pack" {
            Self::Packs(envelope)
        } else {
            Self::Items(envelope)
        })
    }

    /// Normalise into the `response.items` shape the controller reads
    pub fn into_envelope(self) -> SearchEnvelope {
        match self {
            Self::Items(envelope) => envelope,
            Self::Packs(envelope) => reshape_packs(envelope),
        }
    }
}

/// Move `response.packs` to `response.items`, defaulting `total` to the page length
fn reshape_packs(mut envelope: SearchEnvelope) -> SearchEnvelope {
    if let Some(body) = envelope.response.as_mut() {
        if let Some(mut packs) = body.packs.take() {
            if packs.total.is_none() {
                packs.total = Some(Numeric::from(packs.data.len() as u64));
            }
            body.items = Some(packs);
        }
    }
    envelope
}
