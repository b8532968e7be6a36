use std::collections::BTreeMap;

use ::async_trait::async_trait;
use ::log::warn;
use ::serde::{Deserialize, Serialize};
use ::serde_json::{Map, Value};

mod rest;
pub use rest::RestBackend;

#[derive(Debug, ::thiserror::Error)]
pub enum BackendError {
    #[error("archiver is unavailable: {0}")]
    Unavailable(String),
    #[error("archiver rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("archiver sent a malformed response: {0}")]
    Malformed(String),
}

/// query or form parameters of a page request, forwarded to the archiver as-is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// `other` wins on duplicate keys
    pub fn merge(mut self, other: Params) -> Self {
        self.0.extend(other.0);
        self
    }

    /// strips surrounding whitespace from every value
    pub fn trimmed(self) -> Self {
        Self(
            self.0
                .into_iter()
                .map(|(k, v)| (k, v.trim().to_owned()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One archived bucket as described by the archiver.
///
/// The fields are whatever the archiver sends; pages list them in the order received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketRecord(Map<String, Value>);

impl BucketRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// field name and printable value; strings are shown without JSON quotes
    pub fn fields(&self) -> Vec<(&str, String)> {
        self.0
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (k.as_str(), v)
            })
            .collect()
    }
}

impl From<Map<String, Value>> for BucketRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_indexes(&self) -> Result<Vec<String>, BackendError>;

    async fn list_buckets(&self, params: &Params) -> Result<Vec<BucketRecord>, BackendError>;

    async fn thaw(&self, params: &Params) -> Result<(), BackendError>;
}

/// Stands in for the archiver until one is configured: nothing is listed, every thaw is a no-op.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderBackend;

#[async_trait]
impl Backend for PlaceholderBackend {
    async fn list_indexes(&self) -> Result<Vec<String>, BackendError> {
        Ok(vec![])
    }

    async fn list_buckets(&self, _params: &Params) -> Result<Vec<BucketRecord>, BackendError> {
        Ok(vec![])
    }

    async fn thaw(&self, params: &Params) -> Result<(), BackendError> {
        warn!("no archiver configured, thaw request ignored: {:?}", params);
        Ok(())
    }
}
