//! Asset identity types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::encode_path;

/// Error decoding a [`GraphId`] back into an [`AssetKey`].
#[derive(Debug, thiserror::Error)]
#[error("Invalid graph id {id}: {source}")]
pub struct GraphIdError {
    /// The id that failed to decode.
    pub id: String,
    /// Underlying JSON error.
    #[source]
    pub source: serde_json::Error,
}

/// Ordered path segments identifying an asset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    /// Path segments, outermost first.
    pub path: Vec<String>,
}

impl AssetKey {
    /// Create a key from path segments.
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Canonical graph identity for this key.
    pub fn graph_id(&self) -> GraphId {
        GraphId(encode_path(&self.path))
    }

    /// Slash-joined token, e.g. `raw/events`.
    pub fn to_token(&self) -> String {
        self.path.join("/")
    }

    /// Human-readable name, e.g. `raw / events`.
    pub fn display_name(&self) -> String {
        self.path.join(" / ")
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl<S: Into<String>> From<Vec<S>> for AssetKey {
    fn from(path: Vec<S>) -> Self {
        Self::new(path)
    }
}

/// Canonical string identity of an asset key.
///
/// Two keys are the same graph node iff their ids are equal. Implements `Ord`
/// so graph indexes iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(String);

impl GraphId {
    /// Borrow the encoded id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the asset key this id was derived from.
    ///
    /// Useful for ids that reference assets outside the loaded node set.
    pub fn to_asset_key(&self) -> Result<AssetKey, GraphIdError> {
        serde_json::from_str::<Vec<String>>(&self.0)
            .map(AssetKey::new)
            .map_err(|source| GraphIdError {
                id: self.0.clone(),
                source,
            })
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&AssetKey> for GraphId {
    fn from(key: &AssetKey) -> Self {
        key.graph_id()
    }
}
