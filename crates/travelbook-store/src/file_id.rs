//! Tagged file identity.
//!
//! Earlier iterations sniffed a string prefix at every call site to decide
//! whether an id belonged to the local fallback store. The variant carries
//! that decision in the type instead; the prefix survives only as the wire
//! form of local ids.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Wire prefix that marks an id as belonging to the local fallback store.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Identity of a persisted file, tagged with the backend that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileId {
    /// File lives in the on-device fallback store.
    Local(String),
    /// File lives in the remote document store.
    Remote(String),
}

impl FileId {
    /// Classify a wire-form id string.
    pub fn parse(s: &str) -> Self {
        if s.starts_with(LOCAL_ID_PREFIX) {
            Self::Local(s.to_string())
        } else {
            Self::Remote(s.to_string())
        }
    }

    /// Mint a fresh local id.
    pub fn new_local() -> Self {
        Self::Local(format!("{}{}", LOCAL_ID_PREFIX, Uuid::new_v4()))
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// The wire form of the id.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Local(s) | Self::Remote(s) => s,
        }
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FileId::parse(&s))
    }
}
