//! Remote entity identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the service to a remote entity.
///
/// Most resources use integer ids, but some endpoints hand back string ids.
/// Both are accepted and written back in the form they were received. Numeric
/// ids keep their JSON representation, so unsigned ids above `i64::MAX` and
/// fractional ids survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(serde_json::Number),
    Text(String),
}

impl EntityId {
    /// The id as a single URL path segment.
    ///
    /// Characters that would end or split a segment (`/`, `?`, `#`) are
    /// percent-encoded, as is `%` itself.
    pub fn path_segment(&self) -> String {
        let raw = self.to_string();
        let mut encoded = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '%' => encoded.push_str("%25"),
                '/' => encoded.push_str("%2F"),
                '?' => encoded.push_str("%3F"),
                '#' => encoded.push_str("%23"),
                c => encoded.push(c),
            }
        }
        encoded
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId::Number(id.into())
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId::Number(id.into())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::Text(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        EntityId::Text(id)
    }
}
