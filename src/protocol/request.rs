//! Request definitions
//!
//! Represents requests from clients.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request kinds understood by the server.
///
/// A kind outside this set decodes to [`RequestKind::Unknown`] so the
/// dispatcher can ignore the request instead of failing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Merge the payload into the store
    Update,

    /// Read the entire store
    Get,

    /// Remove every entry from the store
    Clear,

    /// Any kind this server does not recognize
    Unknown,
}

impl RequestKind {
    /// The wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Update => "update",
            RequestKind::Get => "get",
            RequestKind::Clear => "clear",
            RequestKind::Unknown => "unknown",
        }
    }
}

impl From<&str> for RequestKind {
    fn from(s: &str) -> RequestKind {
        match s {
            "update" => RequestKind::Update,
            "get" => RequestKind::Get,
            "clear" => RequestKind::Clear,
            _ => RequestKind::Unknown,
        }
    }
}

impl Serialize for RequestKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RequestKind::from(s.as_str()))
    }
}

/// A single client request.
///
/// Transient: built by the client per call, consumed once by the
/// server, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// What the server should do with this request
    #[serde(rename = "type")]
    pub kind: RequestKind,

    /// Payload: an object for `update`, null otherwise
    #[serde(default)]
    pub data: Value,
}

impl Request {
    /// An `update` request carrying the entries to merge
    pub fn update(data: Map<String, Value>) -> Request {
        Request {
            kind: RequestKind::Update,
            data: Value::Object(data),
        }
    }

    /// A `get` request. Carries no payload.
    pub fn get() -> Request {
        Request {
            kind: RequestKind::Get,
            data: Value::Null,
        }
    }

    /// A `clear` request. Carries no payload.
    pub fn clear() -> Request {
        Request {
            kind: RequestKind::Clear,
            data: Value::Null,
        }
    }
}
