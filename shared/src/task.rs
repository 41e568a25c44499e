//! The task document and its identifier.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Number of raw bytes in a [`TaskId`].
pub const TASK_ID_LEN: usize = 12;

/// Store-assigned task identifier.
///
/// Twelve bytes rendered as 24 lowercase hex characters on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId([u8; TASK_ID_LEN]);

impl TaskId {
    pub const fn from_bytes(bytes: [u8; TASK_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> &[u8; TASK_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when a string is not a valid [`TaskId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task id `{0}`: expected {len} hex characters", len = TASK_ID_LEN * 2)]
pub struct ParseTaskIdError(pub String);

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.as_bytes();
        if raw.len() != TASK_ID_LEN * 2 {
            return Err(ParseTaskIdError(s.to_string()));
        }

        let mut bytes = [0u8; TASK_ID_LEN];
        for (i, pair) in raw.chunks_exact(2).enumerate() {
            let (Some(hi), Some(lo)) = (hex_value(pair[0]), hex_value(pair[1])) else {
                return Err(ParseTaskIdError(s.to_string()));
            };
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A stored task as it appears on the wire.
///
/// Fields other than `_id` and `title` are kept as-is in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a create request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extra: Map::new(),
        }
    }

    /// Attach the store-assigned id, producing the stored document.
    ///
    /// Any `_id` the caller put in the body is dropped.
    pub fn with_id(mut self, id: TaskId) -> Task {
        self.extra.retain(|key, _| key != "_id");
        Task {
            id,
            title: self.title,
            extra: self.extra,
        }
    }
}
