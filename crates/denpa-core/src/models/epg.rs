use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog channel: canonical schedule identifier plus display name.
/// Immutable after the index build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpgChannel {
    pub id: String,
    pub display_name: String,
    /// The matchable key derived from `display_name`.
    pub normalized_key: String,
}

/// A scheduled programme with parsed UTC bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Programme {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}
