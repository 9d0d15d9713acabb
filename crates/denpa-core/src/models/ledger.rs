//! Classification ledger rows.
//!
//! Each reconciled playlist entry produces exactly one row in exactly one
//! ledger. The rows are plain data: whatever writes them out (CSV, a report
//! endpoint) supplies the serialization; `HEADER`/`columns` give the fixed
//! table shape.

use serde::{Deserialize, Serialize};

/// A playlist channel matched directly against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRow {
    pub channel: String,
    pub epg_name: String,
    pub tvg_id: String,
    pub score: f64,
}

impl MatchedRow {
    pub const HEADER: [&'static str; 4] = ["channel", "epg_name", "tvg_id", "score"];

    pub fn columns(&self) -> [String; 4] {
        [
            self.channel.clone(),
            self.epg_name.clone(),
            self.tvg_id.clone(),
            format!("{:.2}", self.score),
        ]
    }
}

/// A channel resolved through alias retry, or flagged by sport keyword for
/// manual catalog curation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasedRow {
    pub channel: String,
    pub alias: String,
    pub tvg_id: String,
}

impl AliasedRow {
    pub const HEADER: [&'static str; 3] = ["channel", "alias", "tvg_id"];

    pub fn columns(&self) -> [String; 3] {
        [self.channel.clone(), self.alias.clone(), self.tvg_id.clone()]
    }
}

/// A channel with no catalog counterpart; carries its fallback identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedRow {
    pub channel: String,
    pub tvg_id: String,
}

impl UnmatchedRow {
    pub const HEADER: [&'static str; 2] = ["channel", "tvg_id"];

    pub fn columns(&self) -> [String; 2] {
        [self.channel.clone(), self.tvg_id.clone()]
    }
}
