//! Extended-M3U playlist parsing.
//!
//! A playlist is an ordered sequence of entry blocks: an `#EXTINF` header
//! line followed by every line up to the next header (stream URLs and extra
//! tags, all opaque payload). Blocks are atomic: they are never split,
//! merged, or reordered. Lines before the first header (including the
//! `#EXTM3U` sentinel) pass through verbatim.

use std::fmt;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

/// Marker that opens an entry block.
pub const RECORD_MARKER: &str = "#EXTINF";

/// The fixed leading token of a standard header line. The `tvg-id`
/// attribute is spliced in right after it when not already present.
const LEADING_TOKEN: &str = "#EXTINF:-1";

static RE_TVG_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"tvg-id="[^"]*""#).expect("tvg-id pattern is valid"));

/// One playlist entry: a header line plus its attached payload lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub header: String,
    pub payload: Vec<String>,
}

/// A playlist line group: either a full entry block or a raw passthrough
/// line that belongs to no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistItem {
    Entry(PlaylistEntry),
    Raw(String),
}

/// An ordered playlist. Rendering emits exactly the parsed lines, with any
/// header rewrites applied; everything else round-trips byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub items: Vec<PlaylistItem>,
}

impl PlaylistEntry {
    /// The display name: everything after the first comma of the header.
    /// Headers without a comma have no display name.
    pub fn display_name(&self) -> &str {
        match self.header.split_once(',') {
            Some((_, name)) => name,
            None => "",
        }
    }

    /// Replace the display name, keeping the attribute part of the header.
    /// A header without a comma carries no name slot and is left alone.
    pub fn set_display_name(&mut self, name: &str) {
        if let Some((head, _)) = self.header.split_once(',') {
            self.header = format!("{head},{name}");
        }
    }

    /// The current `tvg-id` attribute value, if any.
    pub fn tvg_id(&self) -> Option<&str> {
        let m = RE_TVG_ID.find(&self.header)?;
        // tvg-id="<value>"
        Some(&self.header[m.start() + 8..m.end() - 1])
    }

    /// Set the `tvg-id` attribute: replaced in place when present, otherwise
    /// inserted immediately after the leading token.
    pub fn set_tvg_id(&mut self, id: &str) {
        let attr = format!(r#"tvg-id="{id}""#);
        if RE_TVG_ID.is_match(&self.header) {
            self.header = RE_TVG_ID
                .replace(&self.header, NoExpand(&attr))
                .into_owned();
        } else if self.header.contains(LEADING_TOKEN) {
            self.header = self
                .header
                .replacen(LEADING_TOKEN, &format!("{LEADING_TOKEN} {attr}"), 1);
        } else {
            // Non-standard duration field: splice before the first space or
            // comma so the attribute still lands in the header's attr area.
            let pos = self
                .header
                .find([' ', ','])
                .unwrap_or(self.header.len());
            self.header.insert_str(pos, &format!(" {attr}"));
        }
    }
}

impl Playlist {
    /// Parse playlist text into ordered items.
    ///
    /// Lines before the first record marker become `Raw` passthrough items;
    /// from the first marker on, every line is swallowed into the current
    /// entry's payload until the next marker.
    pub fn parse(text: &str) -> Playlist {
        let mut items = Vec::new();
        let mut current: Option<PlaylistEntry> = None;

        for line in text.lines() {
            if line.starts_with(RECORD_MARKER) {
                if let Some(entry) = current.take() {
                    items.push(PlaylistItem::Entry(entry));
                }
                current = Some(PlaylistEntry {
                    header: line.to_string(),
                    payload: Vec::new(),
                });
            } else if let Some(entry) = current.as_mut() {
                entry.payload.push(line.to_string());
            } else {
                items.push(PlaylistItem::Raw(line.to_string()));
            }
        }
        if let Some(entry) = current.take() {
            items.push(PlaylistItem::Entry(entry));
        }

        tracing::debug!(items = items.len(), "Playlist parsed");
        Playlist { items }
    }

    /// Iterate entry blocks only, in playlist order.
    pub fn entries(&self) -> impl Iterator<Item = &PlaylistEntry> {
        self.items.iter().filter_map(|item| match item {
            PlaylistItem::Entry(entry) => Some(entry),
            PlaylistItem::Raw(_) => None,
        })
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            match item {
                PlaylistItem::Raw(line) => writeln!(f, "{line}")?,
                PlaylistItem::Entry(entry) => {
                    writeln!(f, "{}", entry.header)?;
                    for line in &entry.payload {
                        writeln!(f, "{line}")?;
                    }
                }
            }
        }
        Ok(())
    }
}
