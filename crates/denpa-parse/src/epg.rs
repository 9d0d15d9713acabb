//! Permissive line-oriented scanner for XMLTV-style schedule catalogs.
//!
//! This is not an XML parser. Upstream feeds are frequently truncated or
//! hand-patched, so the scanner only relies on the line shapes that matter:
//! `<channel ...>` openings with an `id` attribute, display-name lines inside
//! the channel block, `<programme ...>` openings with `channel`/`start`/`stop`
//! attributes, and title/description lines before the closing marker.
//! Everything else is ignored; partial records are discarded, never reported.

use std::sync::LazyLock;

use regex::Regex;

static RE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z][A-Za-z0-9_-]*)="([^"]*)""#).expect("attribute pattern is valid")
});

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// A committed channel record: canonical id plus human-readable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChannel {
    pub id: String,
    pub name: String,
}

/// A committed programme record. Timestamps are raw attribute text; the
/// index build decides whether they parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProgramme {
    pub channel: String,
    pub start: String,
    pub stop: String,
    pub title: String,
    pub description: String,
}

/// One record committed by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpgRecord {
    Channel(RawChannel),
    Programme(RawProgramme),
}

/// Scanner state. The buffered partial record is owned here and dropped on
/// early or malformed termination.
enum ScanState {
    Idle,
    InChannel { id: Option<String> },
    InProgramme(RawProgramme),
}

/// Scan catalog text and return every committed record, in document order.
pub fn scan(text: &str) -> Vec<EpgRecord> {
    let mut records = Vec::new();
    let mut state = ScanState::Idle;
    let mut dropped = 0usize;

    for line in text.lines() {
        let line = line.trim();

        if line.starts_with("<channel") {
            // Any in-flight record is abandoned by a new opening marker.
            if !matches!(state, ScanState::Idle) {
                dropped += 1;
            }
            state = ScanState::InChannel {
                id: attr_value(line, "id"),
            };
        } else if line.starts_with("<programme") {
            if !matches!(state, ScanState::Idle) {
                dropped += 1;
            }
            state = match open_programme(line) {
                Some(partial) => ScanState::InProgramme(partial),
                None => {
                    dropped += 1;
                    ScanState::Idle
                }
            };
        } else if line.starts_with("</programme") {
            if let ScanState::InProgramme(partial) = std::mem::replace(&mut state, ScanState::Idle)
            {
                records.push(EpgRecord::Programme(partial));
            }
        } else if line.starts_with("</channel") {
            if !matches!(state, ScanState::Idle) {
                // Block closed without a display name (or mid-programme).
                dropped += 1;
            }
            state = ScanState::Idle;
        } else if line.contains("<display-name") && matches!(state, ScanState::InChannel { .. }) {
            if let ScanState::InChannel { id } = std::mem::replace(&mut state, ScanState::Idle) {
                match id {
                    Some(id) => records.push(EpgRecord::Channel(RawChannel {
                        id,
                        name: strip_tags(line),
                    })),
                    None => dropped += 1,
                }
            }
        } else if let ScanState::InProgramme(partial) = &mut state {
            if line.contains("<title") {
                partial.title = strip_tags(line);
            } else if line.contains("<desc") {
                partial.description = strip_tags(line);
            }
        }
    }
    if !matches!(state, ScanState::Idle) {
        dropped += 1;
    }

    tracing::debug!(records = records.len(), dropped, "Catalog scan finished");
    records
}

/// Open a programme record from its opening line. All three attributes are
/// required; a line missing any of them never opens a record.
fn open_programme(line: &str) -> Option<RawProgramme> {
    Some(RawProgramme {
        channel: attr_value(line, "channel")?,
        start: attr_value(line, "start")?,
        stop: attr_value(line, "stop")?,
        ..RawProgramme::default()
    })
}

/// Extract a `name="value"` attribute from a line.
fn attr_value(line: &str, name: &str) -> Option<String> {
    RE_ATTR
        .captures_iter(line)
        .find(|caps| &caps[1] == name)
        .map(|caps| caps[2].to_string())
}

/// Remove every markup tag from a line and trim the remaining text.
fn strip_tags(line: &str) -> String {
    RE_TAG.replace_all(line, "").trim().to_string()
}
