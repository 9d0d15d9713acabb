//! Catalog index: normalized channel directory plus live/upcoming events.
//!
//! Built once per run against a fixed reference instant, then only read.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};

use denpa_parse::epg::{self, EpgRecord, RawProgramme};

use crate::config::AppConfig;
use crate::models::{EpgChannel, Programme};
use crate::normalize::normalize;

/// In-memory index of a loaded catalog.
///
/// `channels` keeps catalog order (replacements on duplicate normalized
/// keys stay in their original position, so matching iterates
/// deterministically); `live`/`upcoming` hold at most one event per channel.
#[derive(Debug, Clone, Default)]
pub struct EpgIndex {
    channels: Vec<EpgChannel>,
    by_key: HashMap<String, usize>,
    live: HashMap<String, Programme>,
    upcoming: HashMap<String, Programme>,
}

impl EpgIndex {
    /// Build the index from catalog text.
    ///
    /// `now` is the run's reference instant: programmes whose interval
    /// contains it become the channel's live event (last seen in scan wins);
    /// future programmes compete for the upcoming slot (earliest start wins,
    /// first seen on ties). Fully past programmes, programmes failing the
    /// event-keyword filter, and records with unparseable timestamps are
    /// dropped without aborting the load.
    pub fn build(catalog_text: &str, now: DateTime<Utc>, config: &AppConfig) -> EpgIndex {
        let mut index = EpgIndex::default();
        let mut filtered = 0usize;
        let mut bad_stamps = 0usize;

        for record in epg::scan(catalog_text) {
            match record {
                EpgRecord::Channel(raw) => {
                    let key = normalize(&raw.name, &config.matching.noise_words);
                    if key.is_empty() {
                        tracing::debug!(id = %raw.id, name = %raw.name, "Channel name normalizes to nothing, skipping");
                        continue;
                    }
                    index.insert_channel(EpgChannel {
                        id: raw.id,
                        display_name: raw.name,
                        normalized_key: key,
                    });
                }
                EpgRecord::Programme(raw) => {
                    let (start, stop) = match (parse_instant(&raw.start), parse_instant(&raw.stop))
                    {
                        (Some(start), Some(stop)) => (start, stop),
                        _ => {
                            bad_stamps += 1;
                            continue;
                        }
                    };
                    if !is_of_interest(&raw, &config.schedule.keywords) {
                        filtered += 1;
                        continue;
                    }
                    index.classify(
                        Programme {
                            channel_id: raw.channel,
                            title: raw.title,
                            description: raw.description,
                            start,
                            stop,
                        },
                        now,
                    );
                }
            }
        }

        tracing::info!(
            channels = index.channels.len(),
            live = index.live.len(),
            upcoming = index.upcoming.len(),
            filtered,
            bad_stamps,
            "Catalog index built"
        );
        index
    }

    /// Insert a channel under its normalized key. Duplicate keys replace the
    /// earlier entry in place: last write wins, original position kept.
    fn insert_channel(&mut self, channel: EpgChannel) {
        match self.by_key.get(&channel.normalized_key) {
            Some(&slot) => self.channels[slot] = channel,
            None => {
                self.by_key
                    .insert(channel.normalized_key.clone(), self.channels.len());
                self.channels.push(channel);
            }
        }
    }

    /// Slot a retained programme relative to the reference instant.
    fn classify(&mut self, programme: Programme, now: DateTime<Utc>) {
        if programme.start <= now && now <= programme.stop {
            self.live.insert(programme.channel_id.clone(), programme);
        } else if programme.start > now {
            match self.upcoming.get(&programme.channel_id) {
                Some(held) if held.start <= programme.start => {}
                _ => {
                    self.upcoming
                        .insert(programme.channel_id.clone(), programme);
                }
            }
        }
        // Entirely past: ignored.
    }

    /// Channels in catalog order.
    pub fn channels(&self) -> impl Iterator<Item = &EpgChannel> {
        self.channels.iter()
    }

    pub fn channel_by_key(&self, key: &str) -> Option<&EpgChannel> {
        self.by_key.get(key).map(|&slot| &self.channels[slot])
    }

    /// The currently-live event of interest for a channel, if any.
    pub fn live(&self, channel_id: &str) -> Option<&Programme> {
        self.live.get(channel_id)
    }

    /// The earliest upcoming event of interest for a channel, if any.
    pub fn upcoming(&self, channel_id: &str) -> Option<&Programme> {
        self.upcoming.get(channel_id)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Parse a catalog timestamp: the first 14 characters encode
/// `YYYYMMDDHHMMSS` in UTC; any offset suffix is ignored.
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let stamp = raw.get(..14)?;
    if !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, "%Y%m%d%H%M%S")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Case-folded keyword gate over title + description.
fn is_of_interest(raw: &RawProgramme, keywords: &[String]) -> bool {
    let haystack = format!("{} {}", raw.title, raw.description).to_lowercase();
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}
