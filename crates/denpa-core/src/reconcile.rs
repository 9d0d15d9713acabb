//! Playlist reconciliation: the batch pass tying everything together.
//!
//! Walks the playlist in order, matches every entry, rewrites headers, and
//! files one ledger row per entry. Entry count and order are preserved
//! exactly; payload lines ride along untouched.

use denpa_parse::{Playlist, PlaylistItem};

use crate::catalog::EpgIndex;
use crate::config::AppConfig;
use crate::matcher::{match_channel, MatchOutcome};
use crate::models::{AliasedRow, MatchedRow, UnmatchedRow};
use crate::schedule;

/// Everything one reconciliation run produces.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    /// The rewritten playlist, structurally identical to the input.
    pub playlist: Playlist,
    pub matched: Vec<MatchedRow>,
    pub aliased: Vec<AliasedRow>,
    pub unmatched: Vec<UnmatchedRow>,
}

/// Reconcile a playlist against a built catalog index.
///
/// Per entry: match the display name, set the `tvg-id` attribute, and, for
/// direct matches with a live or upcoming event, replace the display name
/// with the event label. Raw passthrough lines are emitted unchanged and
/// never ledgered. The index carries the run's reference instant from its
/// build, so every entry sees the same live/next classification.
pub fn reconcile(playlist: Playlist, index: &EpgIndex, config: &AppConfig) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for item in playlist.items {
        let mut entry = match item {
            PlaylistItem::Raw(line) => {
                outcome.playlist.items.push(PlaylistItem::Raw(line));
                continue;
            }
            PlaylistItem::Entry(entry) => entry,
        };

        let raw_name = entry.display_name().to_string();
        match match_channel(&raw_name, index, config) {
            MatchOutcome::Matched { id, epg_name, score } => {
                entry.set_tvg_id(&id);
                if let Some(airing) = schedule::lookup(index, &id) {
                    entry.set_display_name(&schedule::airing_label(&airing, &config.schedule));
                }
                outcome.matched.push(MatchedRow {
                    channel: raw_name,
                    epg_name,
                    tvg_id: id,
                    score,
                });
            }
            MatchOutcome::Aliased { id, alias } => {
                entry.set_tvg_id(&id);
                outcome.aliased.push(AliasedRow {
                    channel: raw_name,
                    alias,
                    tvg_id: id,
                });
            }
            MatchOutcome::Unmatched { id } => {
                entry.set_tvg_id(&id);
                outcome.unmatched.push(UnmatchedRow {
                    channel: raw_name,
                    tvg_id: id,
                });
            }
        }
        outcome.playlist.items.push(PlaylistItem::Entry(entry));
    }

    tracing::info!(
        matched = outcome.matched.len(),
        aliased = outcome.aliased.len(),
        unmatched = outcome.unmatched.len(),
        "Playlist reconciled"
    );
    outcome
}
