//! Playlist/EPG reconciliation engine.
//!
//! Takes a broadcast playlist and a schedule catalog as text, matches every
//! playlist channel to its canonical schedule identifier, and rewrites the
//! playlist with `tvg-id` attributes and live/upcoming event labels. The
//! whole pipeline is synchronous and total: a run always completes and emits
//! the rewritten playlist plus three classification ledgers.

pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod schedule;

pub use catalog::EpgIndex;
pub use config::AppConfig;
pub use error::DenpaError;
pub use matcher::{match_channel, MatchOutcome};
pub use reconcile::{reconcile, ReconcileOutcome};
pub use schedule::Airing;
