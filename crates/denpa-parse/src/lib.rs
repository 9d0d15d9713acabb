//! Line-level parsing for playlists and schedule catalogs.
//!
//! Both parsers are deliberately permissive: upstream feeds are generated by
//! tools of varying quality, so malformed fragments are dropped and scanning
//! continues. Nothing in this crate fails.

pub mod epg;
pub mod playlist;

pub use epg::{scan, EpgRecord, RawChannel, RawProgramme};
pub use playlist::{Playlist, PlaylistEntry, PlaylistItem};
