pub mod epg;
pub mod ledger;

pub use epg::{EpgChannel, Programme};
pub use ledger::{AliasedRow, MatchedRow, UnmatchedRow};
