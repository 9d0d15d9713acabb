//! Channel matching: direct similarity, brand-alias retry, deterministic
//! fallback.

use sha2::{Digest, Sha256};

use crate::catalog::EpgIndex;
use crate::config::{AppConfig, FallbackConfig};
use crate::models::EpgChannel;
use crate::normalize::{leading_number, normalize};

/// Result of matching one playlist channel against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Direct similarity hit. `score` is the boosted ratio that cleared the
    /// threshold.
    Matched {
        id: String,
        epg_name: String,
        score: f64,
    },
    /// Resolved through a brand alias (carries the catalog id), or flagged
    /// by sport keyword with no catalog hit (carries the fallback id).
    Aliased { id: String, alias: String },
    /// No catalog counterpart; carries the fallback id.
    Unmatched { id: String },
}

impl MatchOutcome {
    /// The schedule identifier this outcome assigns.
    pub fn id(&self) -> &str {
        match self {
            MatchOutcome::Matched { id, .. }
            | MatchOutcome::Aliased { id, .. }
            | MatchOutcome::Unmatched { id } => id,
        }
    }
}

/// Match a raw playlist channel name against the catalog.
///
/// Pass 1 scores the normalized name against every catalog key; Pass 2
/// retries with brand aliases built from the name's channel number. When
/// both miss, the sport-keyword policy decides between Aliased and
/// Unmatched, and the deterministic fallback identifier is assigned.
pub fn match_channel(raw_name: &str, index: &EpgIndex, config: &AppConfig) -> MatchOutcome {
    let matching = &config.matching;
    let key = normalize(raw_name, &matching.noise_words);

    // Pass 1: direct similarity.
    if let Some((channel, score)) = best_candidate(&key, index, config) {
        if score >= matching.threshold {
            tracing::debug!(
                channel = %raw_name,
                matched = %channel.display_name,
                score = format!("{score:.2}"),
                method = "direct",
                "Catalog hit"
            );
            return MatchOutcome::Matched {
                id: channel.id.clone(),
                epg_name: channel.display_name.clone(),
                score,
            };
        }
    }

    // Pass 2: alias retry, numbered names only. First brand clearing the
    // threshold wins.
    if let Some(number) = leading_number(&key) {
        for brand in &matching.brands {
            let alias = brand.alias_key(number);
            if let Some((channel, score)) = best_candidate(&alias, index, config) {
                if score >= matching.threshold {
                    tracing::debug!(
                        channel = %raw_name,
                        matched = %channel.display_name,
                        alias = %alias,
                        score = format!("{score:.2}"),
                        method = "alias",
                        "Catalog hit"
                    );
                    return MatchOutcome::Aliased {
                        id: channel.id.clone(),
                        alias,
                    };
                }
            }
        }
    }

    // No catalog hit: sport-adjacent names can be flagged for curation.
    let fallback = fallback_id(raw_name, &config.fallback);
    if matching.alias_on_sport_keyword {
        let folded = raw_name.to_lowercase();
        if let Some(keyword) = matching
            .sport_keywords
            .iter()
            .find(|keyword| folded.contains(keyword.to_lowercase().as_str()))
        {
            tracing::debug!(channel = %raw_name, keyword = %keyword, "No catalog hit, aliased by sport keyword");
            return MatchOutcome::Aliased {
                id: fallback,
                alias: keyword.clone(),
            };
        }
    }
    tracing::debug!(channel = %raw_name, "No catalog hit");
    MatchOutcome::Unmatched { id: fallback }
}

/// Best catalog candidate for a key, with its boosted score. First maximum
/// wins ties; the caller applies the acceptance threshold.
fn best_candidate<'a>(
    key: &str,
    index: &'a EpgIndex,
    config: &AppConfig,
) -> Option<(&'a EpgChannel, f64)> {
    let mut best: Option<(&EpgChannel, f64)> = None;
    for channel in index.channels() {
        let mut score = lcs_ratio(key, &channel.normalized_key);
        if let (Some(number), Some(_)) = (
            leading_number(key),
            leading_number(&channel.normalized_key),
        ) {
            if channel.normalized_key.contains(&number.to_string()) {
                score += config.matching.numeric_boost;
            }
        }
        if best.map_or(true, |(_, held)| score > held) {
            best = Some((channel, score));
        }
    }
    best
}

/// Symmetric sequence-similarity ratio in `[0, 1]`:
/// `2 * LCS(a, b) / (|a| + |b|)`. Exactly 1.0 only for identical keys.
/// Operates on normalized (ASCII) keys.
fn lcs_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut prev = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            row[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                row[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    2.0 * prev[b.len()] as f64 / (a.len() + b.len()) as f64
}

/// Deterministic fallback identifier: prefix + truncated SHA-256 hex of the
/// raw name. The same raw name yields the same identifier on every run.
pub fn fallback_id(raw_name: &str, config: &FallbackConfig) -> String {
    let digest = Sha256::digest(raw_name.as_bytes());
    let mut id = String::with_capacity(config.prefix.len() + config.digest_bytes * 2);
    id.push_str(&config.prefix);
    for byte in digest.iter().take(config.digest_bytes) {
        use std::fmt::Write as _;
        let _ = write!(&mut id, "{byte:02x}");
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Index with numbered siblings and a bein entry, no programmes.
    fn index() -> EpgIndex {
        let text = "\
<channel id=\"sp1\">
<display-name>SuperSport 1</display-name>
</channel>
<channel id=\"sp2\">
<display-name>SuperSport 2</display-name>
</channel>
<channel id=\"bein3\">
<display-name>BeIN Sports 3</display-name>
</channel>
<channel id=\"news\">
<display-name>World News</display-name>
</channel>\n";
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        EpgIndex::build(text, now, &AppConfig::default())
    }

    #[test]
    fn noisy_name_matches_directly() {
        // "SuperSport 1 HD" and "SuperSport 1" share the key "supersport1".
        let outcome = match_channel("SuperSport 1 HD", &index(), &AppConfig::default());
        match outcome {
            MatchOutcome::Matched { id, epg_name, score } => {
                assert_eq!(id, "sp1");
                assert_eq!(epg_name, "SuperSport 1");
                assert!(score >= 0.75);
            }
            other => panic!("Expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn numeric_boost_picks_the_right_sibling() {
        // Pure similarity barely separates "supersport2" from "supersport1";
        // the boost goes only to the catalog key containing the numeral.
        let outcome = match_channel("Super Sport 2", &index(), &AppConfig::default());
        match outcome {
            MatchOutcome::Matched { id, .. } => assert_eq!(id, "sp2"),
            other => panic!("Expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn alias_retry_recovers_brand_numbering() {
        // Direct similarity misses, but the name carries a channel number,
        // so the bein sport-infix alias finds the catalog entry.
        let outcome = match_channel("Saluran 3 Sepak Bola", &index(), &AppConfig::default());
        match outcome {
            MatchOutcome::Aliased { id, alias } => {
                assert_eq!(id, "bein3");
                assert_eq!(alias, "beinsport3");
            }
            other => panic!("Expected Aliased, got {other:?}"),
        }
    }

    #[test]
    fn sport_keyword_without_hit_is_aliased_for_curation() {
        let outcome = match_channel("Unlisted Football Channel", &index(), &AppConfig::default());
        match outcome {
            MatchOutcome::Aliased { id, alias } => {
                assert_eq!(alias, "football");
                assert!(id.starts_with("x.denpa."));
            }
            other => panic!("Expected Aliased, got {other:?}"),
        }
    }

    #[test]
    fn keyword_policy_off_falls_through_to_unmatched() {
        let mut config = AppConfig::default();
        config.matching.alias_on_sport_keyword = false;
        let outcome = match_channel("Unlisted Football Channel", &index(), &config);
        assert!(matches!(outcome, MatchOutcome::Unmatched { .. }));
    }

    #[test]
    fn unmatched_fallback_is_deterministic() {
        let config = AppConfig::default();
        let first = match_channel("Totally Unknown", &index(), &config);
        let second = match_channel("Totally Unknown", &index(), &config);
        assert_eq!(first, second);
        match first {
            MatchOutcome::Unmatched { id } => {
                assert!(id.starts_with("x.denpa."));
                // prefix + digest_bytes * 2 hex chars
                assert_eq!(id.len(), "x.denpa.".len() + 12);
            }
            other => panic!("Expected Unmatched, got {other:?}"),
        }
    }

    #[test]
    fn fallback_differs_per_name() {
        let config = AppConfig::default();
        assert_ne!(
            fallback_id("Channel A", &config.fallback),
            fallback_id("Channel B", &config.fallback)
        );
    }

    #[test]
    fn empty_catalog_never_matches() {
        let empty = EpgIndex::default();
        let outcome = match_channel("SuperSport 1", &empty, &AppConfig::default());
        assert!(matches!(outcome, MatchOutcome::Aliased { .. }));
    }

    #[test]
    fn lcs_ratio_is_symmetric() {
        for (a, b) in [("supersport1", "supersport2"), ("bein3", "beinsports3"), ("a", "xyz")] {
            assert_eq!(lcs_ratio(a, b), lcs_ratio(b, a));
        }
    }

    #[test]
    fn lcs_ratio_is_one_only_for_identical() {
        assert_eq!(lcs_ratio("supersport1", "supersport1"), 1.0);
        assert!(lcs_ratio("supersport1", "supersport") < 1.0);
        assert_eq!(lcs_ratio("", ""), 1.0);
        assert_eq!(lcs_ratio("abc", ""), 0.0);
    }

    #[test]
    fn lcs_ratio_degrades_with_distance() {
        let close = lcs_ratio("beinsport3", "beinsports3");
        let far = lcs_ratio("beinsport3", "worldnews");
        assert!(close > 0.9);
        assert!(far < 0.4);
    }
}
