//! Channel-name normalization.
//!
//! Playlist names and catalog names never agree on casing, punctuation, or
//! quality markers, so both sides are reduced to a bare alphanumeric key
//! before any comparison. Two names are equal for matching purposes exactly
//! when their keys are equal.

use unicode_normalization::UnicodeNormalization;

/// Reduce a raw channel name to its matchable key.
///
/// Stages, in order:
/// 1. Unicode NFKC + case folding (fullwidth digits/letters become ASCII)
/// 2. Punctuation erasure (keep alphanumerics and whitespace)
/// 3. Noise-word removal (whole words from the configured strip list)
/// 4. Concatenation; the key contains only `[a-z0-9]`
///
/// Total and deterministic; empty input yields an empty key.
pub fn normalize(raw: &str, noise_words: &[String]) -> String {
    let folded = raw.nfkc().collect::<String>().to_lowercase();
    let scrubbed: String = folded
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    scrubbed
        .split_whitespace()
        .filter(|word| !noise_words.iter().any(|noise| noise == word))
        .collect()
}

/// First maximal run of digits in the text, if any.
///
/// "bein sports 3" → 3, "4k channel 12" → 4. Runs too long for `u64` are
/// treated as absent.
pub fn leading_number(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
