use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DenpaError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Deployment configuration. Built once, passed by reference everywhere;
/// nothing in the engine mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub matching: MatchingConfig,
    pub schedule: ScheduleConfig,
    pub fallback: FallbackConfig,
}

/// Channel-name matching knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Quality/state markers stripped during normalization.
    pub noise_words: Vec<String>,
    /// Minimum (possibly boosted) similarity ratio to accept a candidate.
    pub threshold: f64,
    /// Added when both keys carry a leading number and the catalog key
    /// contains that numeral.
    pub numeric_boost: f64,
    /// Classify catalog-missed names containing a sport keyword as aliased
    /// (flagged for curation) rather than unmatched.
    pub alias_on_sport_keyword: bool,
    pub sport_keywords: Vec<String>,
    /// Brands tried during alias retry, in order.
    pub brands: Vec<BrandAlias>,
}

/// One sports-network brand and its catalog naming convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandAlias {
    pub token: String,
    pub style: AliasStyle,
}

/// How a brand's numbered channels are titled in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AliasStyle {
    /// `<brand><n>`, e.g. `tnt2`.
    Plain,
    /// `<brand>sport<n>`, e.g. `beinsport3`.
    SportInfix,
}

impl BrandAlias {
    /// Build the alias key for a channel number.
    pub fn alias_key(&self, number: u64) -> String {
        match self.style {
            AliasStyle::Plain => format!("{}{number}", self.token),
            AliasStyle::SportInfix => format!("{}sport{number}", self.token),
        }
    }
}

/// Programme filtering and display-time settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Event-of-interest vocabulary; a programme is retained only if its
    /// title or description contains one of these, case-folded.
    pub keywords: Vec<String>,
    /// Reference time zone offset for event labels.
    pub utc_offset_hours: i32,
    pub tz_label: String,
}

/// Fallback identifier shape for catalog misses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub prefix: String,
    /// Digest bytes kept (two hex characters each).
    pub digest_bytes: usize,
}

impl AppConfig {
    /// Load a site-specific config file, replacing the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self, DenpaError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DenpaError::Config(e.to_string()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.matching.threshold, 0.75);
        assert_eq!(config.matching.numeric_boost, 0.15);
        assert!(config.matching.alias_on_sport_keyword);
        assert!(config.matching.noise_words.iter().any(|w| w == "hd"));
        assert_eq!(config.schedule.utc_offset_hours, 7);
        assert_eq!(config.schedule.tz_label, "WIB");
        assert_eq!(config.fallback.digest_bytes, 6);
    }

    #[test]
    fn bein_uses_sport_infix() {
        let config = AppConfig::default();
        let bein = config
            .matching
            .brands
            .iter()
            .find(|b| b.token == "bein")
            .expect("bein brand configured");
        assert_eq!(bein.style, AliasStyle::SportInfix);
        assert_eq!(bein.alias_key(3), "beinsport3");
    }

    #[test]
    fn plain_brand_concatenates_number() {
        let brand = BrandAlias {
            token: "tnt".to_string(),
            style: AliasStyle::Plain,
        };
        assert_eq!(brand.alias_key(2), "tnt2");
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let err = AppConfig::load_from(Path::new("/nonexistent/denpa.toml"));
        assert!(matches!(err, Err(DenpaError::Io(_))));
    }
}
