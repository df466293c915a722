use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// The biographical fields read from a character's info-box, in column order
pub const GALLERY_FIELDS: [&str; 15] = [
    "Real Name",
    "Current Alias",
    "Aliases",
    "Affiliation",
    "Identity",
    "Citizenship",
    "Occupation",
    "Gender",
    "Height",
    "Weight",
    "Eyes",
    "Hair",
    "Origin",
    "Universe",
    "Creators",
];

/// Configuration for a harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Site root; detail links are resolved against it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the category page listing every character, relative to `base_url`
    #[serde(default = "default_listing_path")]
    pub listing_path: String,

    /// Substring identifying one alphabetical shard of the listing
    #[serde(default = "default_shard_marker")]
    pub shard_marker: String,

    /// Literal text that precedes the "next page" link in rendered text
    #[serde(default = "default_next_marker")]
    pub next_marker: String,

    /// Path segment that every detail link contains
    #[serde(default = "default_link_segment")]
    pub link_segment: String,

    /// Directory holding rendered page text
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Per-request timeout in seconds (none means wait forever)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: Option<u64>,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Regex patterns a detail URL must match (empty means all)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that reject a detail URL
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Section and field names used by the extractor
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Markers and schema used to pull a record out of rendered page text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default = "default_powers_and_abilities_heading")]
    pub powers_and_abilities_heading: String,

    #[serde(default = "default_powers_heading")]
    pub powers_heading: String,

    #[serde(default = "default_abilities_heading")]
    pub abilities_heading: String,

    /// Matches one bulleted bold power term, e.g. `* **Flight:**`
    #[serde(default = "default_power_pattern")]
    pub power_pattern: String,

    /// Literal where the info-box region starts
    #[serde(default = "default_gallery_start")]
    pub gallery_start: String,

    /// Heading title that ends the info-box region
    #[serde(default = "default_gallery_end_heading")]
    pub gallery_end_heading: String,

    /// Text rendered right before each field label
    #[serde(default = "default_field_label_prefix")]
    pub field_label_prefix: String,

    /// Marker that ends a field value
    #[serde(default = "default_field_terminator")]
    pub field_terminator: String,

    /// Field names, in column order
    #[serde(default = "default_gallery_fields")]
    pub gallery_fields: Vec<String>,
}

impl HarvestConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Full URL of the listing root page
    pub fn listing_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.listing_path.trim_start_matches('/')
        )
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            listing_path: default_listing_path(),
            shard_marker: default_shard_marker(),
            next_marker: default_next_marker(),
            link_segment: default_link_segment(),
            cache_dir: default_cache_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            include_patterns: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            powers_and_abilities_heading: default_powers_and_abilities_heading(),
            powers_heading: default_powers_heading(),
            abilities_heading: default_abilities_heading(),
            power_pattern: default_power_pattern(),
            gallery_start: default_gallery_start(),
            gallery_end_heading: default_gallery_end_heading(),
            field_label_prefix: default_field_label_prefix(),
            field_terminator: default_field_terminator(),
            gallery_fields: default_gallery_fields(),
        }
    }
}

fn default_base_url() -> String {
    "https://marvel.fandom.com/".to_string()
}

fn default_listing_path() -> String {
    "wiki/Category:Characters".to_string()
}

fn default_shard_marker() -> String {
    "Category:Characters?from=".to_string()
}

fn default_next_marker() -> String {
    "[Next]".to_string()
}

fn default_link_segment() -> String {
    "wiki/".to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(60)
}

fn default_user_agent() -> String {
    concat!("wiki-harvest/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Namespaced wiki pages are never character pages
fn default_exclude_patterns() -> Vec<String> {
    vec![r"/wiki/(Category|Special|File|Template|Help|User|Talk|Forum|Message_Wall):".to_string()]
}

fn default_powers_and_abilities_heading() -> String {
    "Powers and Abilities".to_string()
}

fn default_powers_heading() -> String {
    "Powers".to_string()
}

fn default_abilities_heading() -> String {
    "Abilities".to_string()
}

fn default_power_pattern() -> String {
    r"\* \*\*.+:\*\*".to_string()
}

fn default_gallery_start() -> String {
    "Gallery".to_string()
}

fn default_gallery_end_heading() -> String {
    "History".to_string()
}

fn default_field_label_prefix() -> String {
    ") ".to_string()
}

fn default_field_terminator() -> String {
    "###".to_string()
}

fn default_gallery_fields() -> Vec<String> {
    GALLERY_FIELDS.iter().map(|f| f.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = HarvestConfig::from_json("{}").unwrap();
        assert_eq!(config.base_url, "https://marvel.fandom.com/");
        assert_eq!(config.extractor.gallery_fields.len(), 15);
        assert_eq!(config.extractor.gallery_fields[1], "Current Alias");
        assert_eq!(config.request_timeout_secs, Some(60));
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "base_url": "https://example.org",
            "cache_dir": "/tmp/pages",
            "extractor": { "gallery_start": "Infobox" }
        }"#;
        let config = HarvestConfig::from_json(json).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/pages"));
        assert_eq!(config.extractor.gallery_start, "Infobox");
        assert_eq!(config.extractor.powers_heading, "Powers");
        assert_eq!(
            config.listing_url(),
            "https://example.org/wiki/Category:Characters"
        );
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = HarvestConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvest.json");
        std::fs::write(&path, r#"{ "next_marker": "[Next page]" }"#).unwrap();

        let config = HarvestConfig::from_file(&path).unwrap();
        assert_eq!(config.next_marker, "[Next page]");
    }
}
