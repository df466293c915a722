use crate::config::HarvestConfig;
use crate::error::ConfigError;
use regex::Regex;
use url::Url;

/// Rules deciding which discovered links count as character pages
#[derive(Debug, Clone, Default)]
pub struct UrlFilterConfig {
    /// Host every accepted URL must have (if None, any host is accepted)
    pub required_host: Option<String>,

    /// Regex patterns for URLs to include (if empty, all URLs are included unless excluded)
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude (these take precedence over include patterns)
    pub exclude_patterns: Vec<String>,
}

/// URL filter that uses regex patterns and the site host to accept detail links
#[derive(Debug)]
pub struct UrlFilter {
    config: UrlFilterConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a new URL filter from configuration
    pub fn new(config: UrlFilterConfig) -> Result<Self, ConfigError> {
        let include_regexes = compile_all(&config.include_patterns)?;
        let exclude_regexes = compile_all(&config.exclude_patterns)?;

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Filter restricted to the host of `base` with the harvest's patterns
    pub fn for_site(config: &HarvestConfig, base: &Url) -> Result<Self, ConfigError> {
        Self::new(UrlFilterConfig {
            required_host: base.host_str().map(|h| h.to_string()),
            include_patterns: config.include_patterns.clone(),
            exclude_patterns: config.exclude_patterns.clone(),
        })
    }

    /// Determine if a URL is an acceptable detail page
    pub fn accepts(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        if let Some(required) = &self.config.required_host {
            if url.host_str() != Some(required.as_str()) {
                return false;
            }
        }

        let url_str = url.as_str();
        if self.exclude_regexes.iter().any(|re| re.is_match(url_str)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|re| re.is_match(url_str))
    }

    /// Create a normalized version of the URL (fragment removed)
    pub fn normalize_url(&self, url: &Url) -> Url {
        let mut normalized = url.clone();
        normalized.set_fragment(None);
        normalized
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ConfigError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_filter() -> UrlFilter {
        let config = HarvestConfig::default();
        let base = Url::parse(&config.base_url).unwrap();
        UrlFilter::for_site(&config, &base).unwrap()
    }

    #[test]
    fn test_host_restriction() {
        let filter = site_filter();

        let same_host = Url::parse("https://marvel.fandom.com/wiki/Jean_Grey").unwrap();
        assert!(filter.accepts(&same_host));

        let other_host = Url::parse("https://dc.fandom.com/wiki/Jean_Grey").unwrap();
        assert!(!filter.accepts(&other_host));

        let not_http = Url::parse("mailto:someone@marvel.fandom.com").unwrap();
        assert!(!filter.accepts(&not_http));
    }

    #[test]
    fn test_namespaced_pages_excluded() {
        let filter = site_filter();

        for page in ["Category:Characters", "File:Logo.png", "Template:Infobox", "Special:Random"] {
            let url = Url::parse(&format!("https://marvel.fandom.com/wiki/{page}")).unwrap();
            assert!(!filter.accepts(&url), "{page} should be rejected");
        }
    }

    #[test]
    fn test_regex_patterns() {
        let config = UrlFilterConfig {
            required_host: None,
            include_patterns: vec![r"\(Earth-616\)$".to_string()],
            exclude_patterns: vec![r"/wiki/Draft_".to_string()],
        };
        let filter = UrlFilter::new(config).unwrap();

        let included = Url::parse("https://example.com/wiki/Logan_(Earth-616)").unwrap();
        assert!(filter.accepts(&included));

        let not_included = Url::parse("https://example.com/wiki/Logan_(Earth-1610)").unwrap();
        assert!(!filter.accepts(&not_included));

        let excluded = Url::parse("https://example.com/wiki/Draft_Logan_(Earth-616)").unwrap();
        assert!(!filter.accepts(&excluded));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let config = UrlFilterConfig {
            exclude_patterns: vec!["(unclosed".to_string()],
            ..UrlFilterConfig::default()
        };
        let err = UrlFilter::new(config).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { .. }));
    }

    #[test]
    fn test_normalize_drops_fragment() {
        let filter = site_filter();
        let url = Url::parse("https://marvel.fandom.com/wiki/Jean_Grey#History").unwrap();
        assert_eq!(
            filter.normalize_url(&url).as_str(),
            "https://marvel.fandom.com/wiki/Jean_Grey"
        );
    }
}
