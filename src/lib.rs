pub mod cache;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod extract;
pub mod filter;
pub mod parsers;
pub mod pipeline;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use cache::{PageCache, Resolution, WarmReport};
pub use config::{ExtractorConfig, HarvestConfig};
pub use crawlers::{HttpSource, ListingCrawler, MemorySource, PageSource};
pub use error::{ConfigError, FetchError, HarvestError};
pub use extract::Extractor;
pub use results::{CharacterRecord, CharacterTable, GalleryRecord};

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Main entry point: discovers character pages, warms the cache, and builds the table
pub struct Harvest<S: PageSource = HttpSource> {
    config: HarvestConfig,
    source: S,
    extractor: Extractor,
}

impl Harvest<HttpSource> {
    /// Create a harvest that fetches pages over HTTP
    ///
    /// `WIKI_HARVEST_CACHE_DIR`, when set, overrides the configured cache directory.
    pub fn new(mut config: HarvestConfig) -> Result<Self, HarvestError> {
        if let Ok(cache_dir) = std::env::var("WIKI_HARVEST_CACHE_DIR") {
            if !cache_dir.is_empty() {
                config.cache_dir = PathBuf::from(cache_dir);
            }
        }

        let source = HttpSource::new(&config)?;
        Self::with_source(config, source)
    }
}

impl<S: PageSource> Harvest<S> {
    /// Create a harvest reading pages from `source`
    pub fn with_source(config: HarvestConfig, source: S) -> Result<Self, HarvestError> {
        let extractor = Extractor::new(config.extractor.clone())?;
        Ok(Self {
            config,
            source,
            extractor,
        })
    }

    /// Override the cache directory
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.cache_dir = dir.into();
        self
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Page cache over this harvest's source and cache directory
    pub fn cache(&self) -> PageCache<'_, S> {
        PageCache::new(
            &self.source,
            self.config.cache_dir.clone(),
            self.config.link_segment.clone(),
        )
    }

    /// Discover every character detail URL from the listing
    pub async fn discover(&self) -> Result<BTreeSet<String>, HarvestError> {
        let crawler = ListingCrawler::new(&self.source, &self.config)?;
        crawler.discover_character_urls().await
    }

    /// Fetch and store the text of every URL
    pub async fn warm(&self, urls: &[String]) -> Result<WarmReport, HarvestError> {
        self.cache().save_all(urls).await
    }

    /// Build the character table for `urls`
    pub async fn build_table(&self, urls: &[String]) -> CharacterTable {
        pipeline::build_table(&self.cache(), &self.extractor, urls).await
    }
}
