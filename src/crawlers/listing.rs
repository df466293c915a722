use crate::config::HarvestConfig;
use crate::crawlers::crawler::PageSource;
use crate::error::{ConfigError, HarvestError};
use crate::filter::UrlFilter;
use regex::Regex;
use std::collections::{BTreeSet, HashSet, VecDeque};
use url::Url;

/// Discovers character detail URLs from a paginated category listing
///
/// Links are recovered from rendered text rather than markup: the listing
/// root yields one URL per alphabetical shard, and every shard is walked page
/// by page through its "next" link.
pub struct ListingCrawler<'a, S: PageSource> {
    source: &'a S,
    config: &'a HarvestConfig,
    base: Url,
    filter: UrlFilter,
    host_re: Regex,
    link_re: Regex,
}

impl<'a, S: PageSource> ListingCrawler<'a, S> {
    pub fn new(source: &'a S, config: &'a HarvestConfig) -> Result<Self, ConfigError> {
        let base = Url::parse(&config.base_url).map_err(|source| ConfigError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let filter = UrlFilter::for_site(config, &base)?;

        let host = base.host_str().unwrap_or_default();
        let host_pattern = format!(r"(?:https?://)?{}[^\s)\]]*", regex::escape(host));
        let link_pattern = format!(r#"{}([^"\n]*)""#, regex::escape(&config.link_segment));

        let host_re = compile(&host_pattern)?;
        let link_re = compile(&link_pattern)?;

        Ok(Self {
            source,
            config,
            base,
            filter,
            host_re,
            link_re,
        })
    }

    /// Discover every detail URL reachable from the listing root
    pub async fn discover_character_urls(&self) -> Result<BTreeSet<String>, HarvestError> {
        let root = self.config.listing_url();
        ::log::info!("Fetching listing root: {}", root);

        let text = self
            .source
            .fetch_text(&root, false)
            .await
            .map_err(HarvestError::ListingRoot)?;

        let shards = self.shard_urls(&text);
        ::log::info!("Found {} listing shards", shards.len());

        // Shared across shards so overlapping chains are walked once
        let mut visited = HashSet::new();
        let mut found = BTreeSet::new();
        for (i, shard) in shards.iter().enumerate() {
            let before = found.len();
            let pages = self.crawl_chain(shard, &mut visited, &mut found).await;
            ::log::info!(
                "Shard {}/{} {}: {} pages, {} new detail links",
                i + 1,
                shards.len(),
                shard,
                pages,
                found.len() - before
            );
        }

        ::log::info!("Discovered {} character pages", found.len());
        Ok(found)
    }

    /// Collect detail URLs from one shard and every page after it
    pub async fn crawl_shard(&self, shard_url: &str) -> BTreeSet<String> {
        let mut visited = HashSet::new();
        let mut found = BTreeSet::new();
        self.crawl_chain(shard_url, &mut visited, &mut found).await;
        found
    }

    /// Walks a pagination chain, returning the number of pages fetched
    async fn crawl_chain(
        &self,
        start: &str,
        visited: &mut HashSet<String>,
        found: &mut BTreeSet<String>,
    ) -> usize {
        let mut queue = VecDeque::from([start.to_string()]);
        let mut pages = 0;

        while let Some(url) = queue.pop_front() {
            // Cycle guard
            if !visited.insert(url.clone()) {
                ::log::debug!("Skipping already visited listing page: {}", url);
                continue;
            }

            // Links are kept so detail and next URLs survive rendering
            let text = match self.source.fetch_text(&url, false).await {
                Ok(text) => text,
                Err(e) => {
                    ::log::warn!("Failed to fetch listing page {}: {}", url, e);
                    continue;
                }
            };
            pages += 1;

            let links = self.detail_urls(&text);
            ::log::debug!("Found {} detail links on {}", links.len(), url);
            found.extend(links);

            // No next link ends this shard
            if let Some(next) = self.next_page_url(&text, &url) {
                ::log::trace!("Following next page: {}", next);
                queue.push_back(next);
            }
        }

        pages
    }

    /// Shard URLs found in the rendered listing root, deduplicated in page order
    pub fn shard_urls(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.host_re
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|candidate| candidate.contains(&self.config.shard_marker))
            .filter_map(normalize_shard_url)
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    /// Detail URLs linked from one rendered listing page
    ///
    /// Only matches still followed by the quote of a link title are kept,
    /// which separates real links from incidental mentions of the path.
    pub fn detail_urls(&self, text: &str) -> Vec<String> {
        self.link_re
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| {
                let path = m.as_str().replace('\\', "");
                let path = path.trim();
                if path.is_empty() || path.contains(char::is_whitespace) {
                    return None;
                }
                let joined = self
                    .base
                    .join(&format!("{}{}", self.config.link_segment, path))
                    .ok()?;
                self.filter
                    .accepts(&joined)
                    .then(|| self.filter.normalize_url(&joined).to_string())
            })
            .collect()
    }

    /// URL of the next listing page, if the page has one
    ///
    /// The URL sits between the `(` right after the next marker and the
    /// following `)`. A marker missing either parenthesis ends the chain.
    pub fn next_page_url(&self, text: &str, current: &str) -> Option<String> {
        let marker = &self.config.next_marker;
        let idx = text.find(marker.as_str())?;
        let rest = text[idx + marker.len()..].trim_start();

        // The link target has to follow the marker directly
        let Some(rest) = rest.strip_prefix('(') else {
            ::log::warn!("Next marker on {} is not followed by a link", current);
            return None;
        };

        let Some(end) = rest.find(')') else {
            ::log::warn!("Next link on {} has no closing parenthesis", current);
            return None;
        };

        let raw = rest[..end].replace(['\n', '\r'], "");
        let raw = raw.split_whitespace().next()?;

        let current = Url::parse(current).unwrap_or_else(|_| self.base.clone());
        match current.join(raw) {
            Ok(next) => Some(next.to_string()),
            Err(e) => {
                ::log::warn!("Ignoring malformed next link `{}`: {}", raw, e);
                None
            }
        }
    }
}

/// Cuts a rendered shard link at its first whitespace and drops link syntax leftovers
pub fn normalize_shard_url(candidate: &str) -> Option<String> {
    let cut = candidate.split_whitespace().next()?;
    let cut = cut.trim_end_matches([')', ']', '"']);

    let absolute = if cut.starts_with("http://") || cut.starts_with("https://") {
        cut.to_string()
    } else {
        format!("https://{cut}")
    };

    Url::parse(&absolute).ok().map(|url| url.to_string())
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}
