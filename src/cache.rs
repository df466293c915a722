use crate::crawlers::PageSource;
use crate::error::{FetchError, HarvestError};
use crate::utils::cache_key;
use std::path::PathBuf;

/// Outcome of resolving the text of one page
#[derive(Debug)]
pub enum Resolution {
    /// Text read from the on-disk cache
    CacheHit(String),
    /// Cache missed; text fetched live and not written back
    Fetched(String),
    /// Cache missed and the live fetch failed
    FetchFailed(FetchError),
}

impl Resolution {
    /// The resolved text, or the fetch error
    pub fn into_text(self) -> Result<String, FetchError> {
        match self {
            Resolution::CacheHit(text) | Resolution::Fetched(text) => Ok(text),
            Resolution::FetchFailed(e) => Err(e),
        }
    }
}

/// Summary of a bulk cache warm-up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarmReport {
    /// Pages written to disk
    pub saved: usize,
    /// URLs that could not be fetched or written
    pub failed: Vec<String>,
}

/// Rendered page text stored on disk, one file per URL
///
/// Detail pages are rendered with links stripped before they are stored or
/// returned.
pub struct PageCache<'a, S: PageSource> {
    source: &'a S,
    dir: PathBuf,
    segment: String,
}

impl<'a, S: PageSource> PageCache<'a, S> {
    /// Create a cache in `dir`; `segment` is the path segment cut from URLs to form keys
    pub fn new(source: &'a S, dir: impl Into<PathBuf>, segment: impl Into<String>) -> Self {
        Self {
            source,
            dir: dir.into(),
            segment: segment.into(),
        }
    }

    /// File holding the text of `url`
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir
            .join(format!("{}.txt", cache_key(url, &self.segment)))
    }

    /// Cached text of `url`, if readable
    pub async fn read(&self, url: &str) -> Option<String> {
        let path = self.path_for(url);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Some(text),
            Err(e) => {
                ::log::trace!("Cache miss for {} ({}): {}", url, path.display(), e);
                None
            }
        }
    }

    /// Resolve the text of `url`, falling back to a live fetch on a cache miss
    pub async fn resolve(&self, url: &str) -> Resolution {
        if let Some(text) = self.read(url).await {
            ::log::debug!("Cache hit: {}", url);
            return Resolution::CacheHit(text);
        }

        match self.source.fetch_text(url, true).await {
            Ok(text) => {
                ::log::debug!("Fetched live: {}", url);
                Resolution::Fetched(text)
            }
            Err(e) => Resolution::FetchFailed(e),
        }
    }

    /// Write the text of `url` to the cache
    pub async fn store(&self, url: &str, text: &str) -> Result<PathBuf, HarvestError> {
        let path = self.path_for(url);
        tokio::fs::write(&path, text)
            .await
            .map_err(|source| HarvestError::CacheWrite {
                path: path.display().to_string(),
                source,
            })?;
        Ok(path)
    }

    /// Fetch every URL live and persist its text
    ///
    /// A URL that fails to fetch or to write is logged and listed in
    /// [`WarmReport::failed`]. Only a cache directory that cannot be created
    /// aborts the run.
    pub async fn save_all(&self, urls: &[String]) -> Result<WarmReport, HarvestError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| HarvestError::CacheWrite {
                path: self.dir.display().to_string(),
                source,
            })?;

        let mut report = WarmReport::default();
        for (i, url) in urls.iter().enumerate() {
            let stored = match self.source.fetch_text(url, true).await {
                Ok(text) => self.store(url, &text).await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };

            match stored {
                Ok(_) => report.saved += 1,
                Err(e) => {
                    ::log::warn!("Skipping {}: {}", url, e);
                    report.failed.push(url.clone());
                }
            }

            if (i + 1) % 100 == 0 {
                ::log::info!("Cached {}/{} pages", i + 1, urls.len());
            }
        }

        ::log::info!(
            "Cache warm-up complete: {} saved, {} failed",
            report.saved,
            report.failed.len()
        );
        Ok(report)
    }
}
