use crate::crawlers::crawler::PageSource;
use crate::error::FetchError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Page source serving markup held in memory
///
/// Every request is recorded, which makes it possible to check exactly
/// which pages a crawl touched.
#[derive(Debug, Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page and return the source
    pub fn with_page(mut self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.insert(url, markup);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, markup: impl Into<String>) {
        self.pages.insert(url.into(), markup.into());
    }

    /// URLs requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PageSource for MemorySource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(url.to_string()),
            Err(poisoned) => poisoned.into_inner().push(url.to_string()),
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}
