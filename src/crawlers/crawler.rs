use crate::error::FetchError;
use crate::parsers;
use std::future::Future;

/// Something that can hand out the raw markup of a page
pub trait PageSource: Sync {
    /// Fetch the markup of `url`
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// Fetch `url` and render it to plain text
    fn fetch_text(
        &self,
        url: &str,
        ignore_links: bool,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        async move {
            let markup = self.fetch(url).await?;
            Ok(parsers::render(&markup, ignore_links))
        }
    }
}
