use crate::cache::{PageCache, Resolution};
use crate::crawlers::PageSource;
use crate::extract::Extractor;
use crate::results::CharacterTable;

/// Builds the character table for `urls`, in the given order
///
/// A URL whose text cannot be resolved is logged, listed in
/// [`CharacterTable::skipped`] and left out of the rows; the batch goes on.
pub async fn build_table<S: PageSource>(
    cache: &PageCache<'_, S>,
    extractor: &Extractor,
    urls: &[String],
) -> CharacterTable {
    let mut table = CharacterTable::new(extractor.field_names());
    let total = urls.len();
    let mut cache_hits = 0;

    for (i, url) in urls.iter().enumerate() {
        let text = match cache.resolve(url).await {
            Resolution::CacheHit(text) => {
                cache_hits += 1;
                text
            }
            Resolution::Fetched(text) => text,
            Resolution::FetchFailed(e) => {
                ::log::warn!("Skipping {}: {}", url, e);
                table.skipped.push(url.clone());
                continue;
            }
        };

        let record = extractor.extract(url, &text);
        ::log::debug!(
            "Extracted {}: {} powers",
            record.name,
            record.powers.len()
        );
        table.rows.push(record);

        ::log::info!("Processed {}/{}: {}", i + 1, total, url);
    }

    ::log::info!(
        "Built table with {} rows ({} from cache), {} skipped",
        table.rows.len(),
        cache_hits,
        table.skipped.len()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use crate::crawlers::MemorySource;

    fn page(power: &str) -> String {
        format!(
            "<html><body>\
             <h2>Powers and Abilities</h2><h3>Powers</h3>\
             <ul><li><b>{power}:</b> yes</li></ul>\
             <h2>History</h2><p>Story.</p>\
             </body></html>"
        )
    }

    #[tokio::test]
    async fn test_failed_url_is_skipped_not_fatal() {
        let urls: Vec<String> = (1..=5)
            .map(|i| format!("https://marvel.fandom.com/wiki/Hero_{i}"))
            .collect();

        let mut source = MemorySource::new();
        for (i, url) in urls.iter().enumerate() {
            if i != 2 {
                source.insert(url.clone(), page(&format!("Power {i}")));
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(&source, dir.path(), "wiki/");
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();

        let table = build_table(&cache, &extractor, &urls).await;

        assert_eq!(table.len(), 4);
        assert_eq!(table.skipped, vec![urls[2].clone()]);
        assert!(table.rows.iter().all(|r| r.url != urls[2]));
        assert_eq!(table.rows[0].name, "Hero 1");
        assert_eq!(table.rows[0].powers, vec!["power 0"]);
        assert_eq!(table.rows[3].url, urls[4]);
        assert_eq!(table.columns.len(), 18);
    }

    #[tokio::test]
    async fn test_cached_text_is_used_before_fetching() {
        let url = "https://marvel.fandom.com/wiki/Cached_Hero".to_string();
        let source = MemorySource::new();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Cached_Hero.txt"),
            "## Powers and Abilities\n### Powers\n* **Invisibility:**\n",
        )
        .unwrap();

        let cache = PageCache::new(&source, dir.path(), "wiki/");
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let table = build_table(&cache, &extractor, std::slice::from_ref(&url)).await;

        assert!(source.requests().is_empty());
        assert_eq!(table.rows[0].powers, vec!["invisibility"]);
        assert!(table.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_empty_url_list() {
        let source = MemorySource::new();
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(&source, dir.path(), "wiki/");
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();

        let table = build_table(&cache, &extractor, &[]).await;
        assert!(table.is_empty());
        assert_eq!(table.columns[..3], ["url", "name", "powers"]);
    }
}
