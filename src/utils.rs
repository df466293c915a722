/// Derive the on-disk cache key for a page URL
///
/// Everything up to and including `segment` (the site's `wiki/` path segment)
/// is dropped, then `/` and `*` are stripped. URLs without the segment fall
/// back to the URL minus its scheme.
pub fn cache_key(url: &str, segment: &str) -> String {
    let rest = match url.find(segment) {
        Some(idx) => &url[idx + segment.len()..],
        None => url
            .trim_start_matches("https://")
            .trim_start_matches("http://"),
    };

    let key = rest.replace(['/', '*'], "");
    if key.is_empty() {
        "index".to_string()
    } else {
        key
    }
}

/// Character name from the final path segment of its URL
pub fn name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .replace('_', " ")
}
