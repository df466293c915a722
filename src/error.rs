use thiserror::Error;

/// Failure to obtain the markup for a single URL
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The page is not known to the source
    #[error("no page available for {url}")]
    NotFound { url: String },
}

impl FetchError {
    /// URL that failed to fetch
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::NotFound { url } => url,
        }
    }
}

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid base URL `{url}`: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors that abort a harvest operation as a whole
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The listing root could not be fetched, so nothing can be discovered
    #[error("failed to fetch listing root: {0}")]
    ListingRoot(#[source] FetchError),

    #[error("cache write failed for {path}: {source}")]
    CacheWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
