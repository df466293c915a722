use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wiki_harvest::{ConfigError, HarvestConfig};

#[derive(Parser, Debug)]
#[command(name = "wiki-harvest")]
#[command(about = "Crawls a character wiki and extracts powers and biographical fields")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding cached page text
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Site root to crawl
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover every character page and print its URL
    Discover {
        /// Write the URLs to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch pages and store their text in the cache
    Warm {
        /// File with one URL per line (discovered from the listing if omitted)
        #[arg(short, long)]
        urls: Option<PathBuf>,
    },

    /// Build the character table as JSON
    Extract {
        /// File with one URL per line (discovered from the listing if omitted)
        #[arg(short, long)]
        urls: Option<PathBuf>,

        /// Write the table to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Load the config file (or defaults) and apply command-line overrides
pub fn load_config(args: &Args) -> Result<HarvestConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => HarvestConfig::from_file(path)?,
        None => HarvestConfig::default(),
    };

    if let Some(dir) = &args.cache_dir {
        config.cache_dir = dir.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(secs) = args.timeout {
        config.request_timeout_secs = (secs > 0).then_some(secs);
    }

    Ok(config)
}

/// Read a URL list, one per line; blank lines and `#` comments are skipped
pub fn read_url_list(path: &Path) -> std::io::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
