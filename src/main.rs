use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use wiki_harvest::{Harvest, HttpSource};

mod args;
use args::{Args, Command, load_config, read_url_list};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args)?;
    ::log::info!("Harvesting from {}", config.listing_url());

    let harvest = Harvest::new(config)?;
    let start_time = std::time::Instant::now();

    // Dispatch to the chosen subcommand
    match &args.command {
        Command::Discover { output } => {
            let urls = harvest.discover().await?;
            let mut out = open_output(output.as_deref())?;
            for url in &urls {
                writeln!(out, "{url}")?;
            }
            out.flush()?;
        }
        Command::Warm { urls } => {
            let urls = url_list(&harvest, urls.as_deref()).await?;
            let report = harvest.warm(&urls).await?;
            println!(
                "Cached {} pages in {}, {} failed",
                report.saved,
                harvest.config().cache_dir.display(),
                report.failed.len()
            );
        }
        Command::Extract { urls, output } => {
            let urls = url_list(&harvest, urls.as_deref()).await?;
            let table = harvest.build_table(&urls).await;
            let mut out = open_output(output.as_deref())?;
            serde_json::to_writer_pretty(&mut out, &table)?;
            writeln!(out)?;
            out.flush()?;

            // Report skipped pages after the table is written
            for url in &table.skipped {
                ::log::warn!("Skipped: {}", url);
            }
        }
    }

    ::log::info!(
        "Done in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// URLs from a list file, or discovered from the listing
async fn url_list(
    harvest: &Harvest<HttpSource>,
    path: Option<&std::path::Path>,
) -> Result<Vec<String>, Box<dyn Error>> {
    match path {
        Some(path) => Ok(read_url_list(path)?),
        None => Ok(harvest.discover().await?.into_iter().collect()),
    }
}

fn open_output(path: Option<&std::path::Path>) -> std::io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}
