use std::io;
use std::path::Path;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::cli::Cli;
use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use crate::scrape::SiteScraper;

/// List the niche names of a site
pub fn list_niches(site: &str, config: &Config) -> Result<()> {
    let scraper = SiteScraper::from_config(site, config)?;

    for niche in scraper.niches() {
        println!("{}", niche);
    }

    Ok(())
}

/// Print one gallery page as JSON lines
pub async fn gallery(site: &str, niche: &str, page: u32, config: &Config) -> Result<()> {
    let scraper = SiteScraper::from_config(site, config)?;
    let url = scraper.gallery_url(niche, page)?;
    info!("Scraping gallery page {}", url);

    for pair in scraper.scrape_gallery(&url).await? {
        println!("{}", serde_json::to_string(&pair?)?);
    }

    Ok(())
}

/// Print a single video record as JSON
pub async fn video(site: &str, url: &str, config: &Config) -> Result<()> {
    let scraper = SiteScraper::from_config(site, config)?;

    match scraper.scrape_video(url).await? {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        None => Err(Error::HttpError(format!("Could not fetch {}", url))),
    }
}

/// Walk `pages` gallery pages of a niche and print every video record
pub async fn crawl(site: &str, niche: &str, pages: u32, config: &Config) -> Result<()> {
    let scraper = SiteScraper::from_config(site, config)?;
    let mut scraped = 0usize;
    let mut skipped = 0usize;

    for page in 0..pages {
        let url = scraper.gallery_url(niche, page)?;
        info!("Scraping gallery page {} of {}: {}", page + 1, pages, url);

        for pair in scraper.scrape_gallery(&url).await? {
            let pair = match pair {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("Skipping gallery entry on {}: {}", url, e);
                    skipped += 1;
                    continue;
                }
            };

            match scraper.scrape_video(&pair.video_url).await {
                Ok(Some(record)) => {
                    println!("{}", serde_json::to_string(&record)?);
                    scraped += 1;
                }
                Ok(None) => skipped += 1,
                Err(e) => {
                    warn!("Skipping {}: {}", pair.video_url, e);
                    skipped += 1;
                }
            }
        }
    }

    info!("Crawl finished: {} records, {} skipped", scraped, skipped);
    Ok(())
}

/// Generate shell completions
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Initialize logging. Logs go to stderr, or to `log_file` when
/// `log_to_file` is set, in which case the returned guard must be held.
pub fn init_logging(logging: &LoggingConfig, debug: bool, verbose: bool) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new(&logging.level)
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(debug)
        .with_line_number(debug);

    let guard = if logging.log_to_file {
        let path = Path::new(&logging.log_file);
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Config(format!("Invalid log file: {}", logging.log_file)))?;

        std::fs::create_dir_all(dir)?;
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

        let result = if logging.json_format {
            builder.json().with_writer(writer).try_init()
        } else {
            builder.with_ansi(false).with_writer(writer).try_init()
        };
        result.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

        Some(guard)
    } else {
        let result = if logging.json_format {
            builder.json().with_writer(io::stderr).try_init()
        } else {
            builder.with_writer(io::stderr).try_init()
        };
        result.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

        None
    };

    debug!("Logging initialized");
    Ok(guard)
}
