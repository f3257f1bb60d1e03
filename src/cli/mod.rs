pub mod commands;

use clap::{Parser, Subcommand};
use crate::config::Config;
use crate::error::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tube-scrape")]
#[command(about = "Scrape video metadata from gallery sites")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory with one table directory per site (overrides the config file)
    #[arg(long, global = true)]
    pub sites_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the niches configured for a site
    Niches {
        /// Site identifier, e.g. "xvideos"
        site: String,
    },

    /// Print the video and thumbnail URLs of one gallery page
    Gallery {
        /// Site identifier
        site: String,

        /// Niche name from the site's niche table
        niche: String,

        /// Page number, starting at 0
        #[arg(short, long, default_value_t = 0)]
        page: u32,
    },

    /// Scrape a single video page and print its record as JSON
    Video {
        /// Site identifier
        site: String,

        /// Video page URL
        url: String,
    },

    /// Scrape gallery pages of a niche and every video on them
    Crawl {
        /// Site identifier
        site: String,

        /// Niche name from the site's niche table
        niche: String,

        /// Number of gallery pages to walk
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Commands::Completions { shell } = self.command {
            commands::generate_completions(shell);
            return Ok(());
        }

        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(sites_dir) = self.sites_dir {
            config.settings.sites_dir = sites_dir;
        }

        // keeps the file writer alive until the command finishes
        let _log_guard = commands::init_logging(&config.logging, self.debug, self.verbose)?;

        match self.command {
            Commands::Niches { site } => {
                commands::list_niches(&site, &config)
            }
            Commands::Gallery { site, niche, page } => {
                commands::gallery(&site, &niche, page, &config).await
            }
            Commands::Video { site, url } => {
                commands::video(&site, &url, &config).await
            }
            Commands::Crawl { site, niche, pages } => {
                commands::crawl(&site, &niche, pages, &config).await
            }
            Commands::Completions { .. } => Ok(()),
        }
    }
}
