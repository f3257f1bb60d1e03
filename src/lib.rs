pub mod cli;
pub mod config;
pub mod error;
pub mod scrape;
pub mod site;

pub use config::Config;
pub use error::{Error, Result};
pub use scrape::{GalleryPair, SiteScraper, VideoRecord};
pub use site::{Site, SiteStrategy};
