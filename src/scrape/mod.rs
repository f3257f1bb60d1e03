pub mod document;
pub mod fetcher;
pub mod site_scraper;
pub mod text;

pub use document::{Document, FieldSelector};
pub use fetcher::DocumentFetcher;
pub use site_scraper::{GalleryPairs, SiteScraper};
pub use text::{parse_duration_minutes, TextCleaner};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One entry of a gallery page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryPair {
    pub video_url: String,
    pub image_url: String,
}

/// Metadata scraped from a single video page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub url: String,
    /// Seconds since the Unix epoch.
    pub scrape_date: f64,
    pub img: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stars: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<f64>,
    /// Length in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VideoRecord {
    /// Base record stamped with the current time; site fields start empty.
    pub fn new(url: &str) -> Self {
        let scrape_date = Utc::now().timestamp_micros() as f64 / 1_000_000.0;

        Self {
            url: url.to_string(),
            scrape_date,
            img: None,
            name: String::new(),
            stars: Vec::new(),
            tags: Vec::new(),
            views: None,
            likes: None,
            dur: None,
            description: None,
        }
    }

    /// Set the name and append its words to the tags.
    pub fn set_name(&mut self, name: String) {
        self.tags.extend(name.split_whitespace().map(String::from));
        self.name = name;
    }
}
