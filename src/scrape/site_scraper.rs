use crate::config::{Config, IMAGE_SELECTOR_KEY, VIDEO_SELECTOR_KEY};
use crate::error::Result;
use crate::scrape::fetcher::DocumentFetcher;
use crate::scrape::{GalleryPair, VideoRecord};
use crate::site::{self, Site, SiteStrategy};
use std::iter::Zip;
use std::vec;
use tracing::{debug, error, info};

/// Runs one site strategy against live pages.
pub struct SiteScraper {
    strategy: Box<dyn SiteStrategy>,
    fetcher: DocumentFetcher,
}

/// Gallery entries of one fetched page, munged on demand in document order.
pub struct GalleryPairs<'a> {
    strategy: &'a dyn SiteStrategy,
    entries: Zip<vec::IntoIter<String>, vec::IntoIter<String>>,
}

impl<'a> Iterator for GalleryPairs<'a> {
    type Item = Result<GalleryPair>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(video, image)| {
            Ok(GalleryPair {
                video_url: self.strategy.munge_video_url(&video),
                image_url: self.strategy.munge_image_url(&image)?,
            })
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl SiteScraper {
    pub fn new(strategy: Box<dyn SiteStrategy>, fetcher: DocumentFetcher) -> Self {
        Self { strategy, fetcher }
    }

    /// Select the strategy for `identifier` using the configured sites
    /// directory and user agent.
    pub fn from_config(identifier: &str, config: &Config) -> Result<Self> {
        let strategy = site::select(identifier, &config.settings.sites_dir)?;
        let fetcher = DocumentFetcher::new()?.with_user_agent(config.settings.user_agent.clone());
        Ok(Self::new(strategy, fetcher))
    }

    pub fn site(&self) -> Site {
        self.strategy.site()
    }

    pub fn strategy(&self) -> &dyn SiteStrategy {
        self.strategy.as_ref()
    }

    pub fn niches(&self) -> Vec<&str> {
        self.strategy.tables().niche_names()
    }

    pub fn gallery_url(&self, niche: &str, page: u32) -> Result<String> {
        self.strategy.format_gallery_url(niche, page)
    }

    /// Fetch a gallery page and pair its video links with its thumbnails.
    /// Extra entries on either side are dropped.
    pub async fn scrape_gallery(&self, url: &str) -> Result<GalleryPairs<'_>> {
        let document = self.fetcher.fetch(url).await?;

        let gallery = &self.strategy.tables().gallery;
        let videos = document.select_values(gallery.require(VIDEO_SELECTOR_KEY)?);
        let images = document.select_values(gallery.require(IMAGE_SELECTOR_KEY)?);

        debug!(
            "Gallery {} has {} video and {} image entries",
            url,
            videos.len(),
            images.len()
        );

        Ok(GalleryPairs {
            strategy: self.strategy.as_ref(),
            entries: videos.into_iter().zip(images),
        })
    }

    /// Scrape one video page. A page that cannot be fetched is logged and
    /// yields `Ok(None)`; extraction failures are returned as errors.
    pub async fn scrape_video(&self, url: &str) -> Result<Option<VideoRecord>> {
        let document = match self.fetcher.fetch(url).await {
            Ok(document) => document,
            Err(e) => {
                error!(url = %url, error = %e, "Failed to fetch video page");
                return Ok(None);
            }
        };

        let record = self
            .strategy
            .extract_video_fields(&document, VideoRecord::new(url))?;

        info!("Scraped {} ({} tags)", url, record.tags.len());
        Ok(Some(record))
    }
}
