//! Site strategies and the registry that picks one from a site identifier.

pub mod dmm;
pub mod xvideos;

pub use dmm::DmmStrategy;
pub use xvideos::XvideosStrategy;

use crate::config::SiteTables;
use crate::error::{Error, Result};
use crate::scrape::{Document, VideoRecord};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Site-specific pieces of the scraping pipeline.
pub trait SiteStrategy {
    fn site(&self) -> Site;

    fn tables(&self) -> &SiteTables;

    /// URL of page `page` (0-based) of the gallery for `niche`.
    fn format_gallery_url(&self, niche: &str, page: u32) -> Result<String>;

    /// Turn a video reference taken from a gallery page into an absolute URL.
    fn munge_video_url(&self, raw: &str) -> String;

    /// Derive a thumbnail URL from the value of a gallery image element.
    fn munge_image_url(&self, raw: &str) -> Result<String>;

    /// Fill in the site fields of `record` from a fetched video page.
    fn extract_video_fields(&self, document: &Document, record: VideoRecord) -> Result<VideoRecord>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Xvideos,
    Dmm,
}

impl Site {
    /// Match order used by [`Site::from_identifier`].
    pub const ALL: [Site; 2] = [Site::Xvideos, Site::Dmm];

    pub fn name(&self) -> &'static str {
        match self {
            Site::Xvideos => "xvideos",
            Site::Dmm => "dmm",
        }
    }

    /// Resolve an identifier such as `"www.xvideos.com"` by looking for a
    /// known site name inside it. The first site in [`Site::ALL`] wins.
    pub fn from_identifier(identifier: &str) -> Result<Site> {
        Self::ALL
            .into_iter()
            .find(|site| identifier.contains(site.name()))
            .ok_or_else(|| Error::UnsupportedSite(identifier.to_string()))
    }

    /// Build the strategy, reading its tables from `<sites_dir>/<name>`.
    pub fn load(self, sites_dir: &Path) -> Result<Box<dyn SiteStrategy>> {
        let tables = SiteTables::load(sites_dir.join(self.name()))?;
        self.with_tables(tables)
    }

    pub fn with_tables(self, tables: SiteTables) -> Result<Box<dyn SiteStrategy>> {
        Ok(match self {
            Site::Xvideos => Box::new(XvideosStrategy::new(tables)?),
            Site::Dmm => Box::new(DmmStrategy::new(tables)?),
        })
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Site {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|site| site.name() == s)
            .ok_or_else(|| Error::UnsupportedSite(s.to_string()))
    }
}

/// Pick and build the strategy for `identifier`.
pub fn select(identifier: &str, sites_dir: &Path) -> Result<Box<dyn SiteStrategy>> {
    Site::from_identifier(identifier)?.load(sites_dir)
}

/// Join a site base URL and a path taken from a page. Absolute URLs are
/// returned unchanged.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
pub(crate) fn test_tables(niches: &str, meta: &str, gallery: &str) -> SiteTables {
    use crate::config::{parse_table, SelectorTable};

    SiteTables::from_parts(
        parse_table(niches, b',').unwrap(),
        SelectorTable::from_raw(parse_table(meta, b'|').unwrap()).unwrap(),
        SelectorTable::from_raw(parse_table(gallery, b'|').unwrap()).unwrap(),
    )
    .unwrap()
}
