use super::{join_url, Site, SiteStrategy};
use crate::config::SiteTables;
use crate::error::Result;
use crate::scrape::text::TextCleaner;
use crate::scrape::{Document, VideoRecord};

const REQUIRED_FIELDS: [&str; 3] = ["name", "stars", "tags"];

/// Listing path of the newest videos, relative to the base URL.
const LIST_PATH: &str = "digital/videoa/-/list/=/sort=date/page=";

/// Gallery thumbnails are not derived for this site.
pub const PLACEHOLDER_IMAGE: &str =
    "https://placeholdit.imgix.net/~text?txtsize=33&txt=350%C3%97150&w=350&h=150";

pub struct DmmStrategy {
    tables: SiteTables,
    cleaner: TextCleaner,
}

impl DmmStrategy {
    pub fn new(tables: SiteTables) -> Result<Self> {
        tables.require_meta_fields(&REQUIRED_FIELDS)?;

        Ok(Self {
            tables,
            cleaner: TextCleaner::new()?,
        })
    }

    fn cleaned_list(&self, document: &Document, field: &str) -> Result<Vec<String>> {
        let selector = self.tables.meta.require(field)?;
        Ok(self.cleaner.clean_all(document.select_values(selector)))
    }
}

impl SiteStrategy for DmmStrategy {
    fn site(&self) -> Site {
        Site::Dmm
    }

    fn tables(&self) -> &SiteTables {
        &self.tables
    }

    /// The listing is not split by niche; pages are numbered from 1.
    fn format_gallery_url(&self, _niche: &str, page: u32) -> Result<String> {
        Ok(join_url(&self.tables.base_url, &format!("{}{}", LIST_PATH, page + 1)))
    }

    fn munge_video_url(&self, raw: &str) -> String {
        join_url(&self.tables.base_url, raw)
    }

    fn munge_image_url(&self, _raw: &str) -> Result<String> {
        Ok(PLACEHOLDER_IMAGE.to_string())
    }

    fn extract_video_fields(&self, document: &Document, mut record: VideoRecord) -> Result<VideoRecord> {
        let name = document.require_value("name", self.tables.meta.require("name")?)?;

        record.stars = self.cleaned_list(document, "stars")?;
        record.tags = self.cleaned_list(document, "tags")?;
        record.set_name(self.cleaner.clean(&name));

        if let Some(selector) = self.tables.meta.get("likes") {
            let likes = document.require_value("likes", selector)?;
            record.likes = Some(self.cleaner.clean_number("likes", &likes)?);
        }

        if let Some(selector) = self.tables.meta.get("description") {
            let description = document.require_value("description", selector)?;
            record.description = Some(self.cleaner.clean(&description));
        }

        Ok(record)
    }
}
