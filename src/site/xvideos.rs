use super::{join_url, Site, SiteStrategy};
use crate::config::SiteTables;
use crate::error::{Error, Result};
use crate::scrape::text::{parse_duration_minutes, TextCleaner};
use crate::scrape::{Document, VideoRecord};
use regex::Regex;

const REQUIRED_FIELDS: [&str; 6] = ["name", "stars", "tags", "views", "likes", "dur"];

pub struct XvideosStrategy {
    tables: SiteTables,
    cleaner: TextCleaner,
    patterns: ThumbnailPatterns,
}

struct ThumbnailPatterns {
    // thumbnails are only exposed inside the script text of the gallery entry
    thumb_url: Regex,
    frame_file: Regex,
}

impl ThumbnailPatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            thumb_url: Regex::new(r#"https?://img[^"'\s]*?\.jpg"#)
                .map_err(|e| Error::Extraction(e.to_string()))?,
            frame_file: Regex::new(r"/[0-9a-f]*\.[0-9]*\.jpg")
                .map_err(|e| Error::Extraction(e.to_string()))?,
        })
    }
}

impl XvideosStrategy {
    pub fn new(tables: SiteTables) -> Result<Self> {
        tables.require_meta_fields(&REQUIRED_FIELDS)?;

        Ok(Self {
            tables,
            cleaner: TextCleaner::new()?,
            patterns: ThumbnailPatterns::new()?,
        })
    }

    fn required(&self, document: &Document, field: &str) -> Result<String> {
        document.require_value(field, self.tables.meta.require(field)?)
    }

    fn cleaned_list(&self, document: &Document, field: &str) -> Result<Vec<String>> {
        let selector = self.tables.meta.require(field)?;
        Ok(self.cleaner.clean_all(document.select_values(selector)))
    }
}

impl SiteStrategy for XvideosStrategy {
    fn site(&self) -> Site {
        Site::Xvideos
    }

    fn tables(&self) -> &SiteTables {
        &self.tables
    }

    fn format_gallery_url(&self, niche: &str, page: u32) -> Result<String> {
        let base_url = &self.tables.base_url;
        let fragment = self
            .tables
            .niche(niche)
            .ok_or_else(|| Error::UnknownNiche(format!("{} (site {})", niche, self.site())))?;

        if niche.contains("New") {
            if page == 0 {
                Ok(base_url.clone())
            } else {
                Ok(format!("{}/new/{}", base_url, page))
            }
        } else if niche.contains("Best") {
            Ok(format!("{}{}/{}", base_url, fragment, page))
        } else {
            Ok(format!("{}{}", base_url, fragment.replace("/c/", &format!("/c/{}/", page))))
        }
    }

    fn munge_video_url(&self, raw: &str) -> String {
        join_url(&self.tables.base_url, raw)
    }

    fn munge_image_url(&self, raw: &str) -> Result<String> {
        let url = self
            .patterns
            .thumb_url
            .find(raw)
            .ok_or_else(|| Error::Extraction(format!("No thumbnail URL in {:?}", raw)))?;

        Ok(self
            .patterns
            .frame_file
            .replace_all(url.as_str(), "/mozaiquehome.jpg")
            .into_owned())
    }

    fn extract_video_fields(&self, document: &Document, mut record: VideoRecord) -> Result<VideoRecord> {
        let name = self.cleaner.clean(&self.required(document, "name")?);

        record.stars = self.cleaned_list(document, "stars")?;
        record.tags = self.cleaned_list(document, "tags")?;
        record.set_name(name);

        record.views = Some(self.cleaner.clean_number("views", &self.required(document, "views")?)?);
        record.likes = Some(self.cleaner.clean_number("likes", &self.required(document, "likes")?)?);
        record.dur = Some(parse_duration_minutes(&self.required(document, "dur")?)?);

        Ok(record)
    }
}
