use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use crate::error::{ConfigError, Result};
use crate::scrape::document::FieldSelector;

pub const NICHES_FILE: &str = "niches.csv";
pub const META_FILE: &str = "vid_data.csv";
pub const GALLERY_FILE: &str = "gal_data.csv";

pub const BASE_URL_KEY: &str = "base_url";
pub const VIDEO_SELECTOR_KEY: &str = "vid_xpath";
pub const IMAGE_SELECTOR_KEY: &str = "img_xpath";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding one sub-directory of tables per site.
    #[serde(default = "default_sites_dir")]
    pub sites_dir: PathBuf,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub log_to_file: bool,

    #[serde(default = "default_log_file")]
    pub log_file: String,

    #[serde(default)]
    pub json_format: bool,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::Config(format!("Config file not found: {}", path.as_ref().display())))?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file, or the default one when it exists,
    /// falling back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::config_dir() {
            Ok(dir) if dir.join("config.toml").exists() => Self::load(dir.join("config.toml")),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.settings.user_agent.trim().is_empty() {
            return Err(ConfigError::Config("User agent cannot be empty".to_string()));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::Config(format!("Unknown log level: {}", other)));
            }
        }

        Ok(())
    }

    pub fn default() -> Self {
        Self {
            settings: Settings::default(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("tube-scrape"))
            .ok_or_else(|| ConfigError::Config("Could not determine config directory".to_string()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sites_dir: default_sites_dir(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_to_file: false,
            log_file: default_log_file(),
            json_format: false,
        }
    }
}

fn default_sites_dir() -> PathBuf { PathBuf::from("sites") }
fn default_user_agent() -> String {
    format!("tube-scrape/{}", env!("CARGO_PKG_VERSION"))
}
fn default_log_level() -> String { "warn".to_string() }
fn default_log_file() -> String { "logs/tube-scrape.log".to_string() }

/// Compiled field-name to selector mapping.
#[derive(Debug, Clone, Default)]
pub struct SelectorTable {
    selectors: HashMap<String, FieldSelector>,
}

impl SelectorTable {
    pub fn from_raw(raw: HashMap<String, String>) -> Result<Self> {
        let mut selectors = HashMap::with_capacity(raw.len());
        for (field, expression) in raw {
            let selector = FieldSelector::parse(&expression)
                .map_err(|e| ConfigError::Config(format!("Selector for '{}': {}", field, e)))?;
            selectors.insert(field, selector);
        }
        Ok(Self { selectors })
    }

    pub fn get(&self, field: &str) -> Option<&FieldSelector> {
        self.selectors.get(field)
    }

    pub fn require(&self, field: &str) -> Result<&FieldSelector> {
        self.get(field)
            .ok_or_else(|| ConfigError::Config(format!("Missing selector for field '{}'", field)))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.selectors.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// The three per-site tables: niches, video metadata selectors, gallery selectors.
#[derive(Debug, Clone)]
pub struct SiteTables {
    pub niches: HashMap<String, String>,
    pub meta: SelectorTable,
    pub gallery: SelectorTable,
    pub base_url: String,
}

impl SiteTables {
    /// Load the tables from `dir`, which is normally `<sites_dir>/<site>`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let niches = read_table(&dir.join(NICHES_FILE), b',')?;
        let meta = SelectorTable::from_raw(read_table(&dir.join(META_FILE), b'|')?)?;
        let gallery = SelectorTable::from_raw(read_table(&dir.join(GALLERY_FILE), b'|')?)?;

        Self::from_parts(niches, meta, gallery)
    }

    pub fn from_parts(
        niches: HashMap<String, String>,
        meta: SelectorTable,
        gallery: SelectorTable,
    ) -> Result<Self> {
        let base_url = niches
            .get(BASE_URL_KEY)
            .cloned()
            .ok_or_else(|| ConfigError::Config(format!("Niche table has no '{}' row", BASE_URL_KEY)))?;

        url::Url::parse(&base_url)
            .map_err(|e| ConfigError::Config(format!("Invalid base_url '{}': {}", base_url, e)))?;

        for key in [VIDEO_SELECTOR_KEY, IMAGE_SELECTOR_KEY] {
            gallery.require(key)?;
        }

        Ok(Self { niches, meta, gallery, base_url })
    }

    pub fn niche(&self, name: &str) -> Option<&str> {
        self.niches.get(name).map(String::as_str)
    }

    /// Niche names in sorted order, without the `base_url` row.
    pub fn niche_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .niches
            .keys()
            .map(String::as_str)
            .filter(|name| *name != BASE_URL_KEY)
            .collect();
        names.sort_unstable();
        names
    }

    /// Fail unless every listed metadata field has a selector.
    pub fn require_meta_fields(&self, fields: &[&str]) -> Result<()> {
        for field in fields {
            self.meta.require(field)?;
        }
        Ok(())
    }
}

fn read_table(path: &Path, delimiter: u8) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Config(format!("Cannot read {}: {}", path.display(), e)))?;

    parse_table(&content, delimiter)
        .map_err(|e| ConfigError::Config(format!("{}: {}", path.display(), e)))
}

/// Parse two-column delimited rows into a map. A later row overrides an
/// earlier one with the same key.
pub fn parse_table(content: &str, delimiter: u8) -> std::result::Result<HashMap<String, String>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut table = HashMap::new();

    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        let line = record.position().map_or(0, |pos| pos.line());

        if record.len() != 2 {
            return Err(format!("line {}: expected 2 columns, found {}", line, record.len()));
        }
        if record[0].is_empty() {
            return Err(format!("line {}: empty key", line));
        }

        table.insert(record[0].to_string(), record[1].to_string());
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_tables(dir: &Path, niches: &str, meta: &str, gallery: &str) {
        fs::write(dir.join(NICHES_FILE), niches).unwrap();
        fs::write(dir.join(META_FILE), meta).unwrap();
        fs::write(dir.join(GALLERY_FILE), gallery).unwrap();
    }

    #[test]
    fn test_parse_table_with_delimiters() {
        let niches = parse_table("base_url,https://example.com\nNew,\nAmateur,/c/Amateur-65\n", b',').unwrap();
        assert_eq!(niches.len(), 3);
        assert_eq!(niches["Amateur"], "/c/Amateur-65");
        assert_eq!(niches["New"], "");

        let selectors = parse_table("name|h2.title\r\n\r\ntags|ul.tags li, a.tag\n", b'|').unwrap();
        assert_eq!(selectors["name"], "h2.title");
        assert_eq!(selectors["tags"], "ul.tags li, a.tag");
    }

    #[test]
    fn test_parse_table_rejects_single_column_rows() {
        let err = parse_table("base_url,https://example.com\nbroken row\n", b',').unwrap_err();
        assert!(err.contains("line 2"));
    }

    #[test]
    fn test_parse_table_rejects_extra_columns() {
        let err = parse_table("name|h1|extra\n", b'|').unwrap_err();
        assert!(err.contains("line 1"));
        assert!(err.contains("found 3"));
    }

    #[test]
    fn test_parse_table_quoted_fields() {
        let table = parse_table("\"name\"|\"h1 @title\"\n", b'|').unwrap();
        assert_eq!(table["name"], "h1 @title");

        let niches = parse_table("base_url,https://x.com\n\"Big, Beautiful\",/c/BBW-51\n", b',').unwrap();
        assert_eq!(niches.len(), 2);
        assert_eq!(niches["Big, Beautiful"], "/c/BBW-51");

        let selectors = parse_table("tags|\"a.tag|b.tag\"\n", b'|').unwrap();
        assert_eq!(selectors["tags"], "a.tag|b.tag");
    }

    #[test]
    fn test_site_tables_reject_malformed_rows() {
        let temp_dir = TempDir::new().unwrap();
        write_tables(
            temp_dir.path(),
            "base_url,https://example.com\n",
            "name|h1|extra\n",
            "vid_xpath|a @href\nimg_xpath|img @src\n",
        );

        let err = SiteTables::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Config(ref msg) if msg.contains(META_FILE)));
    }

    #[test]
    fn test_site_tables_load() {
        let temp_dir = TempDir::new().unwrap();
        write_tables(
            temp_dir.path(),
            "base_url,https://example.com\nBest,/best\nNew,\n",
            "name|h1.title\nstars|a.star\n",
            "vid_xpath|div.thumb a @href\nimg_xpath|div.thumb img @src\n",
        );

        let tables = SiteTables::load(temp_dir.path()).unwrap();
        assert_eq!(tables.base_url, "https://example.com");
        assert_eq!(tables.niche("Best"), Some("/best"));
        assert_eq!(tables.niche_names(), vec!["Best", "New"]);
        assert_eq!(tables.meta.len(), 2);
        assert!(tables.gallery.contains(VIDEO_SELECTOR_KEY));
        assert!(tables.require_meta_fields(&["name", "stars"]).is_ok());
        assert!(tables.require_meta_fields(&["views"]).is_err());
    }

    #[test]
    fn test_site_tables_require_base_url() {
        let temp_dir = TempDir::new().unwrap();
        write_tables(
            temp_dir.path(),
            "Best,/best\n",
            "name|h1\n",
            "vid_xpath|a @href\nimg_xpath|img @src\n",
        );

        let err = SiteTables::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Config(ref msg) if msg.contains("base_url")));
    }

    #[test]
    fn test_site_tables_require_gallery_selectors() {
        let temp_dir = TempDir::new().unwrap();
        write_tables(
            temp_dir.path(),
            "base_url,https://example.com\n",
            "name|h1\n",
            "vid_xpath|a @href\n",
        );

        let err = SiteTables::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Config(ref msg) if msg.contains(IMAGE_SELECTOR_KEY)));
    }

    #[test]
    fn test_site_tables_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = SiteTables::load(temp_dir.path().join("nowhere"));
        assert!(matches!(result, Err(ConfigError::Config(_))));
    }

    #[test]
    fn test_site_tables_reject_bad_selector() {
        let temp_dir = TempDir::new().unwrap();
        write_tables(
            temp_dir.path(),
            "base_url,https://example.com\n",
            "name|h1[[[\n",
            "vid_xpath|a @href\nimg_xpath|img @src\n",
        );

        let err = SiteTables::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Config(ref msg) if msg.contains("'name'")));
    }

    #[test]
    fn test_config_defaults_and_toml() {
        let config = Config::default();
        assert_eq!(config.settings.sites_dir, PathBuf::from("sites"));
        assert!(config.settings.user_agent.starts_with("tube-scrape/"));
        assert!(config.validate().is_ok());

        let parsed: Config = toml::from_str(
            r#"
            [settings]
            sites_dir = "/srv/sites"

            [logging]
            level = "debug"
            json_format = true
            "#,
        )
        .unwrap();
        assert_eq!(parsed.settings.sites_dir, PathBuf::from("/srv/sites"));
        assert_eq!(parsed.logging.level, "debug");
        assert!(parsed.logging.json_format);
        assert!(!parsed.logging.log_to_file);
    }

    #[test]
    fn test_config_load_validates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Config(_))));
        assert!(Config::load(temp_dir.path().join("missing.toml")).is_err());
        assert!(Config::load_or_default(Some(&path)).is_err());
    }
}
