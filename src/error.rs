use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type ConfigError = Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported site: {0}")]
    UnsupportedSite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown niche: {0}")]
    UnknownNiche(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    /// Errors raised while retrieving a page, as opposed to reading it.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Error::HttpError(_) | Error::InvalidUrl(_))
    }

    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedSite(_) | Error::UnknownNiche(_) | Error::Config(_) | Error::InvalidUrl(_)
        )
    }

    /// Process exit status: 2 for bad input or configuration, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_user_error() {
            2
        } else {
            1
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Error::UnsupportedSite(_) => "UNSUPPORTED_SITE",
            Error::Config(_) => "CONFIG",
            Error::HttpError(_) => "HTTP_ERROR",
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::UnknownNiche(_) => "UNKNOWN_NICHE",
            Error::Extraction(_) => "EXTRACTION",
            Error::Io(_) => "IO_ERROR",
            Error::Serialization(_) => "SERIALIZATION",
        }
    }
}
