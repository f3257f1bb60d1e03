use crate::error::{Error, Result};
use crate::scrape::document::Document;
use reqwest::{Client, Response};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: Client,
    user_agent: String,
}

impl DocumentFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .gzip(true)
            .build()
            .map_err(|e| Error::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: format!("tube-scrape/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// GET `url` and parse the body as HTML. Error statuses are failures.
    pub async fn fetch(&self, url: &str) -> Result<Document> {
        let body = self.fetch_text(url).await?;
        Ok(Document::parse(&body))
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching page: {}", url);

        validate_url(url)?;

        let response = self.fetch_response(url).await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::HttpError(format!(
                "HTTP {} for {}: {}",
                status.as_u16(),
                url,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::HttpError(format!("Failed to read response body from {}: {}", url, e)))?;

        debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }

    async fn fetch_response(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "text/html,application/xhtml+xml,*/*")
            .send()
            .await
            .map_err(|e| Error::HttpError(format!("Request to {} failed: {}", url, e)))
    }
}

fn validate_url(url: &str) -> Result<()> {
    let parsed = url::Url::parse(url)
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::InvalidUrl(format!("Unsupported scheme '{}' in {}", scheme, url))),
    }
}
