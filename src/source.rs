use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::LoadError;
use crate::types::Catalog;

/// Where the catalog document comes from. One call per load.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
    async fn fetch(&self) -> Result<Catalog, LoadError>;
}

/// Fetches the document over HTTP(S).
pub struct HttpSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: Url, user_agent: &str, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(t) = timeout { builder = builder.timeout(t); }
        let client = builder.build().map_err(|source| LoadError::Transport { url: url.to_string(), source })?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url { &self.url }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String { self.url.to_string() }

    async fn fetch(&self) -> Result<Catalog, LoadError> {
        let url = self.url.to_string();
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|source| LoadError::Transport { url: url.clone(), source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status { url, status: status.as_u16() });
        }
        let body = resp.text().await.map_err(|source| LoadError::Transport { url, source })?;
        Ok(Catalog::from_json(&body)?)
    }
}

/// Reads the document from the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String { self.path.display().to_string() }

    async fn fetch(&self) -> Result<Catalog, LoadError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io { path: self.path.display().to_string(), source })?;
        Ok(Catalog::from_json(&body)?)
    }
}

/// In-memory document, for embedders that already hold the JSON.
pub struct StaticSource {
    json: String,
}

impl StaticSource {
    pub fn new(json: impl Into<String>) -> Self { Self { json: json.into() } }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn describe(&self) -> String { "<inline>".to_string() }

    async fn fetch(&self) -> Result<Catalog, LoadError> {
        Ok(Catalog::from_json(&self.json)?)
    }
}

/// Pick a source for `location`. `http(s)://` URLs are fetched directly;
/// with a `base_url`, any other location is resolved against it the way a
/// page resolves a relative fetch. Everything else is a file path.
pub fn source_for(
    location: &str,
    base_url: Option<&str>,
    user_agent: &str,
    timeout: Option<Duration>,
) -> Result<Box<dyn CatalogSource>, LoadError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(LoadError::Location { location: location.to_string(), reason: "empty".to_string() });
    }
    let bad = |reason: String| LoadError::Location { location: location.to_string(), reason };

    if location.starts_with("http://") || location.starts_with("https://") {
        let url = Url::parse(location).map_err(|e| bad(e.to_string()))?;
        return Ok(Box::new(HttpSource::new(url, user_agent, timeout)?));
    }
    if let Some(base) = base_url.filter(|b| !b.trim().is_empty()) {
        let base = Url::parse(base.trim()).map_err(|e| bad(format!("bad base url: {e}")))?;
        let url = base.join(location).map_err(|e| bad(e.to_string()))?;
        return Ok(Box::new(HttpSource::new(url, user_agent, timeout)?));
    }
    Ok(Box::new(FileSource::new(location)))
}
