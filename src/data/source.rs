//! Dataset Sources
//!
//! Where the order CSV comes from: a local file or an HTTP(S) URL.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::error::{LoadError, LoadResult};

/// Location of the order dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSource {
    /// Remote CSV fetched over HTTP(S)
    Url(String),
    /// Local CSV file
    Path(PathBuf),
}

impl DataSource {
    /// Interpret a configured location. Anything starting with `http://` or
    /// `https://` is a URL, everything else a filesystem path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Build the reader for this location
    pub fn open(&self, client: &reqwest::Client) -> Box<dyn OrderSource> {
        match self {
            DataSource::Url(url) => Box::new(HttpSource::new(client.clone(), url.clone())),
            DataSource::Path(path) => Box::new(FileSource::new(path.clone())),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Something that yields the raw bytes of an order CSV
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Human-readable location, used in logs
    fn describe(&self) -> String;

    /// Fetch the full file content
    async fn fetch(&self) -> LoadResult<Vec<u8>>;
}

/// CSV on the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OrderSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> LoadResult<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|e| LoadError::Io {
            path: self.describe(),
            source: e,
        })
    }
}

/// CSV served over HTTP(S)
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl OrderSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> LoadResult<Vec<u8>> {
        let fetch_err = |e| LoadError::Fetch {
            url: self.url.clone(),
            source: e,
        };

        let response = self.client.get(&self.url).send().await.map_err(fetch_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(fetch_err)?;
        Ok(bytes.to_vec())
    }
}
