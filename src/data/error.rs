//! Data loading error types

use thiserror::Error;

/// Errors that abort loading of the order table
#[derive(Error, Debug)]
pub enum LoadError {
    /// Local file could not be read
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote dataset could not be fetched
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote server answered with a non-success status
    #[error("Fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A cell could not be coerced to its column type
    #[error("Line {line}: invalid {column} value {value:?}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}

impl LoadError {
    /// Whether the failure happened while reaching the source rather than
    /// while reading its content
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            LoadError::Io { .. } | LoadError::Fetch { .. } | LoadError::HttpStatus { .. }
        )
    }
}

/// Result type for data loading
pub type LoadResult<T> = Result<T, LoadError>;
