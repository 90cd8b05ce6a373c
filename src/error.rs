use thiserror::Error;

use crate::types::Category;

/// Why the catalog document could not be obtained.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid content location {location}: {reason}")]
    Location { location: String, reason: String },
}

/// Rejected user interactions. None of these mutate the page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InteractError {
    #[error("no tab tagged {0}")]
    UnknownTab(String),
    #[error("no card at {category}[{index}]")]
    NoSuchCard { category: Category, index: usize },
    #[error("card {0} has no embed panel")]
    NotAMusicCard(String),
    #[error("platform modal has no target card")]
    NoTargetCard,
}
