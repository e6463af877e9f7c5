//! Campus-Search: a domain-restricted crawler with a TF-IDF search engine
//!
//! This crate crawls a site breadth-first up to a fixed hop count, keeping only
//! addresses under a configured host suffix, extracts the text of the pages'
//! content regions, and answers free-text queries by ranking the pages with
//! cosine similarity over TF-IDF vectors.

pub mod config;
pub mod corpus;
pub mod crawler;
pub mod engine;
pub mod extract;
pub mod index;
pub mod interface;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Campus-Search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Search index has not been trained yet")]
    NotTrained,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain suffix: {0}")]
    InvalidSuffix(String),

    #[error("Invalid CSS class name: {0}")]
    InvalidClass(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Campus-Search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use corpus::{Corpus, Document, DocumentIndex};
pub use engine::{SearchEngine, SearchHit};
pub use crate::url::{normalize_url, DomainFilter};
