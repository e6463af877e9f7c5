//! Configuration module for Campus-Search
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use campus_search::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("search.toml")).unwrap();
//! println!("Crawler will expand {} hops", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ExtractConfig, FetchConfig, SearchConfig, StorageConfig,
};

// Re-export parser functions
pub use parser::{corpus_fingerprint, load_config, parse_config, read_config};
pub use validation::validate;
