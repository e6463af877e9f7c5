use crate::config::types::{Config, ExtractConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use campus_search::config::load_config;
///
/// let config = load_config(Path::new("search.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Reads and parses a configuration file without validating it
///
/// The binary uses this so command-line overrides (such as `--root`) can be
/// applied before validation runs.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration from a TOML string without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// The settings that determine which documents a crawl produces
#[derive(Serialize)]
struct CorpusInputs<'a> {
    root: &'a str,
    max_depth: u32,
    domain_suffix: &'a str,
    extract: &'a ExtractConfig,
}

/// Computes a SHA-256 fingerprint of the settings that shape the corpus
///
/// Two configurations with the same root, depth, domain suffix and extraction
/// classes produce the same fingerprint. Fetch tuning, presentation and storage
/// settings do not take part.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 digest (64 characters)
/// * `Err(ConfigError)` - The settings could not be serialized
pub fn corpus_fingerprint(config: &Config) -> Result<String, ConfigError> {
    let inputs = CorpusInputs {
        root: &config.crawler.root,
        max_depth: config.crawler.max_depth,
        domain_suffix: &config.crawler.domain_suffix,
        extract: &config.extract,
    };
    let serialized = toml::to_string(&inputs)?;

    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
