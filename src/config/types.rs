use serde::{Deserialize, Serialize};

/// Main configuration structure for Campus-Search
///
/// Every section is optional in the TOML file; missing sections take their
/// defaults. The crawl root has no useful default and must come from either
/// the file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

/// Crawl traversal configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Address the traversal starts from
    pub root: String,

    /// Number of hops expanded from the root (bucket `max-depth + 1` is collected but not expanded)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of fetches in flight within one depth bucket
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Host suffix every collected address must end with (e.g. "utk.edu")
    #[serde(rename = "domain-suffix")]
    pub domain_suffix: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            root: String::new(),
            max_depth: 1,
            max_concurrent_fetches: 8,
            domain_suffix: "utk.edu".to_string(),
        }
    }
}

/// HTTP fetch and retry configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Attempts per address before giving up
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Timeout applied to each attempt independently (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Delay before the first retry; doubles on every further retry (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Upper bound for the retry delay (milliseconds)
    #[serde(rename = "max-retry-delay-ms")]
    pub max_retry_delay_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            timeout_ms: 10_000,
            retry_delay_ms: 0,
            max_retry_delay_ms: 5_000,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// Content extraction configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Classes marking `div` content regions whose paragraphs are indexed
    #[serde(rename = "content-classes")]
    pub content_classes: Vec<String>,

    /// Classes marking tables whose full text is indexed
    #[serde(rename = "table-classes")]
    pub table_classes: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            content_classes: vec!["person-content".to_string(), "entry-content".to_string()],
            table_classes: vec!["table_default".to_string()],
        }
    }
}

/// Query presentation configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of positive-score matches shown per query
    #[serde(rename = "max-results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 5 }
    }
}

/// Corpus persistence configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database holding the crawled corpus
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "./corpus.db".to_string(),
        }
    }
}
