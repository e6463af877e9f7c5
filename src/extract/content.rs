//! Content region extraction
//!
//! Only text inside target regions is kept:
//!
//! - `div` elements carrying one of the configured content classes contribute
//!   the text of every `<p>` they contain
//! - `table` elements carrying one of the configured table classes contribute
//!   their full text
//!
//! Regions are read in document order. A region nested inside another target
//! region is part of the outer one and is not read again.

use crate::config::ExtractConfig;
use crate::extract::clean::clean_text;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Pulls target-region text out of raw HTML
#[derive(Debug, Clone)]
pub struct PageExtractor {
    regions: Selector,
    paragraphs: Selector,
}

impl PageExtractor {
    /// Builds the region selectors from the `[extract]` configuration section
    pub fn new(config: &ExtractConfig) -> Result<Self, ConfigError> {
        let selector_list: Vec<String> = config
            .content_classes
            .iter()
            .map(|class| format!("div.{}", class))
            .chain(
                config
                    .table_classes
                    .iter()
                    .map(|class| format!("table.{}", class)),
            )
            .collect();

        if selector_list.is_empty() {
            return Err(ConfigError::Validation(
                "no content or table classes configured".to_string(),
            ));
        }

        let regions = Selector::parse(&selector_list.join(", "))
            .map_err(|e| ConfigError::InvalidClass(format!("{:?}", e)))?;
        let paragraphs =
            Selector::parse("p").map_err(|e| ConfigError::InvalidClass(format!("{:?}", e)))?;

        Ok(Self {
            regions,
            paragraphs,
        })
    }

    /// Extracts the raw region text of a page, joined by single spaces
    ///
    /// Returns an empty string when the page has no target regions.
    pub fn extract(&self, html: &str) -> String {
        let document = Html::parse_document(html);
        let mut parts: Vec<String> = Vec::new();

        for region in document.select(&self.regions) {
            if self.is_nested(region) {
                continue;
            }

            if region.value().name() == "table" {
                push_part(&mut parts, region.text().collect::<Vec<_>>().join(" "));
            } else {
                for paragraph in region.select(&self.paragraphs) {
                    push_part(&mut parts, paragraph.text().collect::<String>());
                }
            }
        }

        parts.join(" ")
    }

    /// Extracts and cleans a page; this is the text stored in a Document
    pub fn document_text(&self, html: &str) -> String {
        clean_text(&self.extract(html))
    }

    fn is_nested(&self, region: ElementRef<'_>) -> bool {
        region
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| self.regions.matches(&ancestor))
    }
}

fn push_part(parts: &mut Vec<String>, text: String) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}
