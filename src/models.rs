use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a Firecrawl `/v0/scrape` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
    #[serde(rename = "pageOptions")]
    pub page_options: PageOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageOptions {
    #[serde(rename = "onlyMainContent")]
    pub only_main_content: bool,
}

impl ScrapeRequest {
    /// Request main-content-only extraction of a single page
    pub fn main_content(url: &str) -> Self {
        Self {
            url: url.to_string(),
            page_options: PageOptions {
                only_main_content: true,
            },
        }
    }
}

/// Scrape response kept as untyped JSON so it can be written back unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeResponse {
    pub body: Value,
}

impl ScrapeResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Value of the top-level `success` flag; anything but `true` counts as failure
    pub fn is_success(&self) -> bool {
        self.body
            .get("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Character count of `data.markdown`, 0 when the field is missing
    pub fn markdown_len(&self) -> usize {
        self.body
            .get("data")
            .and_then(|d| d.get("markdown"))
            .and_then(|m| m.as_str())
            .map(|m| m.chars().count())
            .unwrap_or(0)
    }
}
