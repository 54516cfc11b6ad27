use std::path::PathBuf;

use crate::error::{Error, Result};

pub const API_KEY_VAR: &str = "FIRECRAWL_KEY";
pub const API_URL_VAR: &str = "FIRECRAWL_API_URL";

pub const DEFAULT_API_BASE: &str = "https://api.firecrawl.dev";
pub const DEFAULT_TARGET_URL: &str = "https://tayloredpetportraits.com";
pub const DEFAULT_OUTPUT_PATH: &str = ".tmp/firecrawl_sample.json";

/// Settings for one brand-extraction probe run
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub api_key: String,
    pub api_base: String,
    pub target_url: String,
    pub output_path: PathBuf,
}

impl ProbeConfig {
    /// Build the config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable lookup; an empty key counts as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingCredential(API_KEY_VAR))?;

        let api_base = lookup(API_URL_VAR)
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            target_url: DEFAULT_TARGET_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        })
    }

    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = url.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}
