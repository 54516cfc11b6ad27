pub mod config;
pub mod error;
pub mod firecrawl_client;
pub mod logging;
pub mod migrations;
pub mod models;
pub mod utils;

// Re-export main types
pub use config::ProbeConfig;
pub use error::{Error, Result};
pub use firecrawl_client::{run_probe, FirecrawlClient, ProbeOutcome};
pub use migrations::{Migration, MigrationSet};
pub use models::{ScrapeRequest, ScrapeResponse};
