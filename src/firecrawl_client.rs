use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::io::{self, Write};
use std::time::Duration;

use crate::config::ProbeConfig;
use crate::error::{Error, Result};
use crate::models::{ScrapeRequest, ScrapeResponse};
use crate::utils::{mask_secret, save_to_json};

pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    /// Create a client against `base_url`, e.g. `https://api.firecrawl.dev`
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        Self::with_base_url(&config.api_key, &config.api_base)
    }

    /// Scrape one page with main-content-only extraction, without retries
    pub fn scrape(&self, url: &str) -> Result<ScrapeResponse> {
        let endpoint = format!("{}/v0/scrape", self.base_url);
        tracing::debug!(%endpoint, page = url, "sending scrape request");

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&ScrapeRequest::main_content(url))
            .send()?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "scrape response received");

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text()?;
        let body = serde_json::from_str(&text).map_err(|e| Error::Parse {
            message: e.to_string(),
            body: text.clone(),
        })?;

        Ok(ScrapeResponse::new(body))
    }
}

/// How a probe run ended; the process exits 0 for all of them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// `success: true`, response written to disk
    Saved { markdown_len: usize },
    /// API answered but flagged failure
    Rejected,
    /// Transport, HTTP status, parse or write error
    Failed,
}

/// Run one scrape against the configured target and report on `out`
///
/// Only errors writing to `out` are returned
pub fn run_probe<W: Write>(config: &ProbeConfig, out: &mut W) -> io::Result<ProbeOutcome> {
    writeln!(
        out,
        "Testing FireCrawl API with key: {}",
        mask_secret(&config.api_key)
    )?;

    let response = match FirecrawlClient::from_config(config)
        .and_then(|client| client.scrape(&config.target_url))
    {
        Ok(response) => response,
        Err(e) => return report_failure(out, &e),
    };

    if !response.is_success() {
        writeln!(
            out,
            "❌ FireCrawl Scrape Failed (API responded but 'success' field is false)"
        )?;
        writeln!(out, "{}", response.body)?;
        return Ok(ProbeOutcome::Rejected);
    }

    let markdown_len = response.markdown_len();
    writeln!(out, "✅ FireCrawl Scrape Successful!")?;
    writeln!(out, "Markdown Content Length: {}", markdown_len)?;

    match save_to_json(&response.body, &config.output_path) {
        Ok(()) => {
            writeln!(out, "✓ Response saved to '{}'", config.output_path.display())?;
            Ok(ProbeOutcome::Saved { markdown_len })
        }
        Err(e) => report_failure(out, &e),
    }
}

fn report_failure<W: Write>(out: &mut W, err: &Error) -> io::Result<ProbeOutcome> {
    tracing::warn!(error = %err, "scrape probe failed");
    writeln!(out, "❌ Error: {}", err)?;
    if let Some(body) = err.response_body() {
        writeln!(out, "{}", body)?;
    }
    Ok(ProbeOutcome::Failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn config_for(server: &mockito::ServerGuard, dir: &tempfile::TempDir) -> ProbeConfig {
        ProbeConfig::from_lookup(|name| match name {
            crate::config::API_KEY_VAR => Some("fc-test-0000-key".to_string()),
            crate::config::API_URL_VAR => Some(server.url()),
            _ => None,
        })
        .unwrap()
        .with_target_url("https://tayloredpetportraits.com")
        .with_output_path(dir.path().join(".tmp").join("firecrawl_sample.json"))
    }

    fn run(config: &ProbeConfig) -> (ProbeOutcome, String) {
        let mut out = Vec::new();
        let outcome = run_probe(config, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_scrape_sends_expected_request() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v0/scrape")
            .match_header("authorization", "Bearer fc-test-0000-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "url": "https://example.com",
                "pageOptions": { "onlyMainContent": true }
            })))
            .with_status(200)
            .with_body(r#"{"success":true,"data":{"markdown":"hi"}}"#)
            .create();

        let client = FirecrawlClient::with_base_url("fc-test-0000-key", &server.url()).unwrap();
        let response = client.scrape("https://example.com").unwrap();

        mock.assert();
        assert!(response.is_success());
        assert_eq!(response.markdown_len(), 2);
    }

    #[test]
    fn test_scrape_non_json_body_keeps_text() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v0/scrape")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create();

        let client = FirecrawlClient::with_base_url("fc-test-0000-key", &server.url()).unwrap();
        let err = client.scrape("https://example.com").unwrap_err();
        assert_eq!(err.response_body(), Some("<html>gateway</html>"));
    }

    #[test]
    fn test_probe_success_writes_response() {
        let mut server = mockito::Server::new();
        let markdown = "# Taylored Pet Portraits\n\nHand painted portraits.";
        let body = json!({
            "success": true,
            "data": {
                "markdown": markdown,
                "metadata": { "title": "Taylored Pet Portraits", "statusCode": 200 }
            }
        });
        let mock = server
            .mock("POST", "/v0/scrape")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create();

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir);
        let (outcome, printed) = run(&config);

        mock.assert();
        let expected_len = markdown.chars().count();
        assert_eq!(outcome, ProbeOutcome::Saved { markdown_len: expected_len });
        assert!(printed.contains("fc-t...-key"));
        assert!(printed.contains(&format!("Markdown Content Length: {}", expected_len)));

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&config.output_path).unwrap()).unwrap();
        assert_eq!(saved, body);
    }

    #[test]
    fn test_probe_reports_success_before_save_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v0/scrape")
            .with_status(200)
            .with_body(r#"{"success":true,"data":{"markdown":"abcdef"}}"#)
            .create();

        let dir = tempfile::tempdir().unwrap();
        // a regular file where the output directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config = config_for(&server, &dir).with_output_path(blocker.join("out.json"));

        let (outcome, printed) = run(&config);

        assert_eq!(outcome, ProbeOutcome::Failed);
        let success = printed.find("✅ FireCrawl Scrape Successful!").unwrap();
        let length = printed.find("Markdown Content Length: 6").unwrap();
        let error = printed.find("❌ Error: I/O error").unwrap();
        assert!(success < length && length < error);
        assert!(!printed.contains("Response saved"));
    }

    #[test]
    fn test_probe_flagged_failure_prints_body_without_writing() {
        let mut server = mockito::Server::new();
        let body = json!({ "success": false, "error": "Failed to scrape URL" });
        let _mock = server
            .mock("POST", "/v0/scrape")
            .with_status(200)
            .with_body(body.to_string())
            .create();

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir);
        let (outcome, printed) = run(&config);

        assert_eq!(outcome, ProbeOutcome::Rejected);
        assert!(printed.contains("'success' field is false"));
        assert!(printed.contains(&body.to_string()));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_probe_http_error_prints_body_without_writing() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v0/scrape")
            .with_status(401)
            .with_body(r#"{"error":"Unauthorized: Invalid token"}"#)
            .create();

        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir);
        let (outcome, printed) = run(&config);

        assert_eq!(outcome, ProbeOutcome::Failed);
        assert!(printed.contains("❌ Error: API error (status 401)"));
        assert!(printed.contains("Unauthorized: Invalid token"));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_probe_network_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // nothing listens on port 9 locally
        let config = ProbeConfig::from_lookup(|name| match name {
            crate::config::API_KEY_VAR => Some("fc-test-0000-key".to_string()),
            crate::config::API_URL_VAR => Some("http://127.0.0.1:9".to_string()),
            _ => None,
        })
        .unwrap()
        .with_output_path(dir.path().join("out.json"));

        let (outcome, printed) = run(&config);
        assert_eq!(outcome, ProbeOutcome::Failed);
        assert!(printed.contains("❌ Error: Network error"));
        assert!(!config.output_path.exists());
    }
}
