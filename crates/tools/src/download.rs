//! # Template download
//!
//! Fetches the latest reference template over HTTPS.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument};

use crate::errors::Error;
use crate::TemplateFetcher;

/// Time allowed for a whole template download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Downloads templates with a blocking HTTP client.
#[derive(Debug, Clone)]
pub struct HttpTemplateFetcher {
    client: Client,
}

impl HttpTemplateFetcher {
    /// Creates a fetcher with the crate's user agent.
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(concat!("l10n-guard/", env!("CARGO_PKG_VERSION")))
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| Error::DownloadFailed {
                url: String::new(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl TemplateFetcher for HttpTemplateFetcher {
    #[instrument(skip(self))]
    fn fetch_template(&self, url: &str, destination: &Path) -> Result<(), Error> {
        let failed = |reason: String| Error::DownloadFailed {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| failed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("server replied {}", status)));
        }
        let body = response.bytes().map_err(|e| failed(e.to_string()))?;
        if body.is_empty() {
            return Err(failed("empty response".to_string()));
        }

        debug!(bytes = body.len(), "downloaded template");
        fs::write(destination, &body)?;
        Ok(())
    }
}
