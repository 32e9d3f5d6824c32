use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::GenomesError;

/// Fetches the bytes at a URL. There is no retry: a failed request is
/// returned to the caller as-is.
pub trait Transport: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, GenomesError>;

    fn fetch_text(&self, url: &str) -> Result<String, GenomesError> {
        let bytes = self.fetch(url)?;
        String::from_utf8(bytes)
            .map_err(|err| GenomesError::Parse(format!("{url} is not valid UTF-8: {err}")))
    }
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, GenomesError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("ncbi-genomes/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| GenomesError::Fetch {
                    url: String::new(),
                    message: err.to_string(),
                })?,
        );

        if let Ok(api_key) = std::env::var("NCBI_API_KEY") {
            if !api_key.trim().is_empty() {
                headers.insert(
                    "api-key",
                    HeaderValue::from_str(api_key.trim()).map_err(|err| GenomesError::Fetch {
                        url: String::new(),
                        message: format!("invalid NCBI_API_KEY: {err}"),
                    })?,
                );
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| GenomesError::Fetch {
                url: String::new(),
                message: err.to_string(),
            })?;
        Ok(Self { client })
    }

    fn handle_status(
        url: &str,
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, GenomesError> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(GenomesError::FetchStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, GenomesError> {
        let start = std::time::Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| GenomesError::Fetch {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        let response = Self::handle_status(url, response)?;
        let bytes = response.bytes().map_err(|err| GenomesError::Fetch {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        debug!(
            url,
            bytes = bytes.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "response received"
        );
        Ok(bytes.to_vec())
    }
}
