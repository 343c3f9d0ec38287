use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, Request};
use reqwest::header::ACCEPT;

use crate::error::FsError;
use crate::types::FsResponse;

/// Longest slice of an error body kept in an `FsError::Status`
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Anything that can list a directory by path.
///
/// The store and the background loader only see this trait, so they run
/// the same way against the HTTP client and against in-memory fakes.
pub trait FsSource: Send + Sync {
    fn list(&self, path: &str) -> Result<FsResponse, FsError>;
}

/// Blocking client for `GET {api}fs?path=...`
pub struct FsClient {
    client: Client,
    endpoint: Url,
}

impl FsClient {
    /// `api_url` is the base URL; `fs` is resolved against it, so it should end with `/`.
    /// `timeout` of `None` means requests never time out.
    pub fn new(api_url: &Url, timeout: Option<Duration>) -> Result<Self, FsError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(api_url, client)
    }

    pub fn with_client(api_url: &Url, client: Client) -> Result<Self, FsError> {
        let endpoint = api_url.join("fs").map_err(|e| FsError::Parse(format!("invalid API URL {}: {}", api_url, e)))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_request(&self, path: &str) -> Result<Request, FsError> {
        let request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("path", path)])
            .header(ACCEPT, "application/json")
            .build()?;
        Ok(request)
    }
}

impl FsSource for FsClient {
    fn list(&self, path: &str) -> Result<FsResponse, FsError> {
        let request = self.build_request(path)?;
        tracing::debug!(url = %request.url(), "requesting listing");

        let response = self.client.execute(request)?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(FsError::Status { status: status.as_u16(), body });
        }
        Ok(serde_json::from_str(&body)?)
    }
}
