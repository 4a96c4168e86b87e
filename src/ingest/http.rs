/// Blocking HTTP seam.
///
/// The fetcher only needs a status code and a body, so the host's client is
/// reduced to a single `get`. Timeouts and cancellation belong to the client.

use std::time::Duration;

use crate::model::FetchError;

/// Status code and body of a completed GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub trait HttpGet {
    /// Issues a GET. `Err` only when no response was received at all;
    /// non-200 statuses are returned as responses.
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

impl HttpGet for reqwest::blocking::Client {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = reqwest::blocking::Client::get(self, url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// Builds the blocking client used by the binary.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("co_rivers/", env!("CARGO_PKG_VERSION")))
        .build()
}
