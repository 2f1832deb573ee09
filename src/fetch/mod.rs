mod basic;
mod client;
pub mod auth;
mod stop_info;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use stop_info::{DEFAULT_ENDPOINT, MAX_RETRIES, StopInfoClient, StopQuery};

use tracing::{debug, warn};

use crate::error::FetchError;

/// Issues a GET for `url` and returns the body.
///
/// The status code is not treated as an error: the backend may answer a
/// missing token with a non-2xx status and a body that still has to be read.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: reqwest::Url) -> Result<Vec<u8>, FetchError> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        warn!(%status, "Backend returned non-success status");
    }

    let bytes = resp.bytes().await?.to_vec();
    debug!(%status, bytes = bytes.len(), "Response received");
    Ok(bytes)
}
