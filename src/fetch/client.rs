use async_trait::async_trait;
use reqwest::{Request, Response};

/// The transport seam: every backend request goes through an implementor.
///
/// Retries, redirects, cookies and TLS are the implementor's concern.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
