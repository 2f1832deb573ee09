use std::time::Duration;

use super::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};

const FIREFOX_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// A [`reqwest::Client`] configured to look like a desktop browser.
///
/// The csrf token handed out by the backend is bound to the session cookie,
/// so the cookie store must live as long as the token does.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("ru-RU,ru;q=0.9,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .user_agent(FIREFOX_USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .referer(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
