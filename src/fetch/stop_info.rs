//! Signed fetcher for the `getStopInfo` endpoint.

use reqwest::Url;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::auth::{CsrfToken, sign};
use super::{HttpClient, fetch_bytes};
use crate::error::FetchError;
use crate::parser::{parse_csrf_token, parse_stop_info};
use crate::schema::StopInfoResponse;

pub const DEFAULT_ENDPOINT: &str = "https://yandex.ru/maps/api/masstransit/getStopInfo";

/// Requests re-issued after a token bootstrap, per call.
pub const MAX_RETRIES: usize = 1;

/// A signed stop-info query.
///
/// Parameters are encoded in a fixed order and the signature is computed over
/// exactly that encoding, so the backend rejects any reordering.
#[derive(Debug, Clone)]
pub struct StopQuery {
    url: Url,
    signature: String,
}

impl StopQuery {
    pub fn new(endpoint: &Url, stop_id: &str, token: &CsrfToken) -> Self {
        let id = format!("stop__{stop_id}");
        let mut query = encode_pairs(&[
            ("ajax", "1"),
            ("csrfToken", token.value()),
            ("id", id.as_str()),
            ("lang", "ru"),
            ("locale", "ru_RU"),
            ("mode", "prognosis"),
        ]);

        let signature = sign(&query);
        query.push_str("&s=");
        query.push_str(&signature);

        let mut url = endpoint.clone();
        url.set_query(Some(&query));

        Self { url, signature }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Joins `key=value` pairs with `&`, escaping like the backend's own client:
/// only `A-Z a-z 0-9 - _ . ~` pass through, a space becomes `+`.
fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", query_escape(k), query_escape(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn query_escape(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

/// Fetches stop information, bootstrapping the csrf token when needed.
///
/// The token is held for the client's lifetime and reused across calls. The
/// lock is held for a whole fetch so concurrent callers cannot race to adopt
/// different tokens.
pub struct StopInfoClient<C> {
    client: C,
    endpoint: Url,
    token: Mutex<CsrfToken>,
}

impl<C: HttpClient> StopInfoClient<C> {
    pub fn new(client: C, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            token: Mutex::new(CsrfToken::default()),
        }
    }

    /// Starts from an already known token instead of bootstrapping.
    pub fn with_token(mut self, token: CsrfToken) -> Self {
        self.token = Mutex::new(token);
        self
    }

    pub async fn token(&self) -> CsrfToken {
        self.token.lock().await.clone()
    }

    /// Fetches the stop-info response for `stop_id`.
    ///
    /// A response without `data` is taken to be a token bootstrap: the carried
    /// token is adopted and the request re-issued, at most [`MAX_RETRIES`]
    /// times.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Transport`] if the HTTP collaborator fails.
    /// - [`FetchError::AuthBootstrap`] if a rejected response carries no token.
    /// - [`FetchError::Decode`] if the retried response is not valid JSON.
    /// - [`FetchError::EmptyStopData`] if the retried response has no `data`.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_stop_info(&self, stop_id: &str) -> Result<StopInfoResponse, FetchError> {
        let mut token = self.token.lock().await;
        let mut attempt = 0;

        loop {
            let query = StopQuery::new(&self.endpoint, stop_id, &token);
            debug!(
                attempt,
                authenticated = token.is_authenticated(),
                signature = query.signature(),
                "Requesting stop info"
            );
            let bytes = fetch_bytes(&self.client, query.url).await?;
            let decoded = parse_stop_info(&bytes);

            if attempt == MAX_RETRIES {
                let resp = decoded?;
                if resp.data.is_none() {
                    return Err(FetchError::empty_stop_data(&bytes));
                }
                return Ok(resp);
            }

            if let Ok(resp) = decoded {
                if resp.data.is_some() {
                    return Ok(resp);
                }
            }

            let carrier =
                parse_csrf_token(&bytes).map_err(|_| FetchError::auth_bootstrap(&bytes))?;
            let Some(fresh) = carrier.token() else {
                return Err(FetchError::auth_bootstrap(&bytes));
            };

            info!(replaced = token.is_authenticated(), "Adopting csrf token");
            token.adopt(fresh);
            attempt += 1;
        }
    }
}
