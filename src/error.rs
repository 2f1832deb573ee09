//! Error taxonomy for fetching stop information.

use thiserror::Error;

/// Terminal failures of a stop-info fetch. None of these yield partial output.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP collaborator failed (DNS, TLS, timeout, protocol).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The body was not valid JSON for the attempted schema.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Neither stop data nor a usable csrf token could be extracted.
    #[error("Bad token: {body}")]
    AuthBootstrap { body: String },
    /// A well-formed response that carries no `data`, e.g. an unknown stop id.
    #[error("Bad stop info: {body}")]
    EmptyStopData { body: String },
}

impl FetchError {
    pub(crate) fn auth_bootstrap(bytes: &[u8]) -> Self {
        FetchError::AuthBootstrap {
            body: String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    pub(crate) fn empty_stop_data(bytes: &[u8]) -> Self {
        FetchError::EmptyStopData {
            body: String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}
