/// Anti-forgery token state.
///
/// Starts [`Unauthenticated`](CsrfToken::Unauthenticated) and moves to
/// [`Authenticated`](CsrfToken::Authenticated) once the backend hands out a
/// token. A later bootstrap replaces the held token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CsrfToken {
    #[default]
    Unauthenticated,
    Authenticated(String),
}

impl CsrfToken {
    /// The value sent in the `csrfToken` parameter; empty before bootstrap.
    pub fn value(&self) -> &str {
        match self {
            CsrfToken::Unauthenticated => "",
            CsrfToken::Authenticated(token) => token,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, CsrfToken::Authenticated(_))
    }

    pub fn adopt(&mut self, token: &str) {
        *self = CsrfToken::Authenticated(token.to_string());
    }
}
