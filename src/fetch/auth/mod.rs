//! Request authentication for the stop-info endpoint.
//!
//! The backend accepts a query only when it carries a valid csrf token
//! ([`CsrfToken`]) and a signature over the encoded parameters ([`sign`]).

mod csrf;
mod signature;

pub use csrf::CsrfToken;
pub use signature::sign;
