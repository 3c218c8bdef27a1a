//! Client identity resolution.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

use crate::headers::{CfConnectingIp, SingleValueHeader, XForwardedFor, XRealIp};
use crate::rejection::InfallibleRejection;

/// Identity reported when no usable source header is present.
pub const UNKNOWN_CLIENT: &str = "Unknown";

/// The client's apparent IP address.
///
/// Resolution is an ordered fallback over request headers; the first
/// non-empty source wins:
///
/// 1. `CF-Connecting-IP` — written by the edge that terminates the client
///    connection, so a client can't forge it;
/// 2. `X-Real-Ip`;
/// 3. the first `X-Forwarded-For` entry — client-supplied and spoofable,
///    consulted only when nothing trusted is available;
/// 4. the literal `"Unknown"`.
///
/// The trusted source must stay first in the chain: anything the client can
/// set may never shadow what the edge reported.
///
/// The resolved value is an opaque display string; it is never parsed or
/// validated as an IP address.
#[derive(Debug, Clone)]
pub struct ClientIdentity(pub String);

impl ClientIdentity {
    /// Resolves the identity from a header map.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        CfConnectingIp::maybe_value(headers)
            .or_else(|| XRealIp::maybe_value(headers))
            .or_else(|| XForwardedFor::maybe_first_entry(headers))
            .map_or_else(|| Self(UNKNOWN_CLIENT.to_owned()), Self)
    }
}

impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Sync,
{
    type Rejection = InfallibleRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
