//! Edge-supplied visitor metadata.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use serde::Serialize;

use crate::headers::{CfIpCity, CfIpCountry, CfTimezone, SingleValueHeader};
use crate::rejection::InfallibleRejection;

/// Geo fields the edge network attaches to each request.
///
/// The service does no geo-IP resolution of its own. These are plain reads
/// of the edge's visitor-location headers (`CF-IPCountry`, `CF-IPCity`,
/// `CF-Timezone`); a deployment without them simply sees every field
/// absent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EdgeGeo {
    /// Visitor country, when the edge reported one.
    pub country: Option<String>,
    /// Visitor city, when the edge reported one.
    pub city: Option<String>,
    /// Visitor timezone, when the edge reported one.
    pub timezone: Option<String>,
}

impl EdgeGeo {
    /// Reads the bundle from a header map. Empty values count as absent,
    /// same as the identity sources.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            country: CfIpCountry::maybe_value(headers),
            city: CfIpCity::maybe_value(headers),
            timezone: CfTimezone::maybe_value(headers),
        }
    }

    /// Whether the edge attached any metadata at all.
    pub fn provided(&self) -> bool {
        self.country.is_some() || self.city.is_some() || self.timezone.is_some()
    }
}

impl<S> FromRequestParts<S> for EdgeGeo
where
    S: Sync,
{
    type Rejection = InfallibleRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
