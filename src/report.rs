//! Payloads derived from a request: the JSON report and the header dump.

use axum::http::{HeaderMap, HeaderName, Method, header};
use serde::Serialize;

use crate::geo::EdgeGeo;
use crate::identity::ClientIdentity;

/// Everything the JSON renderer reports about a request.
///
/// Field order here is wire order.
#[derive(Debug, Serialize)]
pub struct ClientReport {
    /// Resolved client identity.
    pub ip: String,
    /// Raw `User-Agent` value.
    pub user_agent: Option<String>,
    /// Method of the request being reported.
    pub method: String,
    /// Raw `Accept-Encoding` value.
    pub encoding: Option<String>,
    /// Raw `Accept-Language` value.
    pub language: Option<String>,
    /// Edge-reported country.
    pub country: Option<String>,
    /// Edge-reported city.
    pub city: Option<String>,
    /// Edge-reported timezone.
    pub timezone: Option<String>,
}

impl ClientReport {
    /// Assembles the report from the request parts it describes.
    pub fn new(
        method: &Method,
        headers: &HeaderMap,
        identity: ClientIdentity,
        geo: EdgeGeo,
    ) -> Self {
        Self {
            ip: identity.0,
            user_agent: header_string(headers, header::USER_AGENT),
            method: method.to_string(),
            encoding: header_string(headers, header::ACCEPT_ENCODING),
            language: header_string(headers, header::ACCEPT_LANGUAGE),
            country: geo.country,
            city: geo.city,
            timezone: geo.timezone,
        }
    }
}

/// Raw header value; `None` when absent or not readable as a string.
///
/// Unlike the identity sources this keeps an empty value as `""` — the
/// report distinguishes "sent nothing" from "sent an empty header".
fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|hv| hv.to_str().ok())
        .map(str::to_owned)
}

/// Body of the `/all` dump: the resolved identity, every header in the
/// order the header map yields them, and the metadata bundle when the edge
/// provided one. Values are decoded lossily so the listing is complete even
/// for headers that aren't valid strings.
pub(crate) fn headers_dump(
    identity: &ClientIdentity,
    headers: &HeaderMap,
    geo: &EdgeGeo,
) -> String {
    let mut out = format!("IP: {}\n\nHeaders:\n", identity.0);
    for (name, value) in headers {
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&String::from_utf8_lossy(value.as_bytes()));
        out.push('\n');
    }
    if geo.provided()
        && let Ok(bundle) = serde_json::to_string_pretty(geo)
    {
        out.push_str("\nCloudflare Info:\n");
        out.push_str(&bundle);
    }
    out
}
