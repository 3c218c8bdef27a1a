//! The header vocabulary the service understands.
//!
//! Every value is kept as an opaque string: the service reports what the
//! edge put on the wire, it never parses or validates IP syntax.

use axum::http::HeaderMap;

pub(crate) const CF_CONNECTING_IP: &str = "CF-Connecting-IP";
pub(crate) const X_REAL_IP: &str = "X-Real-Ip";
pub(crate) const X_FORWARDED_FOR: &str = "X-Forwarded-For";
pub(crate) const CF_IPCOUNTRY: &str = "CF-IPCountry";
pub(crate) const CF_IPCITY: &str = "CF-IPCity";
pub(crate) const CF_TIMEZONE: &str = "CF-Timezone";

/// A header expected to carry a single opaque value.
///
/// An empty value counts as absent, so lookups can be chained with
/// `or_else` without a present-but-blank header short-circuiting the chain.
/// Values that aren't readable as a string are treated as absent too.
pub(crate) trait SingleValueHeader {
    const HEADER: &'static str;

    fn maybe_value(headers: &HeaderMap) -> Option<String> {
        headers
            .get(Self::HEADER)
            .and_then(|hv| hv.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }
}

/// `CF-Connecting-IP`: set by the edge network terminating the client
/// connection. Clients can't reach the origin directly, so this is the one
/// source that can't be spoofed.
pub(crate) struct CfConnectingIp;

/// `X-Real-Ip`: conventionally set by a fronting reverse proxy.
pub(crate) struct XRealIp;

/// `CF-IPCountry`: visitor country, injected by the edge.
pub(crate) struct CfIpCountry;

/// `CF-IPCity`: visitor city, injected by the edge.
pub(crate) struct CfIpCity;

/// `CF-Timezone`: visitor timezone, injected by the edge.
pub(crate) struct CfTimezone;

impl SingleValueHeader for CfConnectingIp {
    const HEADER: &'static str = CF_CONNECTING_IP;
}

impl SingleValueHeader for XRealIp {
    const HEADER: &'static str = X_REAL_IP;
}

impl SingleValueHeader for CfIpCountry {
    const HEADER: &'static str = CF_IPCOUNTRY;
}

impl SingleValueHeader for CfIpCity {
    const HEADER: &'static str = CF_IPCITY;
}

impl SingleValueHeader for CfTimezone {
    const HEADER: &'static str = CF_TIMEZONE;
}

/// `X-Forwarded-For`: a client-extendable proxy chain. Only the first entry
/// of the first readable line is ever used, and only as a last resort.
pub(crate) struct XForwardedFor;

impl XForwardedFor {
    pub(crate) const HEADER: &'static str = X_FORWARDED_FOR;

    /// First comma-separated entry, exactly as it appears on the wire
    /// (untrimmed). An empty first entry counts as absent.
    pub(crate) fn maybe_first_entry(headers: &HeaderMap) -> Option<String> {
        let line = headers
            .get_all(Self::HEADER)
            .iter()
            .find_map(|hv| hv.to_str().ok())?;
        let entry = line.split(',').next()?;
        (!entry.is_empty()).then(|| entry.to_owned())
    }
}
