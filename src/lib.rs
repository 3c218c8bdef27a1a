//! A content-negotiating "what is my IP" service for origins behind an
//! edge proxy
//!
//! Every request gets a `200` answering "who am I, as you see me": the
//! apparent client IP, the user agent, and whatever geo metadata the edge
//! network attached. The representation follows the caller's preference:
//!
//! - `/ip`, `/user-agent`: bare plain-text values
//! - `/json`: a pretty-printed JSON report
//! - `/all`: a plain-text dump of every request header
//! - any other path: JSON if `Accept` asks for it, plain text for known
//!   command-line clients, an HTML page for browsers
//!
//! The client IP is resolved from headers in trust order: the edge's
//! `CF-Connecting-IP` first, then `X-Real-Ip`, then the first
//! `X-Forwarded-For` entry, then the literal `"Unknown"`. Values are
//! opaque display strings; nothing is parsed as an address.
//!
//! ## Usage
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() {
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, ipmirror::app()).await.unwrap();
//! }
//! ```

mod geo;
mod headers;
mod identity;
mod page;
mod rejection;
mod report;
mod respond;
mod routes;

pub use geo::EdgeGeo;
pub use identity::{ClientIdentity, UNKNOWN_CLIENT};
pub use report::ClientReport;
pub use respond::{Page, PrettyJson, Text};
pub use routes::app;
