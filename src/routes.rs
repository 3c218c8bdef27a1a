//! The router and the content negotiation rules.

use axum::{
    Router,
    http::{HeaderMap, Method, header},
    response::{IntoResponse, Response},
    routing::any,
};

use crate::geo::EdgeGeo;
use crate::identity::ClientIdentity;
use crate::page;
use crate::report::{self, ClientReport};
use crate::respond::{Page, PrettyJson, Text};

/// User agents that get plain text without asking for it.
const CLI_AGENTS: [&str; 3] = ["curl", "wget", "httpie"];

/// Builds the service router.
///
/// The four fixed paths respond the same regardless of method, and every
/// other path lands in the negotiation fallback, so no request ever sees a
/// 404: the answer to an unknown path is whichever representation the
/// client's headers ask for.
pub fn app() -> Router {
    Router::new()
        .route("/ip", any(ip))
        .route("/user-agent", any(user_agent))
        .route("/json", any(json))
        .route("/all", any(all))
        .fallback(negotiate)
}

async fn ip(ClientIdentity(ip): ClientIdentity) -> Text {
    Text(ip)
}

async fn user_agent(headers: HeaderMap) -> Text {
    Text(
        headers
            .get(header::USER_AGENT)
            .and_then(|hv| hv.to_str().ok())
            .unwrap_or_default()
            .to_owned(),
    )
}

async fn json(
    method: Method,
    identity: ClientIdentity,
    geo: EdgeGeo,
    headers: HeaderMap,
) -> PrettyJson<ClientReport> {
    PrettyJson(ClientReport::new(&method, &headers, identity, geo))
}

async fn all(identity: ClientIdentity, geo: EdgeGeo, headers: HeaderMap) -> Text {
    Text(report::headers_dump(&identity, &headers, &geo))
}

/// Representation picker for every path outside the fixed four: JSON when
/// the `Accept` header asks for it, bare plain text for known command-line
/// clients, the page for everything else (browsers).
async fn negotiate(
    method: Method,
    identity: ClientIdentity,
    geo: EdgeGeo,
    headers: HeaderMap,
) -> Response {
    if accepts_json(&headers) {
        PrettyJson(ClientReport::new(&method, &headers, identity, geo)).into_response()
    } else if from_cli(&headers) {
        Text(identity.0).into_response()
    } else {
        Page(page::render(&identity, &geo, &headers)).into_response()
    }
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|hv| hv.to_str().ok())
        .any(|value| value.to_ascii_lowercase().contains("application/json"))
}

fn from_cli(headers: &HeaderMap) -> bool {
    headers
        .get(header::USER_AGENT)
        .and_then(|hv| hv.to_str().ok())
        .is_some_and(|value| {
            let value = value.to_ascii_lowercase();
            CLI_AGENTS.iter().any(|agent| value.contains(agent))
        })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::app;

    async fn body_string(body: Body) -> String {
        let bytes = body.collect().await.unwrap().to_bytes();
        String::from_utf8_lossy(&bytes).into()
    }

    fn header<'a>(res: &'a Response<Body>, name: &str) -> Option<&'a str> {
        res.headers().get(name).and_then(|hv| hv.to_str().ok())
    }

    fn request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("CF-Connecting-IP", "1.2.3.4")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn ip_route_is_bare_identity() {
        let res = app().oneshot(request("/ip")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            header(&res, "content-type"),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(body_string(res.into_body()).await, "1.2.3.4\n");
    }

    #[tokio::test]
    async fn ip_route_accepts_any_method() {
        let req = Request::builder()
            .method("POST")
            .uri("/ip")
            .header("CF-Connecting-IP", "1.2.3.4")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res.into_body()).await, "1.2.3.4\n");
    }

    #[tokio::test]
    async fn user_agent_route_echoes_the_header() {
        let req = Request::builder()
            .uri("/user-agent")
            .header("User-Agent", "Mozilla/5.0")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(body_string(res.into_body()).await, "Mozilla/5.0\n");
    }

    #[tokio::test]
    async fn user_agent_route_defaults_to_empty() {
        let res = app().oneshot(request("/user-agent")).await.unwrap();
        assert_eq!(body_string(res.into_body()).await, "\n");
    }

    #[tokio::test]
    async fn json_route_reports_the_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/json")
            .header("CF-Connecting-IP", "1.2.3.4")
            .header("User-Agent", "curl/8.0")
            .header("Accept-Encoding", "gzip")
            .header("CF-IPCountry", "DE")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(
            header(&res, "content-type"),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(header(&res, "x-content-type-options"), Some("nosniff"));

        let body = body_string(res.into_body()).await;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["ip"], "1.2.3.4");
        assert_eq!(value["user_agent"], "curl/8.0");
        assert_eq!(value["method"], "POST");
        assert_eq!(value["encoding"], "gzip");
        assert_eq!(value["language"], serde_json::Value::Null);
        assert_eq!(value["country"], "DE");
        assert_eq!(value["city"], serde_json::Value::Null);
        assert_eq!(value["timezone"], serde_json::Value::Null);
        // 2-space indentation, not the compact form.
        assert!(body.starts_with("{\n  \"ip\""));
    }

    #[tokio::test]
    async fn all_route_dumps_identity_and_headers() {
        let req = Request::builder()
            .uri("/all")
            .header("CF-Connecting-IP", "1.2.3.4")
            .header("User-Agent", "curl/8.0")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        let body = body_string(res.into_body()).await;
        assert!(body.starts_with("IP: 1.2.3.4\n\nHeaders:\n"));
        assert!(body.contains("cf-connecting-ip: 1.2.3.4\n"));
        assert!(body.contains("user-agent: curl/8.0\n"));
        assert!(!body.contains("Cloudflare Info:"));
    }

    #[tokio::test]
    async fn all_route_appends_edge_metadata_when_present() {
        let req = Request::builder()
            .uri("/all")
            .header("CF-Connecting-IP", "1.2.3.4")
            .header("CF-IPCountry", "US")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        let body = body_string(res.into_body()).await;
        assert!(body.contains("\nCloudflare Info:\n{\n  \"country\": \"US\""));
    }

    #[tokio::test]
    async fn cli_user_agent_negotiates_plain_text() {
        let req = Request::builder()
            .uri("/")
            .header("CF-Connecting-IP", "1.2.3.4")
            .header("User-Agent", "curl/8.0")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(
            header(&res, "content-type"),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(body_string(res.into_body()).await, "1.2.3.4\n");
    }

    #[tokio::test]
    async fn cli_match_is_case_insensitive() {
        let req = Request::builder()
            .uri("/")
            .header("CF-Connecting-IP", "1.2.3.4")
            .header("User-Agent", "Wget/1.21")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(body_string(res.into_body()).await, "1.2.3.4\n");
    }

    #[tokio::test]
    async fn json_accept_negotiates_json_even_for_cli() {
        // Accept wins over the user-agent sniff.
        let req = Request::builder()
            .uri("/")
            .header("CF-Connecting-IP", "1.2.3.4")
            .header("User-Agent", "curl/8.0")
            .header("Accept", "Application/JSON")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(
            header(&res, "content-type"),
            Some("application/json; charset=utf-8")
        );
        let value: serde_json::Value =
            serde_json::from_str(&body_string(res.into_body()).await).unwrap();
        assert_eq!(value["ip"], "1.2.3.4");
        assert_eq!(value["method"], "GET");
    }

    #[tokio::test]
    async fn browser_gets_the_page() {
        let req = Request::builder()
            .uri("/")
            .header("CF-Connecting-IP", "1.2.3.4")
            .header("User-Agent", "Mozilla/5.0 (X11; Linux x86_64)")
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Host", "ip.example.com")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(
            header(&res, "content-type"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(header(&res, "x-content-type-options"), None);
        let body = body_string(res.into_body()).await;
        assert!(body.contains("1.2.3.4"));
        assert!(body.contains("curl https://ip.example.com/json"));
    }

    #[tokio::test]
    async fn unknown_paths_negotiate_instead_of_404ing() {
        let req = Request::builder()
            .uri("/nope")
            .header("CF-Connecting-IP", "1.2.3.4")
            .header("User-Agent", "HTTPie/3.2")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res.into_body()).await, "1.2.3.4\n");
    }

    #[tokio::test]
    async fn every_response_is_uncacheable() {
        for uri in ["/ip", "/user-agent", "/json", "/all", "/", "/nope"] {
            let res = app().oneshot(request(uri)).await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(
                header(&res, "cache-control"),
                Some("no-cache, no-store, must-revalidate")
            );
        }
    }

    #[tokio::test]
    async fn identical_requests_yield_identical_bytes() {
        let build = || {
            Request::builder()
                .uri("/json")
                .header("CF-Connecting-IP", "1.2.3.4")
                .header("User-Agent", "curl/8.0")
                .body(Body::empty())
                .unwrap()
        };
        let first = app().oneshot(build()).await.unwrap();
        let second = app().oneshot(build()).await.unwrap();
        assert_eq!(
            body_string(first.into_body()).await,
            body_string(second.into_body()).await
        );
    }

    #[tokio::test]
    async fn no_ip_headers_resolve_to_unknown() {
        let req = Request::builder().uri("/ip").body(Body::empty()).unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(body_string(res.into_body()).await, "Unknown\n");
    }
}
