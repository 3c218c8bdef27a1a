//! The interactive HTML page.
//!
//! The page is a static template with named slots. Values are escaped as
//! they are substituted, and the filled output is never rescanned, so a
//! hostile header value can neither inject markup nor smuggle a slot token
//! that would expand later. Copy payloads ride in `data-copy` attributes
//! read by a static script, keeping every interpolation in an HTML context.

use axum::http::{HeaderMap, header};

use crate::geo::EdgeGeo;
use crate::identity::{ClientIdentity, UNKNOWN_CLIENT};

/// Renders the page for a request.
///
/// Geo fields and the user agent fall back to `"Unknown"`, the host to the
/// empty string, mirroring the plain-text defaults elsewhere.
pub(crate) fn render(identity: &ClientIdentity, geo: &EdgeGeo, headers: &HeaderMap) -> String {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|hv| hv.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_CLIENT);
    let host = headers
        .get(header::HOST)
        .and_then(|hv| hv.to_str().ok())
        .unwrap_or("");

    fill(
        TEMPLATE,
        &[
            ("ip", &identity.0),
            ("country", geo.country.as_deref().unwrap_or(UNKNOWN_CLIENT)),
            ("city", geo.city.as_deref().unwrap_or(UNKNOWN_CLIENT)),
            ("timezone", geo.timezone.as_deref().unwrap_or(UNKNOWN_CLIENT)),
            ("user_agent", user_agent),
            ("host", host),
        ],
    )
}

/// Escapes a value for HTML body and attribute positions.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Substitutes `{{name}}` tokens in a single left-to-right pass, escaping
/// each value as it lands. Tokens without a matching slot pass through
/// unchanged.
fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        match slots.iter().find(|(name, _)| *name == &after[..end]) {
            Some((_, value)) => out.push_str(&escape(value)),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>What's my IP?</title>
  <style>
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      background: #0f172a;
      color: #e2e8f0;
      min-height: 100vh;
    }
    main { max-width: 960px; margin: 0 auto; padding: 40px 20px; }
    h1 { text-align: center; font-size: 2.2rem; margin-bottom: 40px; }
    section {
      background: rgba(30, 41, 59, 0.5);
      border: 1px solid rgba(148, 163, 184, 0.15);
      border-radius: 16px;
      padding: 30px;
      margin-bottom: 24px;
    }
    .ip-card { text-align: center; }
    .label {
      color: #94a3b8;
      font-size: 0.85rem;
      font-weight: 600;
      text-transform: uppercase;
      letter-spacing: 1px;
      margin-bottom: 8px;
    }
    .ip {
      font-size: 2.6rem;
      font-weight: 700;
      color: #a78bfa;
      word-break: break-all;
      margin-bottom: 16px;
    }
    .copy {
      background: #6366f1;
      color: white;
      border: none;
      padding: 10px 24px;
      border-radius: 10px;
      font-size: 1rem;
      cursor: pointer;
    }
    .copy:hover { background: #818cf8; }
    .facts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 20px;
    }
    .value { font-size: 1.1rem; word-break: break-word; }
    h2 { font-size: 1.3rem; margin-bottom: 16px; }
    ul { list-style: none; }
    .endpoint {
      font-family: 'SF Mono', Monaco, 'Courier New', monospace;
      background: rgba(15, 23, 42, 0.6);
      border: 1px solid rgba(148, 163, 184, 0.1);
      border-radius: 10px;
      padding: 12px 16px;
      margin-bottom: 10px;
      color: #a78bfa;
      cursor: pointer;
    }
    .endpoint:hover { border-color: #6366f1; }
    .endpoint::before { content: '$ '; color: #6366f1; }
    .toast {
      position: fixed;
      bottom: 30px;
      right: 30px;
      background: #059669;
      color: white;
      padding: 14px 22px;
      border-radius: 10px;
      font-weight: 600;
      opacity: 0;
      transform: translateY(100px);
      transition: all 0.3s ease;
    }
    .toast.show { opacity: 1; transform: translateY(0); }
  </style>
</head>
<body>
  <main>
    <h1>What's my IP?</h1>

    <section class="ip-card">
      <p class="label">Your IP address</p>
      <p class="ip">{{ip}}</p>
      <button class="copy" data-copy="{{ip}}">Copy IP address</button>
    </section>

    <section class="facts">
      <div>
        <p class="label">Country</p>
        <p class="value">{{country}}</p>
      </div>
      <div>
        <p class="label">City</p>
        <p class="value">{{city}}</p>
      </div>
      <div>
        <p class="label">Timezone</p>
        <p class="value">{{timezone}}</p>
      </div>
      <div>
        <p class="label">User agent</p>
        <p class="value">{{user_agent}}</p>
      </div>
    </section>

    <section>
      <h2>API endpoints</h2>
      <ul>
        <li class="endpoint" data-copy="curl https://{{host}}/">curl https://{{host}}/</li>
        <li class="endpoint" data-copy="curl https://{{host}}/json">curl https://{{host}}/json</li>
        <li class="endpoint" data-copy="curl https://{{host}}/ip">curl https://{{host}}/ip</li>
        <li class="endpoint" data-copy="curl https://{{host}}/user-agent">curl https://{{host}}/user-agent</li>
        <li class="endpoint" data-copy="curl https://{{host}}/all">curl https://{{host}}/all</li>
      </ul>
    </section>
  </main>

  <div class="toast" id="toast">Copied to clipboard!</div>

  <script>
    for (const el of document.querySelectorAll('[data-copy]')) {
      el.addEventListener('click', () => {
        navigator.clipboard.writeText(el.dataset.copy).then(() => {
          const toast = document.getElementById('toast');
          toast.classList.add('show');
          setTimeout(() => toast.classList.remove('show'), 2000);
        });
      });
    }
  </script>
</body>
</html>
"#;
