//! Minimal HTTP transport with safe logging and flexible auth.
//!
//! - Request options: headers, `Auth`, query params, timeout
//! - Redacts sensitive query params and never logs secret values
//! - Optional *raw* request/response logging via `LOOKOUT_HTTP_RAW=1`
//!
//! The transport deliberately does not interpret response bodies or retry:
//! callers receive the status code and raw bytes and decide what they mean.
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), lookout_http::HttpError> {
//! let client = lookout_http::HttpClient::new("https://api.example.com")?;
//! let got = client
//!     .get_bytes("v1/items", lookout_http::RequestOpts::default())
//!     .await?;
//! assert!(got.status.is_success());
//! # Ok(()) }
//! ```
//!
//! Security: `Auth::Basic` credentials are validated before use, and logs
//! only ever include the auth kind (basic/header/none), not the secret.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
pub use reqwest::StatusCode;
use std::borrow::Cow;
use std::env;
use std::time::Duration;
use thiserror::Error;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "LOOKOUT_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in headers.iter() {
        let mut v = val.to_str().unwrap_or("").to_string();
        if name.as_str().eq_ignore_ascii_case("authorization") {
            v = "<redacted>".into();
        }
        parts.push(format!(
            "-H '{}: {}'",
            name.as_str(),
            v.replace('\'', r"'\''")
        ));
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let mut val = v.to_str().unwrap_or("").to_string();
            if key.eq_ignore_ascii_case("authorization") {
                val = "<redacted>".into();
            }
            (key, val)
        })
        .collect()
}

fn is_secret_param(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "access_token"
            | "authorization"
            | "auth"
            | "key"
            | "account_key"
            | "api_key"
            | "token"
            | "secret"
            | "client_secret"
            | "bearer"
    )
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
}

// ==============================
// Auth & Request Options
// ==============================

/// Authentication strategies supported by the transport.
///
/// ```
/// use lookout_http::Auth;
///
/// let basic = Auth::Basic { username: "key", password: "key" };
/// match basic {
///     Auth::Basic { username, .. } => assert_eq!(username, "key"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// HTTP Basic auth (`Authorization: Basic ...`).
    Basic { username: &'a str, password: &'a str },
    /// Custom header auth.
    Header {
        name: HeaderName,
        value: HeaderValue,
    },
    None,
}

/// Per-request tuning knobs.
///
/// ```
/// use lookout_http::{Auth, RequestOpts};
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     auth: Some(Auth::Basic { username: "k", password: "k" }),
///     ..Default::default()
/// };
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>, // e.g. [("Query", "'term'".into())]
}

/// Outcome of a performed GET: status plus raw body bytes.
///
/// Status classification is the caller's job; non-2xx responses still
/// produce an `Ok(HttpResponse)`.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use lookout_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    ///
    /// ```no_run
    /// use lookout_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Perform a GET and hand back status + body bytes.
    ///
    /// Network-level failures (DNS, connect, timeout, truncated body) map to
    /// [`HttpError::Network`]; everything that produced a status code is an
    /// `Ok` outcome regardless of the status class.
    pub async fn get_bytes(
        &self,
        path: &str,
        opts: RequestOpts<'_>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;

        // ----- Build request -----
        let mut rb = self.inner.request(Method::GET, url.clone());

        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        rb = rb.timeout(timeout);

        if let Some(q) = &opts.query {
            let pairs: Vec<(&str, &str)> = q.iter().map(|(k, v)| (*k, v.as_ref())).collect();
            rb = rb.query(&pairs);
        }

        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        if let Some(auth) = &opts.auth {
            match auth {
                Auth::Basic { username, password } => {
                    let username = sanitize_credential(username)?;
                    let password = sanitize_credential(password)?;
                    rb = rb.basic_auth(username, Some(password));
                }
                Auth::Header { name, value } => {
                    rb = rb.header(name.clone(), value.clone());
                }
                Auth::None => {}
            }
        }

        // ----- Safe request logging (pre-send) -----
        let auth_kind = match &opts.auth {
            Some(Auth::Basic { .. }) => "basic",
            Some(Auth::Header { .. }) => "header",
            Some(Auth::None) | None => "none",
        };

        let redacted_q: Vec<(String, String)> = opts
            .query
            .as_ref()
            .map(|q| {
                q.iter()
                    .map(|(k, v)| {
                        (
                            (*k).to_string(),
                            if is_secret_param(k) {
                                "<redacted>".to_string()
                            } else {
                                v.as_ref().to_string()
                            },
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!(
            host_path=%format!("{}{}", url.domain().unwrap_or("-"), url.path()),
            query=?redacted_q,
            timeout_ms=timeout.as_millis() as u64,
            auth_kind,
            "http.request.start"
        );

        if raw_enabled() {
            let merged = opts.headers.clone().unwrap_or_default();
            let curl = make_curl(&Method::GET, &url, &merged);
            tracing::debug!(target: "http.raw", %curl, "request");
        }

        // ----- Send -----
        let t0 = std::time::Instant::now();
        let resp = rb
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let mut body_snip = bytes.to_vec();
            let truncated = body_snip.len() > RAW_MAX_BODY;
            if truncated {
                body_snip.truncate(RAW_MAX_BODY);
            }
            let text = String::from_utf8_lossy(&body_snip);
            tracing::info!(
                target:"http.raw",
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated,
                "response"
            );
        }

        tracing::trace!(
            body_snippet=%snip_body(&bytes),
            "http.response.body_snippet"
        );

        Ok(HttpResponse {
            status,
            body: bytes.to_vec(),
        })
    }
}

// ==============================
// Helpers
// ==============================

pub fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        snip.truncate(500);
        snip.push_str("...");
    }
    snip
}

fn sanitize_credential(raw: &str) -> Result<String, HttpError> {
    // 1) Trim outer spaces/quotes
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();

    // 2) Remove *all* ASCII whitespace (spaces, tabs, newlines, carriage returns)
    s.retain(|ch| !ch.is_ascii_whitespace());

    // 3) Ensure ASCII and no control chars
    if !s.is_ascii() {
        return Err(HttpError::Build("credential contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "credential contains control characters".into(),
        ));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_wrapping_and_whitespace() {
        assert_eq!(sanitize_credential("  'abc123' ").unwrap(), "abc123");
        assert_eq!(sanitize_credential("ab c\n123").unwrap(), "abc123");
        assert!(sanitize_credential("k\u{e9}y").is_err());
    }

    #[test]
    fn secret_query_params_are_flagged() {
        assert!(is_secret_param("Account_Key"));
        assert!(is_secret_param("api_key"));
        assert!(!is_secret_param("Query"));
        assert!(!is_secret_param("$top"));
    }

    #[test]
    fn snip_caps_long_bodies() {
        let body = vec![b'x'; 2000];
        let snip = snip_body(&body);
        assert_eq!(snip.len(), 503);
        assert!(snip.ends_with("..."));
    }

    #[test]
    fn curl_redacts_authorization() {
        let url = Url::parse("https://api.example.com/v1/Web").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_static("Basic aaaa"),
        );
        let curl = make_curl(&Method::GET, &url, &headers);
        assert!(curl.contains("<redacted>"));
        assert!(!curl.contains("aaaa"));
    }
}
