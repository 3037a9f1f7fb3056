//! High-level search client: one method per remote operation.
//!
//! Each call builds the outbound parameter set, performs the authenticated
//! GET through the shared transport, classifies the HTTP outcome, and
//! decodes the `d.results` payload into typed models. Nothing is cached or
//! retried here; callers own those policies.

use std::borrow::Cow;

use lookout_config::LookoutConfig;
use lookout_http::{Auth, HttpClient, HttpResponse, RequestOpts};
use serde::Deserialize;
use serde_json::Value;

use crate::decode::{
    Model, decode_model, decode_results, envelope_results, expect_image, expect_news,
    expect_related_search, expect_spelling_suggestions, expect_video, expect_web,
};
use crate::error::{Result, SearchError};
use crate::models::{
    CompositeSearchResult, ImageResult, NewsResult, RelatedSearchResult, SpellingSuggestionsResult,
    VideoResult, WebResult,
};
use crate::options::{CommonOptions, CompositeOptions, ImageOptions, NewsOptions, VideoOptions, WebOptions};
use crate::params::{
    ParameterSet, common_params, composite_params, image_params, news_params, video_params,
    web_params,
};

/// Default service root.
pub const API_ROOT: &str = "https://api.datamarket.azure.com";

const FULL_PATH: &str = "Bing/Search/v1";
const WEB_ONLY_PATH: &str = "Bing/SearchWeb/v1";

/// Client for the search service. Cheap to clone; the underlying transport
/// reuses its connection pool across sequential calls.
#[derive(Clone)]
pub struct SearchClient {
    http: HttpClient,
    account_key: String,
    web_only: bool,
    default_market: Option<String>,
}

impl SearchClient {
    /// Client against the production endpoint.
    pub fn new(account_key: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(API_ROOT, account_key)
    }

    /// Client against an explicit service root (stubs, regional mirrors).
    pub fn with_endpoint(endpoint: &str, account_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(endpoint)?,
            account_key: account_key.into(),
            web_only: false,
            default_market: None,
        })
    }

    /// Wire a client from loaded configuration.
    pub fn from_config(config: &LookoutConfig) -> Result<Self> {
        let endpoint = config.endpoint.as_deref().unwrap_or(API_ROOT);
        let mut client = Self::with_endpoint(endpoint, config.account_key.clone())?;
        client.web_only = config.web_only;
        client.default_market = config.market.clone();
        if client.web_only {
            tracing::debug!("search.client.web_only");
        }
        Ok(client)
    }

    /// Switch to the cheaper web-only endpoint, which serves only the `Web`
    /// operation and rejects the rest.
    pub fn web_only(mut self, web_only: bool) -> Self {
        self.web_only = web_only;
        self
    }

    /// Market applied when a request does not set one.
    pub fn with_default_market(mut self, market: impl Into<String>) -> Self {
        self.default_market = Some(market.into());
        self
    }

    pub async fn web(&self, query: &str, options: &WebOptions) -> Result<Vec<WebResult>> {
        let payload = self.invoke("Web", web_params(query, options)).await?;
        decode_results(&payload, expect_web)
    }

    pub async fn image(&self, query: &str, options: &ImageOptions) -> Result<Vec<ImageResult>> {
        let payload = self.invoke("Image", image_params(query, options)).await?;
        decode_results(&payload, expect_image)
    }

    pub async fn video(&self, query: &str, options: &VideoOptions) -> Result<Vec<VideoResult>> {
        let payload = self.invoke("Video", video_params(query, options)).await?;
        decode_results(&payload, expect_video)
    }

    pub async fn news(&self, query: &str, options: &NewsOptions) -> Result<Vec<NewsResult>> {
        let payload = self.invoke("News", news_params(query, options)).await?;
        decode_results(&payload, expect_news)
    }

    pub async fn related_search(
        &self,
        query: &str,
        options: &CommonOptions,
    ) -> Result<Vec<RelatedSearchResult>> {
        let payload = self
            .invoke("RelatedSearch", common_params(query, options))
            .await?;
        decode_results(&payload, expect_related_search)
    }

    pub async fn spelling_suggestions(
        &self,
        query: &str,
        options: &CommonOptions,
    ) -> Result<Vec<SpellingSuggestionsResult>> {
        let payload = self
            .invoke("SpellingSuggestions", common_params(query, options))
            .await?;
        decode_results(&payload, expect_spelling_suggestions)
    }

    /// The composite operation returns a single aggregate per request.
    pub async fn composite(
        &self,
        query: &str,
        options: &CompositeOptions,
    ) -> Result<CompositeSearchResult> {
        let payload = self
            .invoke("Composite", composite_params(query, options))
            .await?;
        let value = match &payload {
            Value::Array(items) => items.first().cloned(),
            Value::Object(_) => Some(payload.clone()),
            _ => None,
        }
        .ok_or_else(|| SearchError::MalformedResponse("empty composite payload".into()))?;
        match decode_model(&value)? {
            Model::Composite(composite) => Ok(*composite),
            other => Err(SearchError::MalformedResponse(format!(
                "expected ExpandableSearchResult, found {}",
                other.kind()
            ))),
        }
    }

    fn operation_path(&self, operation: &str) -> String {
        let root = if self.web_only { WEB_ONLY_PATH } else { FULL_PATH };
        format!("{root}/{operation}")
    }

    async fn invoke(&self, operation: &'static str, mut params: ParameterSet) -> Result<Value> {
        if let Some(market) = &self.default_market
            && !params.contains("Market")
        {
            params.insert_quoted("Market", market.clone());
        }

        let query = params.to_query();
        tracing::debug!(operation, params = ?query, "search.request.start");

        let pairs: Vec<(&str, Cow<'_, str>)> = query
            .iter()
            .map(|(name, value)| (*name, Cow::from(value.as_str())))
            .collect();
        let resp = self
            .http
            .get_bytes(
                &self.operation_path(operation),
                RequestOpts {
                    // The account key doubles as Basic-auth username and password.
                    auth: Some(Auth::Basic {
                        username: &self.account_key,
                        password: &self.account_key,
                    }),
                    query: Some(pairs),
                    ..Default::default()
                },
            )
            .await?;

        if !resp.status.is_success() {
            let (code, message) = classify_error(&resp);
            tracing::warn!(operation, %code, "search.request.error");
            return Err(SearchError::Service { code, message });
        }

        let results = envelope_results(&resp.body)?;
        tracing::debug!(operation, "search.request.success");
        Ok(results)
    }
}

/// Pull a remote error code out of a failure response. OData error envelopes
/// are probed for their `error.code`; the HTTP status number stands in when
/// the body has none. The message is always the raw body, untouched, so the
/// caller keeps the full remote payload.
fn classify_error(resp: &HttpResponse) -> (String, String) {
    #[derive(Deserialize)]
    struct ODataEnvelope {
        error: ODataError,
    }
    #[derive(Deserialize)]
    struct ODataError {
        #[serde(default)]
        code: Option<String>,
    }

    let code = serde_json::from_slice::<ODataEnvelope>(&resp.body)
        .ok()
        .and_then(|envelope| envelope.error.code)
        .unwrap_or_else(|| resp.status.as_u16().to_string());
    (code, resp.body_text().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_http::StatusCode;

    fn failure(status: StatusCode, body: &[u8]) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_vec(),
        }
    }

    #[test]
    fn operation_path_honors_web_only_mode() {
        let client = SearchClient::new("key").unwrap();
        assert_eq!(client.operation_path("Web"), "Bing/Search/v1/Web");

        let client = client.web_only(true);
        assert_eq!(client.operation_path("Web"), "Bing/SearchWeb/v1/Web");
    }

    #[test]
    fn classify_prefers_remote_odata_code() {
        let body = br#"{"error":{"code":"InvalidQuery","message":{"lang":"en-US","value":"bad"}}}"#;
        let (code, _) = classify_error(&failure(StatusCode::BAD_REQUEST, body));
        assert_eq!(code, "InvalidQuery");
    }

    #[test]
    fn classify_surfaces_the_raw_body_even_when_the_envelope_parses() {
        let body = br#"{"error":{"code":"InvalidQuery","message":{"lang":"en-US","value":"bad"}}}"#;
        let (_, message) = classify_error(&failure(StatusCode::BAD_REQUEST, body));
        assert_eq!(message, String::from_utf8_lossy(body));
    }

    #[test]
    fn classify_falls_back_to_http_status_and_raw_body() {
        let body = b"The authorization type you provided is not supported.";
        let (code, message) = classify_error(&failure(StatusCode::UNAUTHORIZED, body));
        assert_eq!(code, "401");
        assert!(message.contains("authorization type"));
    }

    #[test]
    fn from_config_applies_endpoint_and_market() {
        let config = LookoutConfig {
            account_key: "abc".into(),
            web_only: true,
            endpoint: Some("https://stub.test".into()),
            market: Some("en-GB".into()),
        };
        let client = SearchClient::from_config(&config).unwrap();
        assert_eq!(client.operation_path("Web"), "Bing/SearchWeb/v1/Web");
        assert_eq!(client.default_market.as_deref(), Some("en-GB"));
    }
}
