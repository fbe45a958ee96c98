//! Record sources: where a dashboard's collection comes from.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use lens_core::Record;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::http::{check_response, parse_records};

// ── Query ──────────────────────────────────────────────────────────

/// One "analyze" request: an endpoint plus its query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Endpoint path relative to the API base URL (e.g. `brands/analysis`).
    pub endpoint: String,
    /// Query parameters, in request order.
    #[serde(default)]
    pub params: Vec<(String, String)>,
}

impl Query {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// `{base}/{endpoint}?{params}` with parameters percent-encoded.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        );
        for (i, (key, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

// ── Traits ─────────────────────────────────────────────────────────

/// Anything that can answer a [`Query`] with a collection of records.
pub trait RecordSource {
    /// Fetch the collection for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport, status or decoding failures.
    fn fetch(&self, query: &Query) -> impl Future<Output = Result<Vec<Record>, FetchError>> + Send;
}

/// Supplies the bearer token attached to API requests.
///
/// Token storage and refresh live outside this crate; a provider only reads
/// whatever is current.
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A fixed token, typically from configuration.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        (!self.0.is_empty()).then(|| self.0.clone())
    }
}

/// Reads the token from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvToken {
    fn token(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|t| !t.is_empty())
    }
}

// ── HTTP ───────────────────────────────────────────────────────────

/// Settings for [`HttpSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl HttpOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(15),
            user_agent: format!("lens/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fetches records from the analytics API over HTTP.
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Box<dyn CredentialProvider>>,
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpSource {
    /// Build a client for `options.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotConfigured`] for an empty base URL and
    /// [`FetchError::Http`] if the client cannot be built.
    pub fn new(options: &HttpOptions) -> Result<Self, FetchError> {
        if options.base_url.trim().is_empty() {
            return Err(FetchError::NotConfigured("api.base_url is empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .user_agent(&options.user_agent)
            .timeout(options.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: options.base_url.clone(),
            credentials: None,
        })
    }

    #[must_use]
    pub fn with_credentials(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials = Some(Box::new(provider));
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RecordSource for HttpSource {
    async fn fetch(&self, query: &Query) -> Result<Vec<Record>, FetchError> {
        let url = query.url(&self.base_url);
        tracing::debug!(%url, "fetching records");

        let mut request = self.http.get(&url);
        if let Some(token) = self.credentials.as_ref().and_then(|c| c.token()) {
            request = request.bearer_auth(token);
        }
        let resp = check_response(request.send().await?).await?;
        let body = resp.text().await?;
        parse_records(&body)
    }
}

// ── File ───────────────────────────────────────────────────────────

/// Reads records from a local JSON file, ignoring the query.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for FileSource {
    async fn fetch(&self, _query: &Query) -> Result<Vec<Record>, FetchError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_records(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn query_url_encodes_params() {
        let query = Query::new("/brands/analysis")
            .param("brand", "Head&Shoulders")
            .param("date_from", "2024-01-01");
        assert_eq!(
            query.url("https://api.example.com/v1/"),
            "https://api.example.com/v1/brands/analysis?brand=Head%26Shoulders&date_from=2024-01-01"
        );
        assert_eq!(Query::new("sellers").url("http://h"), "http://h/sellers");
    }

    #[test]
    fn empty_base_url_is_not_configured() {
        let err = HttpSource::new(&HttpOptions::new("  ")).unwrap_err();
        assert!(matches!(err, FetchError::NotConfigured(_)));
    }

    #[test]
    fn http_source_builds() {
        let source = HttpSource::new(&HttpOptions::new("http://localhost:9"))
            .unwrap()
            .with_credentials(StaticToken("t".to_string()));
        assert_eq!(source.base_url(), "http://localhost:9");
        assert!(format!("{source:?}").contains("credentials: true"));
    }

    #[test]
    fn empty_static_token_is_absent() {
        assert_eq!(StaticToken(String::new()).token(), None);
        let token = StaticToken("abc".to_string()).token();
        assert_eq!(token.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn file_source_reads_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = r#"{"data": [{"brand": "Nivea"}, {"brand": "Dove"}]}"#;
        file.write_all(body.as_bytes()).unwrap();

        let records = FileSource::new(file.path()).fetch(&Query::default()).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = FileSource::new("/nonexistent/lens.json")
            .fetch(&Query::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }
}
