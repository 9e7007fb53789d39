//! Public configuration for the HTTP adapters.

use std::time::Duration;

use url::Url;

use crate::error::HttpResult;

/// Configuration for [`HttpSpeechClient`](crate::HttpSpeechClient) and
/// [`HttpArtifactSource`](crate::HttpArtifactSource).
///
/// Only the connection phase is bounded. A synthesis request runs until it
/// completes or its cancellation token is signalled.
///
/// # Example
///
/// ```
/// use ttsdeck_http::HttpClientConfig;
/// use std::time::Duration;
///
/// let config = HttpClientConfig::new()
///     .with_base_url("http://tts.internal:8080")
///     .with_connect_timeout(Duration::from_secs(3))
///     .with_api_key("secret");
/// ```
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the speech backend
    pub(crate) base_url: String,
    /// Path of the synthesis endpoint, relative to `base_url`
    pub(crate) synthesize_path: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Connection timeout
    pub(crate) connect_timeout: Duration,
    /// Raw `Cookie` header value carrying the backend session
    pub(crate) session_cookie: Option<String>,
    /// Bearer token sent in `Authorization`
    pub(crate) api_key: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            synthesize_path: "/api/tts".to_string(),
            user_agent: concat!("ttsdeck/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
            session_cookie: None,
            api_key: None,
        }
    }
}

impl HttpClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the speech backend.
    ///
    /// Defaults to `http://127.0.0.1:5000`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the path of the synthesis endpoint.
    ///
    /// Defaults to `/api/tts`.
    #[must_use]
    pub fn with_synthesize_path(mut self, path: impl Into<String>) -> Self {
        self.synthesize_path = path.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the connection timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Send `cookie` verbatim as the `Cookie` header (e.g. `session=abc`).
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Set an optional session cookie.
    #[must_use]
    pub fn with_optional_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie;
        self
    }

    /// Send `key` as a bearer token.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional bearer token.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of the synthesis endpoint.
    pub fn synthesize_url(&self) -> HttpResult<Url> {
        let base = Url::parse(&self.base_url)?;
        Ok(base.join(&self.synthesize_path)?)
    }
}
