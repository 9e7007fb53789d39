//! reqwest client construction and the speech API adapter.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use ttsdeck_core::{Artifact, CancellationToken, SpeechApiError, SpeechApiPort, SynthesisRequest};

use crate::config::HttpClientConfig;
use crate::error::{HttpError, HttpResult};
use crate::wire;

/// Build a reqwest client carrying the configured credentials.
pub(crate) fn build_client(config: &HttpClientConfig) -> HttpResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = &config.session_cookie {
        let value =
            HeaderValue::from_str(cookie).map_err(|_| HttpError::InvalidHeader { name: "Cookie" })?;
        headers.insert(COOKIE, value);
    }
    if let Some(key) = &config.api_key {
        let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| HttpError::InvalidHeader {
                name: "Authorization",
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(config.connect_timeout)
        .default_headers(headers)
        .build()?)
}

/// Speech API adapter for the `/api/tts` backend.
#[derive(Debug, Clone)]
pub struct HttpSpeechClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSpeechClient {
    /// Create a client from `config`.
    pub fn new(config: &HttpClientConfig) -> HttpResult<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.synthesize_url()?,
        })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn exchange(
        &self,
        request: &SynthesisRequest,
        cancel: &CancellationToken,
    ) -> Result<Artifact, SpeechApiError> {
        let send = self.client.post(self.endpoint.clone()).json(request).send();
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(SpeechApiError::Cancelled),
            result = send => result.map_err(HttpError::from)?,
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(SpeechApiError::Cancelled),
            result = response.bytes() => result,
        };

        if !status.is_success() {
            // A status arrived; an unreadable error body still means a server error
            let body = body.unwrap_or_default();
            let message = wire::error_message(status, &body);
            debug!(status = status.as_u16(), %message, "speech backend rejected request");
            return Err(HttpError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body = body.map_err(HttpError::from)?;
        debug!(
            bytes = body.len(),
            content_type = content_type.as_deref().unwrap_or("-"),
            "received synthesized audio"
        );
        let artifact = Artifact::new(body);
        Ok(match content_type {
            Some(ct) => artifact.with_content_type(ct),
            None => artifact,
        })
    }
}

#[async_trait]
impl SpeechApiPort for HttpSpeechClient {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        cancel: &CancellationToken,
    ) -> Result<Artifact, SpeechApiError> {
        debug!(
            provider = request.provider().wire_id(),
            voice = request.voice(),
            chars = request.text().chars().count(),
            url = %self.endpoint,
            "posting synthesis request"
        );
        self.exchange(request, cancel).await
    }
}
