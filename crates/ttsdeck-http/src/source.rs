//! Streaming artifact source for `http(s)` locators.

use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::debug;

use ttsdeck_core::{ArtifactSourcePort, ArtifactStream, DownloadError, Locator};

use crate::client::build_client;
use crate::config::HttpClientConfig;
use crate::error::{HttpError, HttpResult};
use crate::wire;

/// Re-acquires remote artifacts with a fresh `GET` per call.
#[derive(Debug, Clone)]
pub struct HttpArtifactSource {
    client: reqwest::Client,
}

impl HttpArtifactSource {
    pub fn new(config: &HttpClientConfig) -> HttpResult<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    async fn fetch(&self, locator: &Locator) -> HttpResult<ArtifactStream> {
        if !locator.is_http() {
            return Err(HttpError::UnsupportedLocator(locator.to_string()));
        }

        let response = self.client.get(locator.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(HttpError::Status {
                status: status.as_u16(),
                message: wire::error_message(status, &body),
            });
        }

        let content_length = response.content_length();
        debug!(%locator, ?content_length, "opened artifact stream");
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| DownloadError::read(e.to_string())))
            .boxed();
        Ok(ArtifactStream {
            content_length,
            chunks,
        })
    }
}

#[async_trait]
impl ArtifactSourcePort for HttpArtifactSource {
    async fn open(&self, locator: &Locator) -> Result<ArtifactStream, DownloadError> {
        Ok(self.fetch(locator).await?)
    }
}
