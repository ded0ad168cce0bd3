use reqwest::{header, Client as HttpClient};

use crate::{
    error::{AppError, AppResult},
    models::Catalog,
    services::sources::{parse_csv, CatalogSource},
};

/// Catalog fetched as CSV over HTTP
#[derive(Debug, Clone)]
pub struct RemoteSource {
    http_client: HttpClient,
    url: String,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), url)
    }

    pub fn with_client(http_client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for RemoteSource {
    async fn load(&self) -> AppResult<Catalog> {
        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SourceFetch(format!(
                "{} returned status {}: {}",
                self.url, status, body
            )));
        }

        let bytes = response.bytes().await?;
        let catalog = parse_csv(&bytes, &self.url)?;

        tracing::info!(
            url = %self.url,
            bytes = bytes.len(),
            rows = catalog.len(),
            "Catalog fetched from remote source"
        );

        Ok(catalog)
    }

    /// `ETag` or `Last-Modified` from a HEAD request, when the server sends one
    async fn fingerprint(&self) -> AppResult<Option<String>> {
        let response = self.http_client.head(&self.url).send().await?;

        if !response.status().is_success() {
            tracing::debug!(
                url = %self.url,
                status = %response.status(),
                "HEAD request rejected, source version unknown"
            );
            return Ok(None);
        }

        let headers = response.headers();
        let version = headers
            .get(header::ETAG)
            .or_else(|| headers.get(header::LAST_MODIFIED))
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(version)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
