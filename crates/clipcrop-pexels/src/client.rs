//! Pexels HTTP client.

use std::path::Path;

use futures::StreamExt;
use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use crate::config::PexelsConfig;
use crate::error::{PexelsError, PexelsResult};
use crate::types::{ClipSource, SearchResponse};

/// Client for the Pexels video API.
pub struct PexelsClient {
    http: Client,
    config: PexelsConfig,
    api_base: Url,
    download_base: Url,
}

impl PexelsClient {
    /// Create a new client.
    pub fn new(config: PexelsConfig) -> PexelsResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(PexelsError::Network)?;

        let api_base = parse_base(&config.api_url)?;
        let download_base = parse_base(&config.download_url)?;

        Ok(Self {
            http,
            config,
            api_base,
            download_base,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> PexelsResult<Self> {
        Self::new(PexelsConfig::from_env()?)
    }

    pub fn config(&self) -> &PexelsConfig {
        &self.config
    }

    /// Run a video search.
    pub async fn search_videos(&self, query: &str, per_page: u32) -> PexelsResult<SearchResponse> {
        let url = self.api_base.join("videos/search")?;
        debug!(%url, query, per_page, "Searching videos");

        let per_page = per_page.to_string();
        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, &self.config.api_key)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await?;

        let body = ensure_success(response).await?.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        info!(
            query,
            results = parsed.videos.len(),
            total = ?parsed.total_results,
            "Video search complete"
        );
        Ok(parsed)
    }

    /// Search with the configured query and resolve each hit to a download.
    pub async fn search(&self) -> PexelsResult<Vec<ClipSource>> {
        let response = self
            .search_videos(&self.config.query, self.config.per_page)
            .await?;

        response
            .videos
            .iter()
            .map(|video| {
                Ok(ClipSource {
                    id: video.id,
                    download_url: self.download_url_for(video.id)?,
                })
            })
            .collect()
    }

    /// Download endpoint for a clip id.
    pub fn download_url_for(&self, id: u64) -> PexelsResult<Url> {
        Ok(self.download_base.join(&format!("video/{}/download", id))?)
    }

    /// Stream the body of `url` into `dest`, returning the byte count.
    ///
    /// No credentials are sent; the endpoint redirects to a public CDN.
    pub async fn download(&self, url: &Url, dest: &Path) -> PexelsResult<u64> {
        debug!(%url, dest = %dest.display(), "Downloading clip");

        let response = self.http.get(url.clone()).send().await?;
        let response = ensure_success(response).await?;

        let mut file = File::create(dest)
            .await
            .map_err(|e| PexelsError::io(dest, e))?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| PexelsError::io(dest, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| PexelsError::io(dest, e))?;

        info!(%url, bytes = written, "Download complete");
        Ok(written)
    }
}

/// Parse a base URL so relative joins append instead of replacing the
/// last path segment.
fn parse_base(raw: &str) -> PexelsResult<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{}/", raw))?)
    }
}

async fn ensure_success(response: Response) -> PexelsResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(PexelsError::RequestFailed {
        url,
        status: status.as_u16(),
        body,
    })
}
