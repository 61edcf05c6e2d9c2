use super::DashboardBackend;
use crate::error::{CuratorError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use idea_curator_common::{
    Batch, CurationRequest, CurationStatus, FeedbackRequest, HealthSnapshot, MarkdownExport,
    StatsSnapshot,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("idea-curator/", env!("CARGO_PKG_VERSION"));

/// reqwest によるバックエンド実装
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 2xx 以外は失敗
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        let start = std::time::Instant::now();
        let response = request.send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), elapsed_ms = start.elapsed().as_millis() as u64, "backend response");

        if !status.is_success() {
            return Err(CuratorError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self.send(self.client.get(&url), &url).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn fetch_batches(&self, date: Option<NaiveDate>) -> Result<Vec<Batch>> {
        let url = self.url("/api/batches");
        let mut request = self.client.get(&url);
        if let Some(date) = date {
            request = request.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }
        let response = self.send(request, &url).await?;
        decode(response).await
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot> {
        self.get_json("/api/curation/stats").await
    }

    async fn set_curation(&self, idea_id: &str, next: Option<CurationStatus>) -> Result<()> {
        let url = self.url(&format!("/api/curation/{}", urlencoding::encode(idea_id)));
        let body = CurationRequest::from(next);
        self.send(self.client.post(&url).json(&body), &url).await?;
        Ok(())
    }

    async fn reset_curation(&self) -> Result<()> {
        let url = self.url("/api/curation");
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }

    async fn export_published_md(&self) -> Result<MarkdownExport> {
        self.get_json("/api/curation/export/md").await
    }

    async fn send_feedback(&self, request: &FeedbackRequest) -> Result<()> {
        let url = self.url("/api/feedback");
        self.send(self.client.post(&url).json(request), &url).await?;
        Ok(())
    }

    async fn fetch_health(&self) -> Result<HealthSnapshot> {
        self.get_json("/api/health").await
    }
}
