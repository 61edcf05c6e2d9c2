//! バックエンド境界
//!
//! ダッシュボードエンジンが依存するリクエスト/レスポンス契約。
//! 通信方式は実装側（HttpBackend など）の責務。

mod http;

pub use http::HttpBackend;

use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use idea_curator_common::{
    Batch, CurationStatus, FeedbackRequest, HealthSnapshot, MarkdownExport, StatsSnapshot,
};

#[async_trait]
pub trait DashboardBackend: Send + Sync {
    /// GET /api/batches[?date=YYYY-MM-DD]
    async fn fetch_batches(&self, date: Option<NaiveDate>) -> Result<Vec<Batch>>;

    /// GET /api/curation/stats
    async fn fetch_stats(&self) -> Result<StatsSnapshot>;

    /// POST /api/curation/{id}（None は "none" として送る）
    async fn set_curation(&self, idea_id: &str, next: Option<CurationStatus>) -> Result<()>;

    /// DELETE /api/curation
    async fn reset_curation(&self) -> Result<()>;

    /// GET /api/curation/export/md
    async fn export_published_md(&self) -> Result<MarkdownExport>;

    /// POST /api/feedback
    async fn send_feedback(&self, request: &FeedbackRequest) -> Result<()>;

    /// GET /api/health
    async fn fetch_health(&self) -> Result<HealthSnapshot>;
}
