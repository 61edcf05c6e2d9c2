//! テスト用のバックエンド・通知・出力先

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use idea_curator::backend::DashboardBackend;
use idea_curator::dashboard::Dashboard;
use idea_curator::error::{CuratorError, Result};
use idea_curator::export::ClipboardSink;
use idea_curator::notify::{Confirmer, NoticeLevel, Notifier};
use idea_curator_common::{
    Batch, CurationStatus, FeedbackRequest, HealthSnapshot, Idea, MarkdownExport, StatsSnapshot,
    UidStrategy,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn server_error(path: &str) -> CuratorError {
    CuratorError::HttpStatus {
        status: 500,
        url: format!("http://mock{}", path),
    }
}

/// メモリ上のバックエンド
#[derive(Default)]
pub struct MockBackend {
    pub batches: Mutex<Vec<Batch>>,
    pub export: Mutex<MarkdownExport>,
    pub batch_delay: Mutex<Option<Duration>>,

    pub fail_batches: AtomicBool,
    pub fail_stats: AtomicBool,
    pub fail_curation: AtomicBool,
    pub fail_reset: AtomicBool,
    pub fail_export: AtomicBool,
    pub fail_feedback: AtomicBool,

    /// 受け付けたリクエスト（"GET /api/batches" など）
    pub calls: Mutex<Vec<String>>,
    pub dates: Mutex<Vec<Option<NaiveDate>>>,
    pub feedback: Mutex<Vec<FeedbackRequest>>,
}

impl MockBackend {
    pub fn with_batches(batches: Vec<Batch>) -> Self {
        let backend = Self::default();
        *backend.batches.lock().unwrap() = batches;
        backend
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DashboardBackend for MockBackend {
    async fn fetch_batches(&self, date: Option<NaiveDate>) -> Result<Vec<Batch>> {
        self.record("GET /api/batches".into());
        self.dates.lock().unwrap().push(date);

        let delay = *self.batch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_batches.load(Ordering::SeqCst) {
            return Err(server_error("/api/batches"));
        }
        Ok(self.batches.lock().unwrap().clone())
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot> {
        self.record("GET /api/curation/stats".into());
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(server_error("/api/curation/stats"));
        }
        let total: usize = self.batches.lock().unwrap().iter().map(|b| b.ideas.len()).sum();
        Ok(StatsSnapshot(json!({ "total_ideas": total })))
    }

    async fn set_curation(&self, idea_id: &str, next: Option<CurationStatus>) -> Result<()> {
        self.record(format!(
            "POST /api/curation/{} {}",
            idea_id,
            CurationStatus::wire_value(next)
        ));
        if self.fail_curation.load(Ordering::SeqCst) {
            return Err(server_error("/api/curation"));
        }
        Ok(())
    }

    async fn reset_curation(&self) -> Result<()> {
        self.record("DELETE /api/curation".into());
        if self.fail_reset.load(Ordering::SeqCst) {
            return Err(server_error("/api/curation"));
        }
        Ok(())
    }

    async fn export_published_md(&self) -> Result<MarkdownExport> {
        self.record("GET /api/curation/export/md".into());
        if self.fail_export.load(Ordering::SeqCst) {
            return Err(server_error("/api/curation/export/md"));
        }
        Ok(self.export.lock().unwrap().clone())
    }

    async fn send_feedback(&self, request: &FeedbackRequest) -> Result<()> {
        self.record("POST /api/feedback".into());
        if self.fail_feedback.load(Ordering::SeqCst) {
            return Err(server_error("/api/feedback"));
        }
        self.feedback.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn fetch_health(&self) -> Result<HealthSnapshot> {
        self.record("GET /api/health".into());
        Ok(HealthSnapshot {
            status: "ok".into(),
            last_batch_id: Some("b1".into()),
            last_run_at: None,
            uptime_sec: 12.0,
        })
    }
}

/// 通知を記録する
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NoticeLevel::Success)
    }

    pub fn failures(&self) -> Vec<String> {
        self.messages(NoticeLevel::Error)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().unwrap().push((level, message.to_string()));
    }
}

/// 最初の通知でパニックする（標準エラーが閉じている場合など）
#[derive(Default)]
pub struct PanicOnceNotifier {
    pub panicked: AtomicBool,
}

impl Notifier for PanicOnceNotifier {
    fn notify(&self, _level: NoticeLevel, message: &str) {
        if !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("notifier unavailable: {}", message);
        }
    }
}

/// 書き込まれたテキストを記録する
#[derive(Default)]
pub struct RecordingSink {
    pub texts: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl ClipboardSink for RecordingSink {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CuratorError::Clipboard("denied".into()));
        }
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// 固定の回答を返す確認
pub struct Answer {
    pub yes: bool,
    pub asked: AtomicUsize,
}

impl Answer {
    pub fn new(yes: bool) -> Self {
        Self { yes, asked: AtomicUsize::new(0) }
    }
}

impl Confirmer for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.yes
    }
}

pub fn idea(id: &str, grade: &str, score: f64) -> Idea {
    Idea {
        id: Some(id.to_string()),
        service_name: format!("Service {}", id),
        grade: Some(grade.to_string()),
        weighted_score: Some(score),
        ..Default::default()
    }
}

pub fn batch(id: &str, ideas: Vec<Idea>) -> Batch {
    Batch {
        batch_id: id.to_string(),
        timestamp: "2026-10-17T09:00:00+09:00".to_string(),
        ideas,
    }
}

pub fn dashboard(backend: &Arc<MockBackend>, notifier: &Arc<RecordingNotifier>) -> Dashboard {
    Dashboard::new(backend.clone(), notifier.clone(), UidStrategy::Positional)
}

/// 生成済みタスクを走らせる
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
