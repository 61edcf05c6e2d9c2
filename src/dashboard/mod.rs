//! ダッシュボードエンジン
//!
//! 状態を所有し、バックエンドとの同期とキュレーションのトグル手順を担う。
//!
//! - 取得失敗はここで捕捉してログと通知に変換し、呼び出し元へは伝播しない
//! - キュレーション状態はバックエンドの確認後にだけ書き込む
//! - ロックはネットワーク待ちの間は保持しない

mod state;

pub use state::{BatchStore, DashboardState};

use crate::backend::DashboardBackend;
use crate::export::{ClipboardSink, ExportService};
use crate::feedback::FeedbackDispatcher;
use crate::notify::{Confirmer, Notifier};
use chrono::NaiveDate;
use idea_curator_common::{
    CurationStatus, DerivedIdea, FilterCriteria, HealthSnapshot, StatsSnapshot, UidStrategy,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

const RESET_PROMPT: &str = "全てのキュレーション状態を初期化しますか？この操作は取り消せません";

/// set_curation の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurationOutcome {
    /// サーバIDが無いため何もしなかった
    Ignored,
    /// バックエンドが確認した遷移先（None は解除）
    Applied(Option<CurationStatus>),
    Failed,
}

/// reset_curation の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Declined,
    Cleared,
    Failed,
}

/// fetch_all の結果（それぞれ独立に失敗しうる）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub batches_ok: bool,
    pub stats_ok: bool,
}

/// 共有可能なダッシュボードハンドル
#[derive(Clone)]
pub struct Dashboard {
    backend: Arc<dyn DashboardBackend>,
    notifier: Arc<dyn Notifier>,
    state: Arc<RwLock<DashboardState>>,
    /// 初回のバッチ取得完了（成否を問わない）で true
    loaded: Arc<watch::Sender<bool>>,
}

impl Dashboard {
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        notifier: Arc<dyn Notifier>,
        uid_strategy: UidStrategy,
    ) -> Self {
        Self {
            backend,
            notifier,
            state: Arc::new(RwLock::new(DashboardState::new(uid_strategy))),
            loaded: Arc::new(watch::channel(false).0),
        }
    }

    // ---- 読み取り ----

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub async fn ideas(&self) -> Vec<DerivedIdea> {
        self.state.read().await.all_ideas()
    }

    pub async fn filtered_ideas(&self) -> Vec<DerivedIdea> {
        self.state.read().await.filtered_ideas()
    }

    pub async fn grade_distribution(&self) -> BTreeMap<String, usize> {
        self.state.read().await.grade_distribution()
    }

    pub async fn find_idea(&self, uid: &str) -> Option<DerivedIdea> {
        self.state.read().await.find_idea(uid)
    }

    pub async fn get_curation(&self, idea: &DerivedIdea) -> Option<CurationStatus> {
        self.state.read().await.curation_of(idea)
    }

    pub async fn stats(&self) -> Option<StatsSnapshot> {
        self.state.read().await.stats.clone()
    }

    pub async fn health(&self) -> Option<HealthSnapshot> {
        self.state.read().await.health.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// 初回のバッチ取得が終わるまで待つ
    pub async fn wait_loaded(&self) {
        let mut rx = self.loaded.subscribe();
        // 送信側は self が保持しているため閉じない
        let _ = rx.wait_for(|loaded| *loaded).await;
    }

    // ---- フィルタ ----

    pub async fn set_filters(&self, filters: FilterCriteria) {
        self.state.write().await.filters = filters;
    }

    pub async fn update_filters(&self, update: impl FnOnce(&mut FilterCriteria)) {
        update(&mut self.state.write().await.filters);
    }

    /// 次回のバッチ取得から有効
    pub async fn set_date_filter(&self, date: Option<NaiveDate>) {
        self.state.write().await.date_filter = date;
    }

    // ---- 取得 ----

    /// バッチを再取得してストアを置き換える
    pub async fn fetch_batches(&self) -> bool {
        let date = self.state.read().await.date_filter;
        let result = self.backend.fetch_batches(date).await;

        let mut state = self.state.write().await;
        state.loading = false;
        self.loaded.send_replace(true);
        match result {
            Ok(batches) => {
                debug!(batches = batches.len(), "batches fetched");
                state.batches.replace(batches);
                true
            }
            Err(e) => {
                drop(state);
                error!("バッチ取得に失敗: {}", e);
                self.notifier.failure("バッチの取得に失敗しました");
                false
            }
        }
    }

    pub async fn fetch_stats(&self) -> bool {
        match self.backend.fetch_stats().await {
            Ok(stats) => {
                self.state.write().await.stats = Some(stats);
                true
            }
            Err(e) => {
                error!("統計取得に失敗: {}", e);
                self.notifier.failure("統計の取得に失敗しました");
                false
            }
        }
    }

    pub async fn fetch_health(&self) -> bool {
        match self.backend.fetch_health().await {
            Ok(health) => {
                self.state.write().await.health = Some(health);
                true
            }
            Err(e) => {
                error!("ヘルス取得に失敗: {}", e);
                self.notifier.failure("ヘルス情報の取得に失敗しました");
                false
            }
        }
    }

    /// バッチと統計を並行して取得
    pub async fn fetch_all(&self) -> RefreshReport {
        let (batches_ok, stats_ok) = tokio::join!(self.fetch_batches(), self.fetch_stats());
        RefreshReport { batches_ok, stats_ok }
    }

    /// 統計の再取得をバックグラウンドで開始（完了は待たない）
    pub fn spawn_stats_refresh(&self) -> JoinHandle<bool> {
        let dashboard = self.clone();
        tokio::spawn(async move { dashboard.fetch_stats().await })
    }

    // ---- キュレーション ----

    /// 同じ状態を2回指定すると未キュレーションに戻る
    pub async fn set_curation(&self, idea: &DerivedIdea, status: CurationStatus) -> CurationOutcome {
        let Some(idea_id) = idea.server_id() else {
            debug!(uid = %idea.uid, "idea has no server id; curation ignored");
            return CurationOutcome::Ignored;
        };

        let next = self.state.read().await.curation.next_status(idea_id, status);

        if let Err(e) = self.backend.set_curation(idea_id, next).await {
            error!("キュレーション更新に失敗 ({}): {}", idea_id, e);
            self.notifier.failure("キュレーション状態の更新に失敗しました");
            return CurationOutcome::Failed;
        }

        self.state.write().await.curation.apply(idea_id, next);
        info!(idea_id, status = CurationStatus::wire_value(next), "curation updated");
        self.spawn_stats_refresh();
        CurationOutcome::Applied(next)
    }

    /// 確認のうえ全キュレーション状態を初期化
    pub async fn reset_curation(&self, confirmer: &dyn Confirmer) -> ResetOutcome {
        if !confirmer.confirm(RESET_PROMPT) {
            return ResetOutcome::Declined;
        }

        if let Err(e) = self.backend.reset_curation().await {
            error!("キュレーション初期化に失敗: {}", e);
            self.notifier.failure("キュレーション状態の初期化に失敗しました");
            return ResetOutcome::Failed;
        }

        let cleared = {
            let mut state = self.state.write().await;
            let cleared = state.curation.len();
            state.curation.clear();
            cleared
        };
        info!(cleared, "curation state reset");
        self.notifier.success("キュレーション状態を初期化しました");
        self.fetch_stats().await;
        ResetOutcome::Cleared
    }

    // ---- 単発の操作 ----

    pub fn exporter(&self, sink: Arc<dyn ClipboardSink>) -> ExportService {
        ExportService::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.notifier),
            sink,
            Arc::clone(&self.state),
        )
    }

    pub fn feedback(&self) -> FeedbackDispatcher {
        FeedbackDispatcher::new(Arc::clone(&self.backend), Arc::clone(&self.notifier))
    }
}
