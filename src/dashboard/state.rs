//! ダッシュボード状態
//!
//! バッチ・キュレーション・統計の各ストアと、そこから毎回再計算する派生ビュー。

use chrono::NaiveDate;
use idea_curator_common::{
    aggregate_ideas, filter_ideas, grade_distribution, Batch, CurationStatus, CurationStore,
    DerivedIdea, FilterCriteria, HealthSnapshot, StatsSnapshot, UidStrategy,
};
use std::collections::BTreeMap;

/// 最後に取得したバッチ一覧（再取得のたびに丸ごと置き換え）
#[derive(Debug, Clone, Default)]
pub struct BatchStore {
    batches: Vec<Batch>,
}

impl BatchStore {
    pub fn replace(&mut self, batches: Vec<Batch>) {
        self.batches = batches;
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn idea_count(&self) -> usize {
        self.batches.iter().map(|b| b.ideas.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub batches: BatchStore,
    pub curation: CurationStore,
    pub stats: Option<StatsSnapshot>,
    pub health: Option<HealthSnapshot>,
    pub filters: FilterCriteria,
    /// GET /api/batches の date パラメータ
    pub date_filter: Option<NaiveDate>,
    pub uid_strategy: UidStrategy,
    /// 初回のバッチ取得が終わるまで true
    pub loading: bool,
    pub exporting: bool,
}

impl DashboardState {
    pub fn new(uid_strategy: UidStrategy) -> Self {
        Self {
            batches: BatchStore::default(),
            curation: CurationStore::new(),
            stats: None,
            health: None,
            filters: FilterCriteria::default(),
            date_filter: None,
            uid_strategy,
            loading: true,
            exporting: false,
        }
    }

    /// 平坦化・スコア順の全アイデア
    pub fn all_ideas(&self) -> Vec<DerivedIdea> {
        aggregate_ideas(self.batches.batches(), self.uid_strategy)
    }

    pub fn filtered_ideas(&self) -> Vec<DerivedIdea> {
        filter_ideas(&self.all_ideas(), &self.filters, &self.curation)
    }

    pub fn grade_distribution(&self) -> BTreeMap<String, usize> {
        grade_distribution(&self.all_ideas())
    }

    pub fn find_idea(&self, uid: &str) -> Option<DerivedIdea> {
        self.all_ideas().into_iter().find(|idea| idea.uid == uid)
    }

    /// サーバIDの無いアイデアは常に未キュレーション
    pub fn curation_of(&self, idea: &DerivedIdea) -> Option<CurationStatus> {
        idea.server_id().and_then(|id| self.curation.get(id))
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(UidStrategy::default())
    }
}
