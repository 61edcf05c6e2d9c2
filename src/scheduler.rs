//! 定期更新スケジューラ
//!
//! 起動時に即座にバッチ+統計を取得し、以後は一定間隔で繰り返す。
//! 停止するとタイマーは止まるが、実行中の取得は最後まで走る。

use crate::dashboard::Dashboard;
use crate::error::{CuratorError, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// 前回の更新がまだ終わっていないときの振る舞い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapPolicy {
    /// そのティックは見送る
    #[default]
    #[serde(rename = "skip")]
    SkipIfRunning,
    /// 重ねて開始する（後に完了した方の結果が残る）
    #[serde(rename = "allow")]
    Allow,
}

impl std::str::FromStr for OverlapPolicy {
    type Err = CuratorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" | "skip-if-running" => Ok(OverlapPolicy::SkipIfRunning),
            "allow" => Ok(OverlapPolicy::Allow),
            _ => Err(CuratorError::InvalidArgument(format!(
                "Unknown overlap policy: {}. Use skip or allow",
                s
            ))),
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    in_flight: AtomicUsize,
    started: AtomicU64,
    skipped: AtomicU64,
}

pub struct RefreshScheduler {
    dashboard: Dashboard,
    interval: Duration,
    health_interval: Option<Duration>,
    overlap: OverlapPolicy,
    counters: Arc<Counters>,
    tasks: Vec<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new(dashboard: Dashboard, interval: Duration) -> Self {
        Self {
            dashboard,
            interval,
            health_interval: None,
            overlap: OverlapPolicy::default(),
            counters: Arc::new(Counters::default()),
            tasks: Vec::new(),
        }
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// 旧ダッシュボードのヘルスポーリング
    pub fn with_health_interval(mut self, interval: Option<Duration>) -> Self {
        self.health_interval = interval;
        self
    }

    /// ダッシュボード有効化時に呼ぶ（tokioランタイム内で）
    ///
    /// 間隔0は tokio::time::interval が受け付けないため拒否する。
    pub fn start(&mut self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(CuratorError::InvalidArgument("更新間隔は0より大きくしてください".into()));
        }
        if self.health_interval.is_some_and(|d| d.is_zero()) {
            return Err(CuratorError::InvalidArgument("ヘルス確認間隔は0より大きくしてください".into()));
        }
        if self.is_running() {
            warn!("Refresh scheduler already running");
            return Ok(());
        }

        info!(
            "Starting refresh scheduler (interval: {:?}, overlap: {:?})",
            self.interval, self.overlap
        );

        self.tasks.push(tokio::spawn(refresh_loop(
            self.dashboard.clone(),
            self.interval,
            self.overlap,
            Arc::clone(&self.counters),
        )));

        if let Some(period) = self.health_interval {
            self.tasks.push(tokio::spawn(health_loop(self.dashboard.clone(), period)));
        }
        Ok(())
    }

    /// ダッシュボード無効化時に呼ぶ
    pub fn stop(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
        info!("Refresh scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|t| !t.is_finished())
    }

    /// 実行中の更新サイクル数
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::SeqCst)
    }

    pub fn cycles_started(&self) -> u64 {
        self.counters.started.load(Ordering::SeqCst)
    }

    pub fn cycles_skipped(&self) -> u64 {
        self.counters.skipped.load(Ordering::SeqCst)
    }
}

/// サイクル終了時（パニック・中断を含む）に in_flight を戻す
struct InFlightGuard(Arc<Counters>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn refresh_loop(dashboard: Dashboard, period: Duration, overlap: OverlapPolicy, counters: Arc<Counters>) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // 初回のティックは即時
        ticker.tick().await;

        match overlap {
            OverlapPolicy::SkipIfRunning => {
                if counters
                    .in_flight
                    .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
                {
                    counters.skipped.fetch_add(1, Ordering::SeqCst);
                    warn!("Previous refresh still running; skipping this tick");
                    continue;
                }
            }
            OverlapPolicy::Allow => {
                counters.in_flight.fetch_add(1, Ordering::SeqCst);
            }
        }
        counters.started.fetch_add(1, Ordering::SeqCst);

        let dashboard = dashboard.clone();
        let guard = InFlightGuard(Arc::clone(&counters));
        tokio::spawn(async move {
            let _guard = guard;
            let report = dashboard.fetch_all().await;
            debug!(
                batches_ok = report.batches_ok,
                stats_ok = report.stats_ok,
                "refresh cycle finished"
            );
        });
    }
}

async fn health_loop(dashboard: Dashboard, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        dashboard.fetch_health().await;
    }
}
