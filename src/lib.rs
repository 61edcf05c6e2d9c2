//! アイデアレビューダッシュボードのクライアント側エンジン
//!
//! バッチの取得・派生ビュー計算・キュレーション状態の同期・定期更新を行う。

pub mod backend;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod feedback;
pub mod logging;
pub mod notify;
pub mod render;
pub mod review;
pub mod scheduler;
