//! キュレーション状態ストア
//!
//! アイデアのサーバIDをキーに、レビュアーが付けた状態を保持する。
//! バックエンドが確認した変更だけを書き込む（楽観的更新はしない）。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 状態をクリアするときのワイヤ値
pub const STATUS_NONE: &str = "none";

/// キュレーション状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurationStatus {
    Published,
    Hold,
    Rejected,
}

impl CurationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurationStatus::Published => "published",
            CurationStatus::Hold => "hold",
            CurationStatus::Rejected => "rejected",
        }
    }

    /// 遷移先のワイヤ値（None は "none"）
    pub fn wire_value(next: Option<CurationStatus>) -> &'static str {
        next.map(|s| s.as_str()).unwrap_or(STATUS_NONE)
    }
}

impl std::str::FromStr for CurationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "published" | "publish" | "p" => Ok(CurationStatus::Published),
            "hold" | "h" => Ok(CurationStatus::Hold),
            "rejected" | "reject" | "r" => Ok(CurationStatus::Rejected),
            _ => Err(Error::InvalidValue { field: "status", value: s.to_string() }),
        }
    }
}

impl std::fmt::Display for CurationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// キュレーションエントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationEntry {
    pub status: CurationStatus,
}

/// セッション中に確認済みのキュレーション状態
///
/// キーが無ければ未キュレーション。
#[derive(Debug, Clone, Default)]
pub struct CurationStore {
    entries: HashMap<String, CurationEntry>,
}

impl CurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の状態を取得
    pub fn get(&self, idea_id: &str) -> Option<CurationStatus> {
        self.entries.get(idea_id).map(|e| e.status)
    }

    /// トグル規則: 同じ状態を再度指定すると解除
    pub fn next_status(&self, idea_id: &str, requested: CurationStatus) -> Option<CurationStatus> {
        if self.get(idea_id) == Some(requested) {
            None
        } else {
            Some(requested)
        }
    }

    /// バックエンド確認後の状態を反映
    pub fn apply(&mut self, idea_id: &str, next: Option<CurationStatus>) {
        match next {
            Some(status) => {
                self.entries.insert(idea_id.to_string(), CurationEntry { status });
            }
            None => {
                self.entries.remove(idea_id);
            }
        }
    }

    /// 全エントリを削除
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 指定状態の件数
    pub fn count(&self, status: CurationStatus) -> usize {
        self.entries.values().filter(|e| e.status == status).count()
    }
}
