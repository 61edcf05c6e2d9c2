//! 統計・ヘルスのスナップショット

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// キュレーション統計
///
/// バックエンドの集計をそのまま保持し、構造は解釈しない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsSnapshot(pub Value);

impl StatsSnapshot {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// 表示用のトップレベル (キー, 値) 一覧
    ///
    /// オブジェクト以外は "value" キー1件として扱う。
    pub fn entries(&self) -> Vec<(String, String)> {
        match &self.0 {
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), display_value(v)))
                .collect(),
            Value::Null => Vec::new(),
            other => vec![("value".to_string(), display_value(other))],
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// システムヘルス（旧エンドポイント）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthSnapshot {
    pub status: String,
    pub last_batch_id: Option<String>,
    pub last_run_at: Option<String>,
    pub uptime_sec: f64,
}
