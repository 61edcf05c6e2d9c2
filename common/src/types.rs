//! バッチ・アイデアの型定義
//!
//! バックエンドから取得する型と、ダッシュボードで使う派生ビュー:
//! - Batch: タイムスタンプ付きのアイデア群
//! - Idea: 1件のレビュー対象
//! - DerivedIdea: バッチ情報とUIDを付与したIdea

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 不明な等級
pub const UNKNOWN_GRADE: &str = "?";

/// `null` をデフォルト値として扱う
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// バックエンドが返すバッチ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Batch {
    #[serde(deserialize_with = "null_to_default")]
    pub batch_id: String,

    /// ISO8601文字列（ローカライズはしない）
    #[serde(deserialize_with = "null_to_default")]
    pub timestamp: String,

    #[serde(deserialize_with = "null_to_default")]
    pub ideas: Vec<Idea>,
}

/// アイデア
///
/// バックエンドはIDを保証しないため、識別子はすべてOption。
/// 未知のフィールドは `extra` にそのまま保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Idea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis_id: Option<String>,

    #[serde(deserialize_with = "null_to_default")]
    pub service_name: String,

    #[serde(deserialize_with = "null_to_default")]
    pub problem: String,

    #[serde(deserialize_with = "null_to_default")]
    pub concept: String,

    #[serde(deserialize_with = "null_to_default")]
    pub solution: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_score: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub numrv_score: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Idea {
    /// サーバ側の識別子（id → hypothesis_id の順、空文字は無しとみなす）
    pub fn server_id(&self) -> Option<&str> {
        non_empty(self.id.as_deref()).or_else(|| non_empty(self.hypothesis_id.as_deref()))
    }

    /// ソート用スコア: weighted_score ?? numrv_score ?? 0
    ///
    /// -0.0 は 0.0 に正規化する（total_cmp で同点扱いにするため）。
    pub fn score(&self) -> f64 {
        self.weighted_score.or(self.numrv_score).unwrap_or(0.0) + 0.0
    }

    /// 等級（無ければ "?"）
    pub fn grade(&self) -> &str {
        self.grade.as_deref().unwrap_or(UNKNOWN_GRADE)
    }

    /// コンセプト（空ならソリューションにフォールバック）
    pub fn concept_text(&self) -> &str {
        if self.concept.is_empty() {
            &self.solution
        } else {
            &self.concept
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// 派生アイデアビュー
///
/// 集約のたびに再計算され、その場で変更されることはない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedIdea {
    #[serde(flatten)]
    pub idea: Idea,

    #[serde(rename = "_uid")]
    pub uid: String,

    #[serde(rename = "_batch_id")]
    pub batch_id: String,

    #[serde(rename = "_batch_ts")]
    pub batch_ts: String,
}

impl DerivedIdea {
    pub fn server_id(&self) -> Option<&str> {
        self.idea.server_id()
    }

    pub fn score(&self) -> f64 {
        self.idea.score()
    }

    pub fn grade(&self) -> &str {
        self.idea.grade()
    }
}
