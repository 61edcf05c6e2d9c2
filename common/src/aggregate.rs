//! アイデア集約（CLI/エンジン共通）
//!
//! バッチ→アイデアのネストを平坦化し、UIDとバッチ情報を付与して
//! スコア降順に並べる。副作用もエラーもない純粋関数。

use crate::error::{Error, Result};
use crate::types::{Batch, DerivedIdea, Idea};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// サーバIDが無いアイデアのUID生成方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UidStrategy {
    /// "<batch_id>-<平坦化後のインデックス>"
    ///
    /// 再取得でバッチの内容や順序が変わると別のアイデアを指しうる。
    #[default]
    Positional,
    /// バッチIDと本文のSHA-256
    ContentHash,
}

impl std::str::FromStr for UidStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "positional" | "position" => Ok(UidStrategy::Positional),
            "content-hash" | "hash" => Ok(UidStrategy::ContentHash),
            _ => Err(Error::InvalidValue { field: "uid_fallback", value: s.to_string() }),
        }
    }
}

impl std::fmt::Display for UidStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UidStrategy::Positional => write!(f, "positional"),
            UidStrategy::ContentHash => write!(f, "content-hash"),
        }
    }
}

/// 全バッチのアイデアを平坦化してスコア降順に並べる
///
/// 同点は平坦化順（バッチ順→バッチ内順）を保つ。
pub fn aggregate_ideas(batches: &[Batch], strategy: UidStrategy) -> Vec<DerivedIdea> {
    let total: usize = batches.iter().map(|b| b.ideas.len()).sum();
    let mut ideas = Vec::with_capacity(total);

    for batch in batches {
        for idea in &batch.ideas {
            let index = ideas.len();
            let uid = match idea.server_id() {
                Some(id) => id.to_string(),
                None => fallback_uid(batch, idea, index, strategy),
            };
            ideas.push(DerivedIdea {
                idea: idea.clone(),
                uid,
                batch_id: batch.batch_id.clone(),
                batch_ts: batch.timestamp.clone(),
            });
        }
    }

    // sort_by は安定ソート
    ideas.sort_by(|a, b| b.score().total_cmp(&a.score()));
    ideas
}

fn fallback_uid(batch: &Batch, idea: &Idea, index: usize, strategy: UidStrategy) -> String {
    match strategy {
        UidStrategy::Positional => format!("{}-{}", batch.batch_id, index),
        UidStrategy::ContentHash => {
            let mut hasher = Sha256::new();
            for part in [
                batch.batch_id.as_str(),
                idea.service_name.as_str(),
                idea.problem.as_str(),
                idea.concept_text(),
            ] {
                hasher.update(part.as_bytes());
                hasher.update([0u8]);
            }
            let digest = hex::encode(hasher.finalize());
            format!("{}-{}", batch.batch_id, &digest[..16])
        }
    }
}

/// 等級ごとの件数（等級なしは "?"）
pub fn grade_distribution(ideas: &[DerivedIdea]) -> BTreeMap<String, usize> {
    let mut dist = BTreeMap::new();
    for idea in ideas {
        *dist.entry(idea.grade().to_string()).or_insert(0) += 1;
    }
    dist
}
