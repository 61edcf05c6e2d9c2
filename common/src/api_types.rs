//! バックエンドAPIのリクエスト/レスポンス本体

use crate::curation::CurationStatus;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// POST /api/curation/{id} の本体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationRequest {
    pub status: String,
}

impl From<Option<CurationStatus>> for CurationRequest {
    fn from(next: Option<CurationStatus>) -> Self {
        Self {
            status: CurationStatus::wire_value(next).to_string(),
        }
    }
}

/// GET /api/curation/export/md のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownExport {
    pub markdown: String,
    pub count: usize,
}

/// フィードバック種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Like,
    Dislike,
    Blacklist,
    Comment,
}

impl FeedbackAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackAction::Like => "like",
            FeedbackAction::Dislike => "dislike",
            FeedbackAction::Blacklist => "blacklist",
            FeedbackAction::Comment => "comment",
        }
    }
}

impl std::str::FromStr for FeedbackAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "like" => Ok(FeedbackAction::Like),
            "dislike" => Ok(FeedbackAction::Dislike),
            "blacklist" => Ok(FeedbackAction::Blacklist),
            "comment" => Ok(FeedbackAction::Comment),
            _ => Err(Error::InvalidValue { field: "action", value: s.to_string() }),
        }
    }
}

impl std::fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// POST /api/feedback の本体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub hypothesis_id: String,
    pub action: FeedbackAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
