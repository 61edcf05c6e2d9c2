//! フィードバック送信
//!
//! バックエンドへの監査用シグナル。ローカル状態は変えず、再送もしない。

use crate::backend::DashboardBackend;
use crate::notify::Notifier;
use idea_curator_common::{DerivedIdea, FeedbackAction, FeedbackRequest};
use std::sync::Arc;
use tracing::{error, info};

pub struct FeedbackDispatcher {
    backend: Arc<dyn DashboardBackend>,
    notifier: Arc<dyn Notifier>,
}

impl FeedbackDispatcher {
    pub(crate) fn new(backend: Arc<dyn DashboardBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self { backend, notifier }
    }

    pub async fn send_feedback(
        &self,
        idea: &DerivedIdea,
        action: FeedbackAction,
        comment: Option<String>,
    ) -> bool {
        let Some(hypothesis_id) = idea.server_id() else {
            error!(uid = %idea.uid, "idea has no server id; feedback not sent");
            self.notifier.failure("IDの無いアイデアにはフィードバックを送信できません");
            return false;
        };

        let request = FeedbackRequest {
            hypothesis_id: hypothesis_id.to_string(),
            action,
            comment: comment.filter(|c| !c.trim().is_empty()),
        };

        match self.backend.send_feedback(&request).await {
            Ok(()) => {
                info!(hypothesis_id, %action, "feedback sent");
                self.notifier.success(&format!("フィードバック送信完了: {}", action));
                true
            }
            Err(e) => {
                error!("フィードバック送信に失敗: {}", e);
                self.notifier.failure("フィードバックの送信に失敗しました");
                false
            }
        }
    }
}
