//! 公開アイデアのマークダウンエクスポート
//!
//! バックエンドが生成したマークダウンをクリップボード相当の出力先に書き込み、
//! 件数を通知する。取得と書き込みのどちらで失敗しても通知は1件だけ。

use crate::backend::DashboardBackend;
use crate::dashboard::DashboardState;
use crate::error::{CuratorError, Result};
use crate::notify::Notifier;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// クリップボードの代わりとなる出力先
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// 標準出力
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ClipboardSink for StdoutSink {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        Ok(())
    }
}

/// ファイル
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClipboardSink for FileSink {
    fn write_text(&self, text: &str) -> Result<()> {
        std::fs::write(&self.path, text).map_err(|e| {
            CuratorError::Clipboard(format!("{}: {}", self.path.display(), e))
        })
    }
}

pub struct ExportService {
    backend: Arc<dyn DashboardBackend>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn ClipboardSink>,
    state: Arc<RwLock<DashboardState>>,
}

impl ExportService {
    pub(crate) fn new(
        backend: Arc<dyn DashboardBackend>,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn ClipboardSink>,
        state: Arc<RwLock<DashboardState>>,
    ) -> Self {
        Self { backend, notifier, sink, state }
    }

    /// 公開済みアイデアをコピーし、件数を返す
    pub async fn copy_published_md(&self) -> Option<usize> {
        self.state.write().await.exporting = true;
        let result = self.export_to_sink().await;
        self.state.write().await.exporting = false;

        match result {
            Ok(count) => {
                info!(count, "published ideas exported");
                self.notifier.success(&format!("公開アイデア{}件をコピーしました", count));
                Some(count)
            }
            Err(e) => {
                error!("エクスポートに失敗: {}", e);
                self.notifier.failure("エクスポートに失敗しました");
                None
            }
        }
    }

    async fn export_to_sink(&self) -> Result<usize> {
        let export = self.backend.export_published_md().await?;
        self.sink.write_text(&export.markdown)?;
        Ok(export.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_writes_text() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("published.md");

        FileSink::new(&path).write_text("# Published API Ideas\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Published API Ideas\n");
    }

    #[test]
    fn test_file_sink_error_is_clipboard_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("published.md");

        let err = FileSink::new(&path).write_text("# x").unwrap_err();
        assert!(matches!(err, CuratorError::Clipboard(_)));
    }
}
