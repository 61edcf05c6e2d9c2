//! 通知と確認
//!
//! トースト表示や確認ダイアログはエンジンの外側の責務。
//! ここではその境界と、CLI向けの実装を定義する。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// 一時的なユーザー向け通知
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(NoticeLevel::Success, message);
    }

    fn failure(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// 取り消せない操作の確認
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// 標準エラーに表示する通知
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => eprintln!("✔ {}", message),
            NoticeLevel::Error => eprintln!("✖ {}", message),
        }
    }
}

/// dialoguer による対話的確認（入力エラー時は拒否扱い）
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// --yes 指定時
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
