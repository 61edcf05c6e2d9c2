//! ログ初期化
//!
//! 標準出力はエクスポート結果に使うため、ログは標準エラーに出す。

use tracing_subscriber::EnvFilter;

/// RUST_LOG が未設定なら info（verbose 時は debug）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 二重初期化（テストなど）は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
