//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use idea_curator::config::Config;
use idea_curator::error::CuratorError;
use idea_curator::scheduler::OverlapPolicy;
use idea_curator_common::{CurationFilter, CurationStatus, FeedbackAction, UidStrategy};
use tempfile::tempdir;

/// CuratorErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        CuratorError::Config("テスト設定エラー".to_string()),
        CuratorError::HttpStatus { status: 503, url: "http://localhost:8000/api/batches".to_string() },
        CuratorError::Clipboard("denied".to_string()),
        CuratorError::InvalidArgument("不正な引数".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// HTTPステータスエラーのメッセージ確認
#[test]
fn test_http_status_message() {
    let err = CuratorError::HttpStatus { status: 404, url: "http://localhost/api/health".to_string() };
    let display = format!("{}", err);

    assert!(display.contains("404"));
    assert!(display.contains("/api/health"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: CuratorError = io_err.into();

    assert!(matches!(err, CuratorError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: CuratorError = json_err.into();

    assert!(matches!(err, CuratorError::Json(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = "archived".parse::<CurationStatus>().unwrap_err();
    let err: CuratorError = common_err.into();

    assert!(matches!(err, CuratorError::Common(_)));
    assert!(format!("{}", err).contains("archived"));
}

/// 不正な値のパース
#[test]
fn test_invalid_values_rejected() {
    assert!("love".parse::<FeedbackAction>().is_err());
    assert!("archived".parse::<CurationFilter>().is_err());
    assert!("random".parse::<UidStrategy>().is_err());
    assert!(matches!(
        "queue".parse::<OverlapPolicy>(),
        Err(CuratorError::InvalidArgument(_))
    ));
}

/// 壊れた設定ファイル
#[test]
fn test_broken_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Config::load_from(&path), Err(CuratorError::Json(_))));
}

/// 更新間隔0は拒否
#[test]
fn test_zero_interval_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"refresh_interval_secs": 0}"#).unwrap();

    assert!(matches!(Config::load_from(&path), Err(CuratorError::Config(_))));
}

/// 設定ファイルが無ければ既定値
#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("none.json")).unwrap();

    assert_eq!(config.refresh_interval_secs, 300);
    assert_eq!(config.health_interval_secs, None);
    assert_eq!(config.overlap, OverlapPolicy::SkipIfRunning);
}
