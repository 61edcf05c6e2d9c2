use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuratorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTPステータスエラー: {status} ({url})")]
    HttpStatus { status: u16, url: String },

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("クリップボード書き込みエラー: {0}")]
    Clipboard(String),

    #[error("引数が不正: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Common(#[from] idea_curator_common::Error),
}

pub type Result<T> = std::result::Result<T, CuratorError>;
