use crate::error::{CuratorError, Result};
use crate::scheduler::OverlapPolicy;
use idea_curator_common::UidStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// バックエンドURLを上書きする環境変数
pub const URL_ENV: &str = "IDEA_CURATOR_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub refresh_interval_secs: u64,
    pub health_interval_secs: Option<u64>,
    pub request_timeout_secs: u64,
    pub overlap: OverlapPolicy,
    pub uid_fallback: UidStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            refresh_interval_secs: 300, // 5分ごとに再取得
            health_interval_secs: None,
            request_timeout_secs: 30,
            overlap: OverlapPolicy::default(),
            uid_fallback: UidStrategy::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CuratorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("idea-curator").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            return Err(CuratorError::Config("refresh_interval_secs は1以上にしてください".into()));
        }
        if self.health_interval_secs == Some(0) {
            return Err(CuratorError::Config("health_interval_secs は1以上にしてください".into()));
        }
        Ok(())
    }

    /// バックエンドURL（環境変数を優先）
    pub fn base_url(&self) -> String {
        match std::env::var(URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => self.base_url.clone(),
        }
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CuratorError::InvalidArgument(format!(
                "URLは http:// か https:// で始めてください: {}",
                url
            )));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        self.save()
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn health_interval(&self) -> Option<Duration> {
        self.health_interval_secs.map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
