use crate::error::{GallerySyncError, Result};
use gallery_sync_common::{IndexLayout, UrlScheme, DEFAULT_HOST};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const HOST_ENV: &str = "GALLERY_SYNC_HOST";

/// 自動検出から除外するフォルダ
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", "public", "archive", "backup", "node_modules"];

/// 対象とする画像拡張子（大文字小文字は区別する）
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 画像配信ホスト
    pub host: String,
    /// ギャラリールートからのインデックスファイルパス
    pub index_file: String,
    pub excluded_dirs: Vec<String>,
    pub extensions: Vec<String>,
    /// 書き戻し時の書式
    pub layout: IndexLayout,
}

impl Config {
    /// 設定を読み込み（`path` 省略時は ~/.config/gallery-sync/config.json）
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content).map_err(|e| {
                GallerySyncError::Config(format!("{}: {}", config_path.display(), e))
            })?
        } else {
            if path.is_some() {
                return Err(GallerySyncError::Config(format!(
                    "設定ファイルが存在しません: {}",
                    config_path.display()
                )));
            }
            Self::default()
        };

        // 環境変数を優先
        config.apply_env();

        Ok(config)
    }

    /// `load` と同じだが、指定パスのファイルがなければ既定値を返す
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if !p.exists() => {
                log::debug!("設定ファイルがないため既定値を使用: {}", p.display());
                let mut config = Self::default();
                config.apply_env();
                Ok(config)
            }
            _ => Self::load(path),
        }
    }

    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var(HOST_ENV) {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
    }

    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GallerySyncError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("gallery-sync").join("config.json"))
    }

    pub fn set_host(&mut self, host: String, path: Option<&Path>) -> Result<()> {
        if host.trim().is_empty() {
            return Err(GallerySyncError::Config("ホスト名が空です".into()));
        }
        self.host = host;
        self.save(path)
    }

    pub fn url_scheme(&self) -> UrlScheme {
        UrlScheme::new(self.host.as_str())
    }

    pub fn index_path(&self, root: &Path) -> PathBuf {
        root.join(&self.index_file)
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == dir_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            index_file: "gallery-index.json".into(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            layout: IndexLayout::Pretty,
        }
    }
}
