//! インデックスファイルの読み書き
//!
//! 書き込み前のバックアップ（スナップショット）は `snapshot` として独立させ、
//! 呼び出し側が `save` の前に明示的に実行する。

use crate::error::{GallerySyncError, Result};
use chrono::{Local, NaiveDateTime};
use gallery_sync_common::{render, GalleryIndex, IndexLayout};
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_MARKER: &str = ".backup_";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<GalleryIndex> {
        self.load_with_layout().map(|(index, _)| index)
    }

    /// インデックスと、ファイル上の書式を合わせて読み込む
    pub fn load_with_layout(&self) -> Result<(GalleryIndex, IndexLayout)> {
        if !self.path.is_file() {
            return Err(GallerySyncError::IndexNotFound(self.path.display().to_string()));
        }

        let content = fs::read_to_string(&self.path)?;
        let index = serde_json::from_str(&content)?;
        Ok((index, IndexLayout::detect(&content)))
    }

    /// インデックスを上書き保存
    pub fn save(&self, index: &GalleryIndex, layout: IndexLayout) -> Result<()> {
        let content = render(index, layout)?;
        fs::write(&self.path, content)?;
        log::debug!("インデックスを保存: {} ({})", self.path.display(), layout);
        Ok(())
    }

    /// 現在のインデックスファイルを時刻付きの名前でコピー
    pub fn snapshot(&self) -> Result<PathBuf> {
        self.snapshot_at(Local::now().naive_local())
    }

    pub fn snapshot_at(&self, at: NaiveDateTime) -> Result<PathBuf> {
        let backup = self.backup_path_at(at);
        fs::copy(&self.path, &backup).map_err(|source| GallerySyncError::Snapshot {
            path: backup.display().to_string(),
            source,
        })?;
        log::debug!("バックアップを作成: {}", backup.display());
        Ok(backup)
    }

    /// `gallery-index.json` → `gallery-index.json.backup_20250101_093000`
    pub fn backup_path_at(&self, at: NaiveDateTime) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let backup_name = format!(
            "{}{}{}",
            file_name,
            BACKUP_MARKER,
            at.format(BACKUP_TIMESTAMP_FORMAT)
        );
        self.path.with_file_name(backup_name)
    }
}
