//! インデックス同期
//!
//! 読み込み → スキャン → 照合 → バックアップ → 書き戻し の一連の流れをまとめる。
//! 同じインデックスに対して同時に実行しないこと（ロックは取らない）。

use crate::config::Config;
use crate::error::{GallerySyncError, Result};
use crate::scanner;
use crate::store::IndexStore;
use gallery_sync_common::reconcile::{image_name, missing_images};
use gallery_sync_common::{
    reconcile, CategoryAddition, CategoryListing, IndexIssue, IndexLayout, Reconciliation,
};
use std::collections::HashSet;
use std::path::PathBuf;

/// 同期対象
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// ルート直下の全カテゴリ（除外フォルダを除く）
    All,
    Category(String),
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub scope: Scope,
    /// 自動モード（警告を抑制し、出力を1行にする）
    pub auto: bool,
    /// 変更を書き込まない
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            scope: Scope::All,
            auto: false,
            dry_run: false,
        }
    }
}

/// 同期結果
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub index_path: PathBuf,
    pub reconciliation: Reconciliation,
    /// 書き込み前に作成したバックアップ
    pub backup: Option<PathBuf>,
    pub written: bool,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn added_count(&self) -> usize {
        self.reconciliation.added_count()
    }

    pub fn total_images(&self) -> usize {
        self.reconciliation.total_images
    }

    pub fn summary(&self, auto: bool) -> Vec<String> {
        let added = self.added_count();
        let categories = self.reconciliation.updated_categories();

        if added == 0 {
            return if auto {
                vec!["自動チェック完了: 新しい画像はありません".to_string()]
            } else {
                vec![format!(
                    "新しい画像はありません。{} は最新です",
                    self.index_path.display()
                )]
            };
        }

        if self.dry_run {
            let mut lines: Vec<String> = self
                .reconciliation
                .added
                .iter()
                .map(|a| format!("カテゴリ {}: {}枚の未登録画像", a.category, a.names.len()))
                .collect();
            lines.push(format!("（ドライラン）{}枚の新しい画像が見つかりました。書き込みは行いません", added));
            return lines;
        }

        if auto {
            return vec![format!(
                "自動更新完了: {}枚の新しい画像を追加、{}カテゴリを更新",
                added,
                categories.len()
            )];
        }

        let mut lines: Vec<String> = self
            .reconciliation
            .added
            .iter()
            .map(|a| format!("カテゴリ {}: {}枚の新しい画像を追加", a.category, a.names.len()))
            .collect();
        lines.push(String::new());
        lines.push("更新完了:".to_string());
        lines.push(format!("- 合計 {}枚の新しい画像を追加", added));
        lines.push(format!("- 更新したカテゴリ: {}", categories.join(", ")));
        lines.push(format!("- ギャラリー全体: {}枚", self.total_images()));
        if let Some(backup) = &self.backup {
            lines.push(format!("- バックアップ: {}", backup.display()));
        }
        lines
    }
}

/// インデックスにあるがディスクにない画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleEntry {
    pub category: String,
    pub name: String,
}

/// 整合性チェック結果（インデックスは変更しない）
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub issues: Vec<IndexIssue>,
    /// 未登録の画像（次回の update で追加される）
    pub pending: Vec<CategoryAddition>,
    pub stale: Vec<StaleEntry>,
    /// インデックスにあるがフォルダがないカテゴリ
    pub missing_dirs: Vec<String>,
    /// フォルダはあるがインデックスにないカテゴリ
    pub untracked_dirs: Vec<String>,
}

impl CheckReport {
    pub fn is_consistent(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.iter().map(|p| p.names.len()).sum()
    }
}

pub struct GallerySync {
    root: PathBuf,
    config: Config,
}

impl GallerySync {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn store(&self) -> IndexStore {
        IndexStore::new(self.config.index_path(&self.root))
    }

    /// 未登録の画像をインデックスに追加
    pub fn update(&self, options: &SyncOptions) -> Result<SyncReport> {
        let store = self.store();
        let (mut index, layout) = store.load_with_layout()?;
        let targets = self.resolve_targets(&options.scope)?;

        let mut listings = Vec::new();
        let mut skipped = Vec::new();
        for category in targets {
            if !index.gallery.contains_key(&category) {
                if options.auto {
                    log::debug!("カテゴリ {} はインデックスにないためスキップ", category);
                } else {
                    log::warn!("カテゴリ {} はインデックスにないためスキップ", category);
                }
                skipped.push(category);
                continue;
            }

            let files = scanner::scan_category(&self.root.join(&category), &self.config.extensions)?;
            listings.push(CategoryListing::new(category, files));
        }

        let mut reconciliation = reconcile(&mut index, &listings, &self.config.url_scheme());
        reconciliation.skipped.extend(skipped);

        let mut report = SyncReport {
            index_path: store.path().to_path_buf(),
            reconciliation,
            backup: None,
            written: false,
            dry_run: options.dry_run,
        };

        if report.reconciliation.is_noop() || options.dry_run {
            return Ok(report);
        }

        // バックアップは必ず上書き前に作成する。書式はファイル上のものを維持
        report.backup = Some(store.snapshot()?);
        store.save(&index, layout)?;
        report.written = true;

        log::info!(
            "{}枚の画像を追加 (合計 {}枚)",
            report.added_count(),
            report.total_images()
        );
        Ok(report)
    }

    /// インデックスとディスクの差分・不整合を調べる
    pub fn check(&self) -> Result<CheckReport> {
        let index = self.store().load()?;
        let urls = self.config.url_scheme();
        let mut report = CheckReport {
            issues: index.validate(),
            ..Default::default()
        };

        for (category, record) in &index.gallery {
            let dir = self.root.join(category);
            if !dir.is_dir() {
                report.missing_dirs.push(category.clone());
                continue;
            }

            let files = scanner::scan_category(&dir, &self.config.extensions)?;
            let on_disk: HashSet<&str> = files.iter().map(|f| image_name(f)).collect();

            report.stale.extend(
                record
                    .images
                    .iter()
                    .filter(|img| !on_disk.contains(img.name.as_str()))
                    .map(|img| StaleEntry {
                        category: category.clone(),
                        name: img.name.clone(),
                    }),
            );

            let pending = missing_images(
                record,
                category,
                files.iter().map(String::as_str),
                &urls,
            );
            if !pending.is_empty() {
                report.pending.push(CategoryAddition {
                    category: category.clone(),
                    names: pending.into_iter().map(|img| img.name).collect(),
                });
            }
        }

        report.untracked_dirs = scanner::discover_categories(&self.root, &self.config.excluded_dirs)?
            .into_iter()
            .filter(|c| !index.gallery.contains_key(c))
            .collect();

        Ok(report)
    }

    /// バックアップを取ってから指定の書式で書き直す
    pub fn reformat(&self, layout: IndexLayout) -> Result<PathBuf> {
        let store = self.store();
        let mut index = store.load()?;
        index.refresh_totals();

        let backup = store.snapshot()?;
        store.save(&index, layout)?;
        Ok(backup)
    }

    fn resolve_targets(&self, scope: &Scope) -> Result<Vec<String>> {
        match scope {
            Scope::Category(name) => {
                if !self.root.join(name).is_dir() {
                    return Err(GallerySyncError::CategoryNotFound(name.clone()));
                }
                Ok(vec![name.clone()])
            }
            Scope::All => scanner::discover_categories(&self.root, &self.config.excluded_dirs),
        }
    }
}
