//! ギャラリーインデックスの型定義
//!
//! - GalleryIndex: インデックスファイル全体
//! - CategoryRecord: カテゴリ（フォルダ）ごとの画像リスト
//! - ImageRecord: 画像1枚分のレコード
//!
//! 外部ツールが書き込んだ未知のフィールドは `extra` に保持し、
//! 書き戻し時にそのまま出力する。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// インデックスファイル全体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryIndex {
    /// カテゴリ名 → カテゴリレコード（ファイル上の順序を保持）
    pub gallery: IndexMap<String, CategoryRecord>,

    /// 全カテゴリの画像数合計（派生値）
    #[serde(default)]
    pub total_images: usize,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// カテゴリレコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// 表示名
    #[serde(default)]
    pub name: String,

    /// 発見順の画像リスト
    #[serde(default)]
    pub images: Vec<ImageRecord>,

    /// 一部のジェネレータが出力するカテゴリ別件数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 画像レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// 拡張子を除いたファイル名
    pub name: String,
    /// 元画像URL
    pub original: String,
    /// プレビュー（WebP）URL
    pub preview: String,
    /// 所属カテゴリ
    pub category: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// インデックスの不整合
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexIssue {
    /// 同一カテゴリ内で name が重複
    DuplicateName { category: String, name: String },
    /// レコードの category が格納先キーと一致しない
    CategoryMismatch {
        category: String,
        name: String,
        recorded: String,
    },
    /// total_images が実際の件数と一致しない
    TotalMismatch { recorded: usize, actual: usize },
    /// カテゴリの count が画像数と一致しない
    CountMismatch {
        category: String,
        recorded: usize,
        actual: usize,
    },
}

impl fmt::Display for IndexIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexIssue::DuplicateName { category, name } => {
                write!(f, "{}: 画像名 {} が重複しています", category, name)
            }
            IndexIssue::CategoryMismatch { category, name, recorded } => write!(
                f,
                "{}: 画像 {} の category が {} になっています",
                category, name, recorded
            ),
            IndexIssue::TotalMismatch { recorded, actual } => write!(
                f,
                "total_images が {} ですが実際は {} 枚です",
                recorded, actual
            ),
            IndexIssue::CountMismatch { category, recorded, actual } => write!(
                f,
                "{}: count が {} ですが実際は {} 枚です",
                category, recorded, actual
            ),
        }
    }
}

impl GalleryIndex {
    /// 全カテゴリの画像数を数える
    pub fn image_count(&self) -> usize {
        self.gallery.values().map(|c| c.images.len()).sum()
    }

    /// 派生値（total_images と各カテゴリの count）を再計算
    pub fn refresh_totals(&mut self) {
        for category in self.gallery.values_mut() {
            if category.count.is_some() {
                category.count = Some(category.images.len());
            }
        }
        self.total_images = self.image_count();
    }

    /// 不変条件を検査して違反を列挙する
    pub fn validate(&self) -> Vec<IndexIssue> {
        let mut issues = Vec::new();

        for (key, category) in &self.gallery {
            let mut seen = HashSet::new();
            for image in &category.images {
                if !seen.insert(image.name.as_str()) {
                    issues.push(IndexIssue::DuplicateName {
                        category: key.clone(),
                        name: image.name.clone(),
                    });
                }
                if image.category != *key {
                    issues.push(IndexIssue::CategoryMismatch {
                        category: key.clone(),
                        name: image.name.clone(),
                        recorded: image.category.clone(),
                    });
                }
            }

            if let Some(recorded) = category.count {
                if recorded != category.images.len() {
                    issues.push(IndexIssue::CountMismatch {
                        category: key.clone(),
                        recorded,
                        actual: category.images.len(),
                    });
                }
            }
        }

        let actual = self.image_count();
        if self.total_images != actual {
            issues.push(IndexIssue::TotalMismatch {
                recorded: self.total_images,
                actual,
            });
        }

        issues
    }
}

impl CategoryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// 登録済みの画像名
    pub fn image_names(&self) -> HashSet<&str> {
        self.images.iter().map(|img| img.name.as_str()).collect()
    }
}
