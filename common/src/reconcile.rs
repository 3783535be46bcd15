//! インデックス照合ロジック
//!
//! ディスク上のファイル名リストとインデックスを突き合わせ、
//! 未登録の画像だけを末尾に追加する。既存レコードの並びは変更しない。
//! ファイルシステムには触れないので、呼び出し側がスキャン結果を渡す。

use crate::types::{CategoryRecord, GalleryIndex, ImageRecord};
use crate::url::UrlScheme;
use std::path::Path;

/// 1カテゴリ分のスキャン結果（ファイル名昇順）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    pub category: String,
    pub file_names: Vec<String>,
}

impl CategoryListing {
    pub fn new(category: impl Into<String>, file_names: Vec<String>) -> Self {
        Self {
            category: category.into(),
            file_names,
        }
    }
}

/// カテゴリごとの追加結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAddition {
    pub category: String,
    /// 追加した画像名（追加順）
    pub names: Vec<String>,
}

/// 照合結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// 1件以上追加されたカテゴリのみ
    pub added: Vec<CategoryAddition>,
    /// インデックスに存在しないためスキップしたカテゴリ
    pub skipped: Vec<String>,
    /// 照合後の total_images
    pub total_images: usize,
}

impl Reconciliation {
    pub fn added_count(&self) -> usize {
        self.added.iter().map(|a| a.names.len()).sum()
    }

    /// 何も追加されなかった（書き込み不要）
    pub fn is_noop(&self) -> bool {
        self.added_count() == 0
    }

    pub fn updated_categories(&self) -> Vec<&str> {
        self.added.iter().map(|a| a.category.as_str()).collect()
    }
}

/// ファイル名から拡張子を除いた画像名を得る
pub fn image_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

/// 未登録の画像レコードを生成（渡された順序のまま）
///
/// 同じ名前になるファイル（`a.jpg` と `a.png` など）は先に現れた方だけを採用する。
pub fn missing_images<'a, I>(
    record: &CategoryRecord,
    category: &str,
    file_names: I,
    urls: &UrlScheme,
) -> Vec<ImageRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut known = record.image_names();
    let mut new_images = Vec::new();

    for file_name in file_names {
        let name = image_name(file_name);
        if known.insert(name) {
            new_images.push(urls.image_record(category, file_name, name));
        }
    }

    new_images
}

/// 未登録の画像をカテゴリ末尾に追加し、追加した画像名を返す
pub fn append_missing<'a, I>(
    record: &mut CategoryRecord,
    category: &str,
    file_names: I,
    urls: &UrlScheme,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let new_images = missing_images(record, category, file_names, urls);
    let names = new_images.iter().map(|img| img.name.clone()).collect();
    record.images.extend(new_images);
    names
}

/// インデックス全体を照合する
///
/// インデックスにないカテゴリは `skipped` に入れて無視する。
/// total_images は対象外のカテゴリも含めて再計算される。
pub fn reconcile(
    index: &mut GalleryIndex,
    listings: &[CategoryListing],
    urls: &UrlScheme,
) -> Reconciliation {
    let mut result = Reconciliation::default();

    for listing in listings {
        let Some(record) = index.gallery.get_mut(&listing.category) else {
            result.skipped.push(listing.category.clone());
            continue;
        };

        let names = append_missing(
            record,
            &listing.category,
            listing.file_names.iter().map(String::as_str),
            urls,
        );

        if !names.is_empty() {
            result.added.push(CategoryAddition {
                category: listing.category.clone(),
                names,
            });
        }
    }

    index.refresh_totals();
    result.total_images = index.total_images;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(category: &str, names: &[&str]) -> GalleryIndex {
        let urls = UrlScheme::default();
        let mut record = CategoryRecord::new(category);
        record.images = names
            .iter()
            .map(|n| urls.image_record(category, &format!("{}.jpg", n), n))
            .collect();
        let mut index = GalleryIndex::default();
        index.gallery.insert(category.to_string(), record);
        index.refresh_totals();
        index
    }

    fn listing(category: &str, files: &[&str]) -> CategoryListing {
        CategoryListing::new(category, files.iter().map(|f| f.to_string()).collect())
    }

    fn names(index: &GalleryIndex, category: &str) -> Vec<String> {
        index.gallery[category]
            .images
            .iter()
            .map(|img| img.name.clone())
            .collect()
    }

    #[test]
    fn test_image_name() {
        assert_eq!(image_name("a1.jpg"), "a1");
        assert_eq!(image_name("photo.2024.png"), "photo.2024");
        assert_eq!(image_name("noext"), "noext");
    }

    #[test]
    fn test_appends_new_image() {
        let mut index = index_with("A", &["a1"]);
        let result = reconcile(&mut index, &[listing("A", &["a1.jpg", "a2.png"])], &UrlScheme::default());

        assert_eq!(names(&index, "A"), vec!["a1", "a2"]);
        let a2 = &index.gallery["A"].images[1];
        assert_eq!(a2.original, "https://img.1701701.xyz/api/A/a2.png");
        assert_eq!(a2.preview, "https://img.1701701.xyz/api/0_preview/A/a2.webp");
        assert_eq!(a2.category, "A");
        assert_eq!(index.total_images, 2);
        assert_eq!(result.added_count(), 1);
        assert_eq!(result.updated_categories(), vec!["A"]);
    }

    #[test]
    fn test_second_run_is_noop() {
        let mut index = index_with("A", &["a1"]);
        let files = [listing("A", &["a1.jpg", "a2.png", "a3.gif"])];
        reconcile(&mut index, &files, &UrlScheme::default());
        let snapshot = index.clone();

        let result = reconcile(&mut index, &files, &UrlScheme::default());
        assert!(result.is_noop());
        assert_eq!(index, snapshot);
    }

    #[test]
    fn test_existing_order_preserved() {
        // 既存レコードはファイル名順ではない
        let mut index = index_with("A", &["z9", "b2", "m5"]);
        reconcile(&mut index, &[listing("A", &["a0.jpg", "b2.jpg", "c3.jpg"])], &UrlScheme::default());

        assert_eq!(names(&index, "A"), vec!["z9", "b2", "m5", "a0", "c3"]);
    }

    #[test]
    fn test_same_stem_added_once() {
        let mut index = index_with("A", &[]);
        let result = reconcile(&mut index, &[listing("A", &["a.jpg", "a.png", "b.webp"])], &UrlScheme::default());

        assert_eq!(names(&index, "A"), vec!["a", "b"]);
        assert_eq!(index.gallery["A"].images[0].original, "https://img.1701701.xyz/api/A/a.jpg");
        assert_eq!(result.added_count(), 2);
        assert!(index.validate().is_empty());
    }

    #[test]
    fn test_unknown_category_skipped() {
        let mut index = index_with("A", &["a1"]);
        let result = reconcile(&mut index, &[listing("B", &["b1.jpg"])], &UrlScheme::default());

        assert!(result.is_noop());
        assert_eq!(result.skipped, vec!["B".to_string()]);
        assert!(!index.gallery.contains_key("B"));
    }

    #[test]
    fn test_total_counts_untargeted_categories() {
        let mut index = index_with("A", &["a1", "a2"]);
        let urls = UrlScheme::default();
        let mut b = CategoryRecord::new("B");
        b.images.push(urls.image_record("B", "b1.jpg", "b1"));
        index.gallery.insert("B".into(), b);
        index.total_images = 0;

        let result = reconcile(&mut index, &[listing("B", &["b1.jpg", "b2.jpg"])], &urls);
        assert_eq!(result.total_images, 4);
        assert_eq!(index.total_images, 4);
    }

    #[test]
    fn test_missing_images_does_not_mutate() {
        let index = index_with("A", &["a1"]);
        let record = &index.gallery["A"];
        let pending = missing_images(record, "A", ["a1.jpg", "a2.jpg"], &UrlScheme::default());

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "a2");
        assert_eq!(record.images.len(), 1);
    }

    #[test]
    fn test_custom_host() {
        let mut index = index_with("A", &[]);
        reconcile(&mut index, &[listing("A", &["x.jpg"])], &UrlScheme::new("cdn.example.com"));
        assert_eq!(index.gallery["A"].images[0].original, "https://cdn.example.com/api/A/x.jpg");
    }
}
