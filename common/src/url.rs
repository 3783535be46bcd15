//! 画像URLテンプレート
//!
//! - 元画像: `https://<host>/api/<category>/<file_name>`
//! - プレビュー: `https://<host>/api/0_preview/<category>/<name>.webp`

use crate::types::ImageRecord;

pub const DEFAULT_HOST: &str = "img.1701701.xyz";

const PREVIEW_DIR: &str = "0_preview";
const PREVIEW_EXTENSION: &str = "webp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlScheme {
    host: String,
}

impl UrlScheme {
    /// `https://` や末尾の `/` が付いていても取り除いて保持する
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let trimmed = host
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        Self {
            host: trimmed.to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn original_url(&self, category: &str, file_name: &str) -> String {
        format!("https://{}/api/{}/{}", self.host, category, file_name)
    }

    pub fn preview_url(&self, category: &str, name: &str) -> String {
        format!(
            "https://{}/api/{}/{}/{}.{}",
            self.host, PREVIEW_DIR, category, name, PREVIEW_EXTENSION
        )
    }

    /// ファイル名（拡張子付き）と拡張子なしの名前からレコードを生成
    pub fn image_record(&self, category: &str, file_name: &str, name: &str) -> ImageRecord {
        ImageRecord {
            name: name.to_string(),
            original: self.original_url(category, file_name),
            preview: self.preview_url(category, name),
            category: category.to_string(),
            ..Default::default()
        }
    }
}

impl Default for UrlScheme {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}
