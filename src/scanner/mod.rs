mod discovery;

pub use discovery::discover_categories;

use crate::error::{GallerySyncError, Result};
use std::path::Path;
use walkdir::WalkDir;

/// カテゴリフォルダ直下の画像ファイル名を昇順に列挙
///
/// 拡張子は `extensions` と完全一致（大文字小文字を区別）したものだけを対象とし、
/// `.` で始まる隠しファイルは無視する。
pub fn scan_category(folder: &Path, extensions: &[String]) -> Result<Vec<String>> {
    if !folder.is_dir() {
        return Err(GallerySyncError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Walk error: {e}");
                continue;
            }
        };
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            log::warn!("UTF-8でないファイル名をスキップ: {:?}", path);
            continue;
        };

        if file_name.starts_with('.') || !is_image_extension(path, extensions) {
            continue;
        }

        images.push(file_name.to_string());
    }

    // ファイル名でソート
    images.sort();

    log::debug!("{}: {}枚の画像を検出", folder.display(), images.len());
    Ok(images)
}

fn is_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}
