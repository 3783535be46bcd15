use crate::error::{GallerySyncError, Result};
use std::path::Path;
use walkdir::WalkDir;

/// ルート直下のカテゴリフォルダを名前順に列挙
///
/// `excluded` に含まれる名前と `.` で始まるフォルダは除外する。
pub fn discover_categories(root: &Path, excluded: &[String]) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(GallerySyncError::FolderNotFound(root.display().to_string()));
    }

    let mut categories = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Walk error: {e}");
                continue;
            }
        };

        if !entry.path().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            log::warn!("UTF-8でないフォルダ名をスキップ: {:?}", entry.path());
            continue;
        };

        if name.starts_with('.') || excluded.iter().any(|d| d == name) {
            continue;
        }

        categories.push(name.to_string());
    }

    categories.sort();
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_excludes_infrastructure_dirs() {
        let root = std::env::temp_dir().join("gallery-sync-test-discover");
        fs::remove_dir_all(&root).ok();
        for dir in ["PH7", "Cats", ".git", ".cache", "node_modules", "public"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        fs::write(root.join("gallery-index.json"), "{}").unwrap();

        let excluded: Vec<String> = crate::config::DEFAULT_EXCLUDED_DIRS
            .iter()
            .map(|s| s.to_string())
            .collect();
        let categories = discover_categories(&root, &excluded).unwrap();
        assert_eq!(categories, vec!["Cats".to_string(), "PH7".to_string()]);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_discover_missing_root() {
        let result = discover_categories(Path::new("/nonexistent/gallery"), &[]);
        assert!(result.is_err());
    }
}
