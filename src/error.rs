use thiserror::Error;

#[derive(Error, Debug)]
pub enum GallerySyncError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("インデックスファイルが見つかりません: {0}")]
    IndexNotFound(String),

    #[error("カテゴリフォルダが見つかりません: {0}")]
    CategoryNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("バックアップ作成に失敗: {path}: {source}")]
    Snapshot {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] gallery_sync_common::Error),
}

pub type Result<T> = std::result::Result<T, GallerySyncError>;
