//! Gallery Sync Common Library
//!
//! インデックスの型・URLテンプレート・照合ロジック（ファイルI/Oなし）

pub mod types;
pub mod url;
pub mod reconcile;
pub mod layout;
pub mod error;

pub use types::{GalleryIndex, CategoryRecord, ImageRecord, IndexIssue};
pub use url::{UrlScheme, DEFAULT_HOST};
pub use reconcile::{CategoryListing, CategoryAddition, Reconciliation, reconcile};
pub use layout::{IndexLayout, render};
pub use error::{Error, Result};
