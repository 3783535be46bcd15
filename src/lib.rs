//! gallery-sync
//!
//! カテゴリフォルダの画像を gallery-index.json に反映する。

pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod store;
pub mod sync;
