//! インデックスファイルの書式
//!
//! - Pretty: 2スペースインデント（手動確認向け）
//! - Compact: 画像1件を1行に詰めた書式（差分が行単位で見やすい）

use crate::error::{Error, Result};
use crate::types::GalleryIndex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexLayout {
    #[default]
    Pretty,
    Compact,
}

impl std::str::FromStr for IndexLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "indent" => Ok(IndexLayout::Pretty),
            "compact" | "line" => Ok(IndexLayout::Compact),
            _ => Err(format!("Unknown layout: {}. Use pretty or compact", s)),
        }
    }
}

impl std::fmt::Display for IndexLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexLayout::Pretty => write!(f, "pretty"),
            IndexLayout::Compact => write!(f, "compact"),
        }
    }
}

impl IndexLayout {
    /// 既存ファイルの書式を判定（先頭が `{"` なら Compact）
    pub fn detect(content: &str) -> Self {
        if content.trim_start().starts_with("{\"") {
            IndexLayout::Compact
        } else {
            IndexLayout::Pretty
        }
    }
}

/// インデックスを指定の書式で文字列化（末尾改行なし）
pub fn render(index: &GalleryIndex, layout: IndexLayout) -> Result<String> {
    match layout {
        IndexLayout::Pretty => Ok(serde_json::to_string_pretty(index)?),
        IndexLayout::Compact => render_compact(index),
    }
}

fn render_compact(index: &GalleryIndex) -> Result<String> {
    let Value::Object(top) = serde_json::to_value(index)? else {
        return Err(Error::Format("インデックスがオブジェクトではありません".into()));
    };

    let mut out = String::from("{");
    for (i, (key, value)) in top.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_key(&mut out, key)?;
        match (key.as_str(), value) {
            ("gallery", Value::Object(categories)) => push_gallery(&mut out, categories)?,
            _ => out.push_str(&serde_json::to_string(value)?),
        }
    }
    out.push('}');
    Ok(out)
}

fn push_gallery(out: &mut String, categories: &Map<String, Value>) -> Result<()> {
    out.push('{');
    for (i, (key, category)) in categories.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_key(out, key)?;
        match category {
            Value::Object(fields) => push_category(out, fields)?,
            other => out.push_str(&serde_json::to_string(other)?),
        }
    }
    out.push('}');
    Ok(())
}

fn push_category(out: &mut String, fields: &Map<String, Value>) -> Result<()> {
    out.push('{');
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_key(out, key)?;
        match (key.as_str(), value) {
            ("images", Value::Array(images)) => {
                out.push('[');
                for (j, image) in images.iter().enumerate() {
                    if j > 0 {
                        out.push(',');
                    }
                    out.push_str("\n  ");
                    out.push_str(&serde_json::to_string(image)?);
                }
                out.push(']');
            }
            _ => out.push_str(&serde_json::to_string(value)?),
        }
    }
    out.push('}');
    Ok(())
}

fn push_key(out: &mut String, key: &str) -> Result<()> {
    out.push_str(&serde_json::to_string(key)?);
    out.push(':');
    Ok(())
}
