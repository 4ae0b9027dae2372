//! シート名の生成
//!
//! テンプレートのプレースホルダ:
//! - `{dest}`: 検索先フォルダ名
//! - `{src}`: 検索元フォルダ名
//! - `{date}`: 実行日 (YYYYMMDD)

use crate::error::{NameXrefError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;

pub const DEFAULT_TEMPLATE: &str = "{dest}→{src}";

/// Excelのシート名の最大文字数
pub const MAX_SHEET_NAME_CHARS: usize = 31;

lazy_static::lazy_static! {
    // Excelでシート名に使えない文字
    static ref INVALID_CHARS_RE: Regex = Regex::new(r"[\[\]:*?/\\]").unwrap();
}

/// フォルダの表示名（末尾要素がなければ正規化した絶対パスから取る）
pub fn folder_label(folder: &Path) -> String {
    if let Some(name) = folder.file_name() {
        return name.to_string_lossy().to_string();
    }

    folder
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| folder.display().to_string())
}

/// テンプレートを展開し、シート名として使える形に整える
pub fn render(template: &str, destination: &Path, source: &Path, date: NaiveDate) -> Result<String> {
    let raw = template
        .replace("{dest}", &folder_label(destination))
        .replace("{src}", &folder_label(source))
        .replace("{date}", &date.format("%Y%m%d").to_string());

    let name = sanitize(&raw);
    validate(&name)?;
    Ok(name)
}

pub fn render_today(template: &str, destination: &Path, source: &Path) -> Result<String> {
    render(template, destination, source, chrono::Local::now().date_naive())
}

/// 使用できない文字を `_` に置換し、31文字に切り詰める（前後の `'` は除去）
pub fn sanitize(raw: &str) -> String {
    let replaced = INVALID_CHARS_RE.replace_all(raw.trim_matches('\''), "_");
    let truncated: String = replaced.chars().take(MAX_SHEET_NAME_CHARS).collect();
    truncated.trim_end_matches('\'').to_string()
}

pub fn validate(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(NameXrefError::InvalidSheetName("空のシート名".into()));
    }
    if name.chars().count() > MAX_SHEET_NAME_CHARS {
        return Err(NameXrefError::InvalidSheetName(format!(
            "{} ({}文字以内にしてください)",
            name, MAX_SHEET_NAME_CHARS
        )));
    }
    if INVALID_CHARS_RE.is_match(name) || name.starts_with('\'') || name.ends_with('\'') {
        return Err(NameXrefError::InvalidSheetName(name.to_string()));
    }
    Ok(())
}
