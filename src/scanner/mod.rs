use crate::error::Result;
use crate::filesystem::{FileSystem, OsFileSystem};
use std::path::Path;

/// 拡張子を除いたファイル名（最後の拡張子のみ除去）
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// フォルダ配下（サブフォルダ含む）の全ファイルの拡張子なしファイル名を走査順で返す
///
/// 同名ファイルは重複したまま返す。
pub fn list_base_names(fs: &dyn FileSystem, folder: &Path) -> Result<Vec<String>> {
    let names: Vec<String> = fs
        .walk_files(folder)?
        .iter()
        .map(|path| base_name(path))
        .collect();

    tracing::debug!(folder = %folder.display(), count = names.len(), "ファイル名を取得");
    Ok(names)
}

pub fn scan_folder(folder: &Path) -> Result<Vec<String>> {
    list_base_names(&OsFileSystem, folder)
}
