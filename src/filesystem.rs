//! ファイルシステム抽象化
//!
//! 走査と読み込みをトレイトに切り出し、テストではメモリ上のツリーを使う。

use crate::error::{NameXrefError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub trait FileSystem {
    /// `root` 配下の全ファイルを走査順に返す（サブフォルダを含む）
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// ファイル全体をUTF-8テキストとして読み込む
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// 実ファイルシステム（walkdir + std::fs）
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(NameXrefError::FolderNotFound(root.display().to_string()));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();

            // フォルダへのシンボリックリンクもフォルダ扱い
            if path.is_dir() {
                continue;
            }

            files.push(entry.into_path());
        }

        tracing::debug!(root = %root.display(), count = files.len(), "フォルダ走査完了");
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// メモリ上のファイルツリー
///
/// 内容が `None` のファイルは読み込み時に権限エラーを返す。
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, Option<Vec<u8>>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> Self {
        self.files.insert(path.into(), Some(content.as_ref().to_vec()));
        self
    }

    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into(), None);
        self
    }

    /// 空フォルダを登録
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    fn dir_exists(&self, root: &Path) -> bool {
        self.dirs.iter().any(|d| d.starts_with(root))
            || self.files.keys().any(|f| f.as_path() != root && f.starts_with(root))
    }
}

impl FileSystem for MemoryFileSystem {
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !self.dir_exists(root) {
            return Err(NameXrefError::FolderNotFound(root.display().to_string()));
        }

        Ok(self
            .files
            .keys()
            .filter(|path| path.as_path() != root && path.starts_with(root))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.files.get(path) {
            Some(Some(bytes)) => String::from_utf8(bytes.clone())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Some(None) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_os_walk_missing_folder() {
        let result = OsFileSystem.walk_files(Path::new("/nonexistent/name-xref/12345"));
        assert!(matches!(result, Err(NameXrefError::FolderNotFound(_))));
    }

    #[test]
    fn test_os_walk_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("sub/deeper/c.txt"), "c").unwrap();

        let files = OsFileSystem.walk_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("sub/deeper/c.txt"),
            ]
        );
    }

    #[test]
    fn test_os_walk_rejects_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        assert!(OsFileSystem.walk_files(&file).is_err());
    }

    #[test]
    fn test_memory_read_errors() {
        let fs = MemoryFileSystem::new()
            .with_file("/d/bad.bin", [0xffu8, 0xfe, 0x00])
            .with_unreadable("/d/locked.txt");

        let err = fs.read_to_string(Path::new("/d/bad.bin")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err = fs.read_to_string(Path::new("/d/locked.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_memory_walk_only_under_root() {
        let fs = MemoryFileSystem::new()
            .with_file("/src/a.txt", "")
            .with_file("/src/nested/b.txt", "")
            .with_file("/srcx/c.txt", "")
            .with_dir("/empty");

        let files = fs.walk_files(Path::new("/src")).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("/src/a.txt"), PathBuf::from("/src/nested/b.txt")]
        );

        assert!(fs.walk_files(Path::new("/empty")).unwrap().is_empty());
        assert!(fs.walk_files(Path::new("/missing")).is_err());
    }
}
