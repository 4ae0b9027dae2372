use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 検索文字列1件分の照合結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    pub candidate: String,
    pub files: Vec<PathBuf>,
}

/// 照合結果（検索文字列 → ヒットしたファイルパス）
///
/// キーは検索文字列の初出順。ヒットなしの検索文字列もキーとして必ず残る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    entries: Vec<MatchEntry>,
    /// 検索文字列 → entries の位置
    index: HashMap<String, usize>,
}

impl MatchResult {
    /// 全検索文字列を空のヒットリストで初期化（重複は1つにまとめる）
    pub fn with_candidates(candidates: &[String]) -> Self {
        let mut entries: Vec<MatchEntry> = Vec::with_capacity(candidates.len());
        let mut index = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            if index.contains_key(candidate) {
                continue;
            }
            index.insert(candidate.clone(), entries.len());
            entries.push(MatchEntry {
                candidate: candidate.clone(),
                files: Vec::new(),
            });
        }
        Self { entries, index }
    }

    pub fn get(&self, candidate: &str) -> Option<&[PathBuf]> {
        self.index
            .get(candidate)
            .map(|&i| self.entries[i].files.as_slice())
    }

    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.candidate.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1件以上ヒットした検索文字列の数
    pub fn matched_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.files.is_empty()).count()
    }

    /// 本文に含まれる検索文字列すべてにパスを記録し、記録した件数を返す
    pub(crate) fn record_content(&mut self, path: &Path, content: &str) -> usize {
        let mut recorded = 0;
        for entry in &mut self.entries {
            if content.contains(entry.candidate.as_str()) {
                entry.files.push(path.to_path_buf());
                recorded += 1;
            }
        }
        recorded
    }
}
