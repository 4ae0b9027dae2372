//! ファイル内容照合モジュール
//!
//! 検索先フォルダの全ファイルを読み込み、各検索文字列が本文に
//! 部分一致で含まれるかを判定する。読めないファイルは警告を出してスキップ。

mod types;

pub use types::{MatchEntry, MatchResult};

use crate::error::Result;
use crate::filesystem::FileSystem;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// 読み込めずにスキップしたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub matches: MatchResult,
    /// 読み込めたファイル数
    pub scanned: usize,
    pub skipped: Vec<SkippedFile>,
}

pub struct Matcher<'a> {
    fs: &'a dyn FileSystem,
    progress: Option<ProgressBar>,
}

impl<'a> Matcher<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs, progress: None }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn search(&self, folder: &Path, candidates: &[String]) -> Result<SearchOutcome> {
        // 重複した検索文字列は1キーにまとめ、同じファイルを二重に記録しない
        let mut outcome = SearchOutcome {
            matches: MatchResult::with_candidates(candidates),
            ..Default::default()
        };

        let files = self.fs.walk_files(folder)?;
        if let Some(pb) = &self.progress {
            pb.set_length(files.len() as u64);
        }

        for path in files {
            match self.fs.read_to_string(&path) {
                Ok(content) => {
                    let hits = outcome.matches.record_content(&path, &content);
                    if hits > 0 {
                        tracing::debug!(path = %path.display(), hits, "検索文字列を検出");
                    }
                    outcome.scanned += 1;
                }
                Err(e) => {
                    self.warn(|| {
                        tracing::warn!(path = %path.display(), error = %e, "ファイルを読み込めません");
                    });
                    outcome.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }

            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        Ok(outcome)
    }

    fn warn(&self, log: impl FnOnce()) {
        match &self.progress {
            Some(pb) => pb.suspend(log),
            None => log(),
        }
    }
}

/// 照合結果のみが必要な場合の簡易版
pub fn search_in_folder(
    fs: &dyn FileSystem,
    folder: &Path,
    candidates: &[String],
) -> Result<MatchResult> {
    Ok(Matcher::new(fs).search(folder, candidates)?.matches)
}
