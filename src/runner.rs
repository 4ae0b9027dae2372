//! 検索元の取得 → 内容照合 → Excel出力 を順に実行する

use crate::config::RunConfig;
use crate::error::Result;
use crate::export::{self, sheet_name, SheetOutcome, SheetWriter, Table};
use crate::filesystem::FileSystem;
use crate::matcher::{Matcher, SearchOutcome};
use crate::report;
use crate::scanner;
use indicatif::ProgressBar;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub sheet_name: String,
    pub rows: usize,
    pub outcome: SheetOutcome,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    /// 検索元から取得したファイル名（重複含む）
    pub candidates: Vec<String>,
    pub search: SearchOutcome,
    pub export: Option<ExportReport>,
}

pub struct Runner<'a> {
    fs: &'a dyn FileSystem,
    writer: &'a mut dyn SheetWriter,
    progress: Option<ProgressBar>,
}

impl<'a> Runner<'a> {
    pub fn new(fs: &'a dyn FileSystem, writer: &'a mut dyn SheetWriter) -> Self {
        Self {
            fs,
            writer,
            progress: None,
        }
    }

    /// 内容照合中にプログレスバーを表示
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn run(&mut self, config: &RunConfig, out: &mut dyn Write) -> Result<RunReport> {
        let steps = if config.export.is_some() { 3 } else { 2 };

        // 1. 検索元のファイル名
        writeln!(out, "[1/{}] 検索元のファイル名を取得中... ({})", steps, config.source_dir.display())?;
        let candidates = scanner::list_base_names(self.fs, &config.source_dir)?;
        writeln!(out, "✔ {}件のファイル名を取得\n", candidates.len())?;

        // 2. 内容照合
        writeln!(out, "[2/{}] ファイル内容を照合中... ({})", steps, config.destination_dir.display())?;
        let mut matcher = Matcher::new(self.fs);
        if let Some(pb) = &self.progress {
            matcher = matcher.with_progress(pb.clone());
        }
        let search = matcher.search(&config.destination_dir, &candidates)?;

        report::write_matches(out, &search.matches)?;
        report::write_skipped(out, &search.skipped)?;
        report::write_summary(out, &search)?;

        // 3. Excel出力
        let export = match &config.export {
            Some(settings) => {
                writeln!(out, "\n[3/{}] Excelに出力中...", steps)?;

                let name = sheet_name::render_today(
                    &settings.sheet_name_template,
                    &config.destination_dir,
                    &config.source_dir,
                )?;
                let rows = export::build_rows(&search.matches, settings.row_policy);
                let table = Table::from_rows(&settings.headers, &rows);

                let outcome = export::export_table(
                    &mut *self.writer,
                    &settings.output_path,
                    &name,
                    &table,
                    settings.sheet_conflict,
                )?;

                let export_report = ExportReport {
                    output_path: settings.output_path.clone(),
                    sheet_name: name,
                    rows: table.rows.len(),
                    outcome,
                };
                report::write_export(out, &export_report)?;
                Some(export_report)
            }
            None => None,
        };

        Ok(RunReport {
            candidates,
            search,
            export,
        })
    }
}

/// プログレスバーなしで一括実行
pub fn run(
    config: &RunConfig,
    fs: &dyn FileSystem,
    writer: &mut dyn SheetWriter,
    out: &mut dyn Write,
) -> Result<RunReport> {
    Runner::new(fs, writer).run(config, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportSettings;
    use crate::error::NameXrefError;
    use crate::export::memory::MemorySheetWriter;
    use crate::export::{RowPolicy, SheetConflict};
    use crate::filesystem::MemoryFileSystem;
    use std::path::Path;

    fn run_config(export: Option<ExportSettings>) -> RunConfig {
        RunConfig {
            source_dir: "/work/SRD".into(),
            destination_dir: "/work/SRW".into(),
            export,
        }
    }

    fn settings(row_policy: RowPolicy, sheet_conflict: SheetConflict) -> ExportSettings {
        ExportSettings {
            output_path: "/out/result.xlsx".into(),
            sheet_name_template: sheet_name::DEFAULT_TEMPLATE.into(),
            headers: ["file".into(), "name".into()],
            row_policy,
            sheet_conflict,
        }
    }

    fn sample_fs() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("/work/SRD/A.txt", "")
            .with_file("/work/SRD/B.csv", "")
            .with_file("/work/SRD/sub/C.txt", "")
            .with_file("/work/SRW/doc.md", "... refers to A and also B ...")
            .with_file("/work/SRW/other.md", "A again")
            .with_unreadable("/work/SRW/secret.md")
    }

    #[test]
    fn test_search_only_run() {
        let fs = sample_fs();
        let mut writer = MemorySheetWriter::new();
        let mut out = Vec::new();

        let report = run(&run_config(None), &fs, &mut writer, &mut out).unwrap();

        assert_eq!(report.candidates, vec!["A", "B", "C"]);
        assert_eq!(report.search.scanned, 2);
        assert_eq!(report.search.skipped.len(), 1);
        assert_eq!(
            report.search.matches.get("A").unwrap(),
            &[PathBuf::from("/work/SRW/doc.md"), PathBuf::from("/work/SRW/other.md")]
        );
        assert!(report.search.matches.get("C").unwrap().is_empty());
        assert!(report.export.is_none());
        assert!(writer.workbook(Path::new("/out/result.xlsx")).is_none());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[1/2]"));
        assert!(text.contains("'C' はどのファイルにも見つかりません"));
    }

    #[test]
    fn test_run_with_export_creates_sheet() {
        let fs = sample_fs();
        let mut writer = MemorySheetWriter::new();
        let mut out = Vec::new();
        let config = run_config(Some(settings(RowPolicy::All, SheetConflict::Overwrite)));

        let report = run(&config, &fs, &mut writer, &mut out).unwrap();

        let export = report.export.unwrap();
        assert_eq!(export.sheet_name, "SRW→SRD");
        assert_eq!(export.rows, 3);
        assert_eq!(export.outcome, SheetOutcome::CreatedFile);

        let book = writer.workbook(Path::new("/out/result.xlsx")).unwrap();
        assert_eq!(
            book.sheet("SRW→SRD").unwrap().text_rows(),
            vec![
                vec!["file", "name"],
                vec!["doc", "A"],
                vec!["other", "A"],
                vec!["doc", "B"],
            ]
        );
    }

    #[test]
    fn test_second_run_follows_conflict_policy() {
        let fs = sample_fs();
        let mut writer = MemorySheetWriter::new();
        let mut out = Vec::new();

        let first = run_config(Some(settings(RowPolicy::First, SheetConflict::Overwrite)));
        run(&first, &fs, &mut writer, &mut out).unwrap();

        let merge = run_config(Some(settings(RowPolicy::First, SheetConflict::Merge)));
        let report = run(&merge, &fs, &mut writer, &mut out).unwrap();
        assert_eq!(report.export.unwrap().outcome, SheetOutcome::MergedSheet);

        let book = writer.workbook(Path::new("/out/result.xlsx")).unwrap();
        assert_eq!(book.sheets[0].text_rows().len(), 1 + 2 + 2);

        let reject = run_config(Some(settings(RowPolicy::First, SheetConflict::Reject)));
        let result = run(&reject, &fs, &mut writer, &mut out);
        assert!(matches!(result, Err(NameXrefError::SheetExists(_))));
    }

    #[test]
    fn test_missing_source_folder_aborts() {
        let fs = MemoryFileSystem::new().with_file("/work/SRW/doc.md", "A");
        let mut writer = MemorySheetWriter::new();
        let mut out = Vec::new();

        let result = run(&run_config(None), &fs, &mut writer, &mut out);
        assert!(matches!(result, Err(NameXrefError::FolderNotFound(_))));
    }
}
