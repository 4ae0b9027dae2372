//! コンソール出力

use crate::export::SheetOutcome;
use crate::matcher::{MatchResult, SearchOutcome, SkippedFile};
use crate::runner::ExportReport;
use std::io::{self, Write};

/// 検索文字列ごとのヒット状況
pub fn write_matches(out: &mut dyn Write, matches: &MatchResult) -> io::Result<()> {
    for entry in matches.entries() {
        if entry.files.is_empty() {
            writeln!(out, "  ✗ '{}' はどのファイルにも見つかりません", entry.candidate)?;
            continue;
        }

        writeln!(
            out,
            "  ✔ '{}' が{}件のファイルで見つかりました:",
            entry.candidate,
            entry.files.len()
        )?;
        for file in &entry.files {
            writeln!(out, "      {}", file.display())?;
        }
    }
    Ok(())
}

pub fn write_skipped(out: &mut dyn Write, skipped: &[SkippedFile]) -> io::Result<()> {
    if skipped.is_empty() {
        return Ok(());
    }

    writeln!(out, "⚠ {}件のファイルを読み込めませんでした:", skipped.len())?;
    for file in skipped {
        writeln!(out, "      {}: {}", file.path.display(), file.reason)?;
    }
    Ok(())
}

pub fn write_summary(out: &mut dyn Write, outcome: &SearchOutcome) -> io::Result<()> {
    writeln!(
        out,
        "✔ 照合完了: {}/{}件がヒット ({}ファイルを検索)",
        outcome.matches.matched_count(),
        outcome.matches.len(),
        outcome.scanned
    )
}

pub fn write_export(out: &mut dyn Write, report: &ExportReport) -> io::Result<()> {
    let action = match report.outcome {
        SheetOutcome::CreatedFile => "新規ファイルを作成",
        SheetOutcome::AddedSheet => "既存ファイルにシートを追加",
        SheetOutcome::ReplacedSheet => "既存シートを上書き",
        SheetOutcome::MergedSheet => "既存シートに追記",
    };

    writeln!(
        out,
        "✔ {}: {} (シート: {}, {}行)",
        action,
        report.output_path.display(),
        report.sheet_name,
        report.rows
    )
}
