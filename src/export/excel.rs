//! Excel出力
//!
//! 既存ブックは calamine で値を読み込み、シートを追加・置換したうえで
//! rust_xlsxwriter でブック全体を書き直す。

use super::workbook::{Cell, SheetData, WorkbookData};
use super::{SheetConflict, SheetOutcome, SheetWriter, Table};
use crate::error::{NameXrefError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::*;
use std::io::Write;
use std::path::Path;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSheetWriter;

impl SheetWriter for XlsxSheetWriter {
    fn write_sheet(
        &mut self,
        path: &Path,
        sheet_name: &str,
        table: &Table,
        conflict: SheetConflict,
    ) -> Result<SheetOutcome> {
        if !path.exists() {
            let book = WorkbookData {
                sheets: vec![SheetData::from_table(sheet_name, table)],
            };
            save_workbook(&book, path)?;
            return Ok(SheetOutcome::CreatedFile);
        }

        let mut book = load_workbook(path)?;
        let outcome = book.upsert_sheet(sheet_name, table, conflict)?;
        save_workbook(&book, path)?;

        Ok(outcome)
    }
}

/// 既存ブックの全シートを値として読み込む
pub fn load_workbook(path: &Path) -> Result<WorkbookData> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| NameXrefError::ExcelRead(format!("{}: {}", path.display(), e)))?;

    let mut book = WorkbookData::default();

    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| NameXrefError::ExcelRead(format!("シート '{}' 読み込みエラー: {}", name, e)))?;

        // 範囲の開始位置までを空セルで埋めてA1起点にそろえる
        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); first_row as usize];

        for row in range.rows() {
            let mut cells = vec![Cell::Empty; first_col as usize];
            cells.extend(row.iter().map(cell_from_data));
            rows.push(cells);
        }

        book.sheets.push(SheetData {
            name,
            rows,
            styled_header: false,
        });
    }

    Ok(book)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::String(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => Cell::Duration(dt.as_f64()),
        Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        other => Cell::String(other.to_string()),
    }
}

/// ブック全体を書き出す
pub fn save_workbook(book: &WorkbookData, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));
    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);
    let duration_format = Format::new().set_num_format(DURATION_FORMAT);

    for sheet in &book.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| NameXrefError::ExcelGeneration(format!("シート名設定エラー: {}", e)))?;

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_num = row_idx as u32;
            let is_header = sheet.styled_header && row_idx == 0;

            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = col_idx as u16;
                let written = match cell {
                    Cell::Empty => continue,
                    Cell::String(s) if is_header => {
                        worksheet.write_string_with_format(row_num, col_num, s, &header_format)
                    }
                    Cell::String(s) => worksheet.write_string(row_num, col_num, s),
                    Cell::Number(n) => worksheet.write_number(row_num, col_num, *n),
                    Cell::Bool(b) => worksheet.write_boolean(row_num, col_num, *b),
                    // 時刻部分がなければ日付のみ表示
                    Cell::DateTime(n) if n.fract() == 0.0 => {
                        worksheet.write_number_with_format(row_num, col_num, *n, &date_format)
                    }
                    Cell::DateTime(n) => {
                        worksheet.write_number_with_format(row_num, col_num, *n, &datetime_format)
                    }
                    Cell::Duration(n) => {
                        worksheet.write_number_with_format(row_num, col_num, *n, &duration_format)
                    }
                };
                written.map_err(|e| {
                    NameXrefError::ExcelGeneration(format!("セル書き込みエラー: {}", e))
                })?;
            }
        }

        worksheet.autofit();
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| NameXrefError::ExcelGeneration(format!("Excel保存エラー: {}", e)))?;

    // 同じフォルダの一時ファイルに書き出してから置き換える
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".name-xref-")
        .suffix(".xlsx")
        .tempfile_in(dir)?;
    temp.write_all(&buffer)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| NameXrefError::Io(e.error))?;

    Ok(())
}
