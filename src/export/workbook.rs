//! ブックのメモリ表現
//!
//! 既存ブックを読み込んだ内容にシートを追加・置換・追記する処理は
//! 実ファイル用と検証用のどちらの書き込み先でもここを通る。

use super::{SheetConflict, SheetOutcome, Table};
use crate::error::{NameXrefError, Result};

/// セルの値（書式・数式は保持しない）
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    String(String),
    Number(f64),
    Bool(bool),
    /// 日付・時刻（Excelシリアル値）
    DateTime(f64),
    /// 経過時間（Excelシリアル値）
    Duration(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::String(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::DateTime(n) | Cell::Duration(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    /// A1起点の行優先グリッド
    pub rows: Vec<Vec<Cell>>,
    /// 1行目を見出しとして装飾するか
    pub styled_header: bool,
}

impl SheetData {
    pub fn from_table(name: &str, table: &Table) -> Self {
        let mut rows = Vec::with_capacity(table.rows.len() + 1);
        rows.push(text_row(&table.headers));
        rows.extend(table.rows.iter().map(text_row));

        Self {
            name: name.to_string(),
            rows,
            styled_header: true,
        }
    }

    /// 値の入っていない末尾行を除いた行数
    pub fn used_rows(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|c| !c.is_empty()))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn append_table(&mut self, table: &Table) {
        let used = self.used_rows();
        self.rows.truncate(used);

        if used == 0 {
            self.rows.push(text_row(&table.headers));
            self.styled_header = true;
        }
        self.rows.extend(table.rows.iter().map(text_row));
    }

    /// セル値を文字列として取り出す（確認用）
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Cell::as_text).collect())
            .collect()
    }
}

fn text_row(values: &[String; 2]) -> Vec<Cell> {
    values.iter().map(|v| Cell::String(v.clone())).collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookData {
    pub sheets: Vec<SheetData>,
}

impl WorkbookData {
    /// シート名で検索（Excelと同じく大文字小文字を区別しない）
    pub fn position(&self, name: &str) -> Option<usize> {
        let lower = name.to_lowercase();
        self.sheets.iter().position(|s| s.name.to_lowercase() == lower)
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetData> {
        self.position(name).map(|i| &self.sheets[i])
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// シートを追加し、同名シートがあれば方針に従って解決する
    pub fn upsert_sheet(
        &mut self,
        name: &str,
        table: &Table,
        conflict: SheetConflict,
    ) -> Result<SheetOutcome> {
        let Some(index) = self.position(name) else {
            self.sheets.push(SheetData::from_table(name, table));
            return Ok(SheetOutcome::AddedSheet);
        };

        match conflict {
            SheetConflict::Overwrite => {
                self.sheets[index] = SheetData::from_table(name, table);
                Ok(SheetOutcome::ReplacedSheet)
            }
            SheetConflict::Reject => Err(NameXrefError::SheetExists(name.to_string())),
            SheetConflict::Merge => {
                self.sheets[index].append_table(table);
                Ok(SheetOutcome::MergedSheet)
            }
        }
    }
}
