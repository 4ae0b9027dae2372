use super::workbook::{SheetData, WorkbookData};
use super::{SheetConflict, SheetOutcome, SheetWriter, Table};
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// ファイルを作らずにブックをメモリ上に保持する書き込み先
#[derive(Debug, Clone, Default)]
pub struct MemorySheetWriter {
    books: BTreeMap<PathBuf, WorkbookData>,
}

impl MemorySheetWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存ブックがある状態から始める
    pub fn with_workbook(mut self, path: impl Into<PathBuf>, book: WorkbookData) -> Self {
        self.books.insert(path.into(), book);
        self
    }

    pub fn workbook(&self, path: &Path) -> Option<&WorkbookData> {
        self.books.get(path)
    }
}

impl SheetWriter for MemorySheetWriter {
    fn write_sheet(
        &mut self,
        path: &Path,
        sheet_name: &str,
        table: &Table,
        conflict: SheetConflict,
    ) -> Result<SheetOutcome> {
        match self.books.get_mut(path) {
            Some(book) => book.upsert_sheet(sheet_name, table, conflict),
            None => {
                let book = WorkbookData {
                    sheets: vec![SheetData::from_table(sheet_name, table)],
                };
                self.books.insert(path.to_path_buf(), book);
                Ok(SheetOutcome::CreatedFile)
            }
        }
    }
}
