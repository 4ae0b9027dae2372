//! name-xref
//!
//! 検索元フォルダのファイル名（拡張子なし）が、検索先フォルダのどのファイルの
//! 内容に含まれているかを調べ、結果をExcelのシートに書き出す。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filesystem;
pub mod matcher;
pub mod report;
pub mod runner;
pub mod scanner;
