use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameXrefError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("フォルダ走査エラー: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel読み込みエラー: {0}")]
    ExcelRead(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("シート名が不正です: {0}")]
    InvalidSheetName(String),

    #[error("シート '{0}' は既に存在します（--on-conflict overwrite/merge で上書き・追記できます）")]
    SheetExists(String),
}

pub type Result<T> = std::result::Result<T, NameXrefError>;
