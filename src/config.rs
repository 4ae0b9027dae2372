use crate::error::{NameXrefError, Result};
use crate::export::sheet_name::DEFAULT_TEMPLATE;
use crate::export::{RowPolicy, SheetConflict};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 設定ファイル（~/.config/name-xref/config.json）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 検索元フォルダ（ファイル名を取得する側）
    pub source_dir: Option<PathBuf>,
    /// 検索先フォルダ（ファイル内容を検索する側）
    pub destination_dir: Option<PathBuf>,
    /// 出力Excelファイル
    pub output_path: Option<PathBuf>,
    pub sheet_name_template: String,
    pub headers: [String; 2],
    pub row_policy: RowPolicy,
    pub sheet_conflict: SheetConflict,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: None,
            destination_dir: None,
            output_path: None,
            sheet_name_template: DEFAULT_TEMPLATE.into(),
            headers: ["ファイル名".into(), "検索文字列".into()],
            row_policy: RowPolicy::All,
            sheet_conflict: SheetConflict::Overwrite,
        }
    }
}

/// コマンドライン引数による上書き
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source_dir: Option<PathBuf>,
    pub destination_dir: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub sheet_name_template: Option<String>,
    pub row_policy: Option<RowPolicy>,
    pub sheet_conflict: Option<SheetConflict>,
}

/// 1回の実行に必要な設定（パス確定済み）
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
    /// `None` の場合はExcel出力をしない
    pub export: Option<ExportSettings>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub output_path: PathBuf,
    pub sheet_name_template: String,
    pub headers: [String; 2],
    pub row_policy: RowPolicy,
    pub sheet_conflict: SheetConflict,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む（存在しなければデフォルト）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NameXrefError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("name-xref").join("config.json"))
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(v) = overrides.source_dir {
            self.source_dir = Some(v);
        }
        if let Some(v) = overrides.destination_dir {
            self.destination_dir = Some(v);
        }
        if let Some(v) = overrides.output_path {
            self.output_path = Some(v);
        }
        if let Some(v) = overrides.sheet_name_template {
            self.sheet_name_template = v;
        }
        if let Some(v) = overrides.row_policy {
            self.row_policy = v;
        }
        if let Some(v) = overrides.sheet_conflict {
            self.sheet_conflict = v;
        }
    }

    /// 検索元・検索先が揃っているか確認して実行設定を作る
    ///
    /// `with_export` が真なら出力先も必須。
    pub fn resolve(&self, with_export: bool) -> Result<RunConfig> {
        let source_dir = self.source_dir.clone().ok_or_else(|| {
            NameXrefError::Config("検索元フォルダが指定されていません (--source)".into())
        })?;
        let destination_dir = self.destination_dir.clone().ok_or_else(|| {
            NameXrefError::Config("検索先フォルダが指定されていません (--destination)".into())
        })?;

        let export = if with_export {
            let output_path = self.output_path.clone().ok_or_else(|| {
                NameXrefError::Config("出力ファイルが指定されていません (--output)".into())
            })?;
            Some(ExportSettings {
                output_path,
                sheet_name_template: self.sheet_name_template.clone(),
                headers: self.headers.clone(),
                row_policy: self.row_policy,
                sheet_conflict: self.sheet_conflict,
            })
        } else {
            None
        };

        Ok(RunConfig {
            source_dir,
            destination_dir,
            export,
        })
    }
}
