use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use name_xref::{cli, config, export, filesystem, runner, scanner};
use cli::{Cli, Commands};
use config::{Config, ConfigOverrides};
use export::excel::XlsxSheetWriter;
use filesystem::OsFileSystem;
use runner::Runner;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    execute(cli)
}

/// 設定ファイルのパスを決めて読み込む
fn load_config(path_arg: Option<&Path>) -> anyhow::Result<(PathBuf, Config)> {
    let config_path = match path_arg {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)
        .with_context(|| format!("設定ファイルを読み込めません: {}", config_path.display()))?;
    Ok((config_path, config))
}

// 設定ファイルは使うコマンドでだけ読む（list は設定に依存しない）
fn execute(cli: Cli) -> anyhow::Result<()> {
    let config_arg = cli.config.as_deref();

    match cli.command {
        Commands::List { folder } => {
            let names = scanner::scan_folder(&folder)?;
            for name in &names {
                println!("{}", name);
            }
            tracing::debug!(count = names.len(), "一覧表示完了");
        }

        Commands::Search { folders } => {
            println!("🔎 name-xref - ファイル名検索\n");

            let (_, mut config) = load_config(config_arg)?;
            config.apply(folders.into_overrides());
            let run_config = config.resolve(false)?;

            let mut writer = XlsxSheetWriter;
            Runner::new(&OsFileSystem, &mut writer)
                .with_progress(scan_progress_bar())
                .run(&run_config, &mut std::io::stdout())?;

            println!("\n✅ 検索完了");
        }

        Commands::Run { folders, output, sheet, row_policy, on_conflict } => {
            println!("🚀 name-xref - 検索・Excel出力\n");

            let (_, mut config) = load_config(config_arg)?;
            config.apply(ConfigOverrides {
                output_path: output,
                sheet_name_template: sheet,
                row_policy,
                sheet_conflict: on_conflict,
                ..folders.into_overrides()
            });
            let run_config = config.resolve(true)?;

            let mut writer = XlsxSheetWriter;
            Runner::new(&OsFileSystem, &mut writer)
                .with_progress(scan_progress_bar())
                .run(&run_config, &mut std::io::stdout())
                .context("処理を中断しました")?;

            println!("\n✅ 完了");
        }

        Commands::Config { show, init } => {
            let (config_path, config) = load_config(config_arg)?;
            if init {
                if config_path.exists() {
                    println!("設定ファイルは既に存在します: {}", config_path.display());
                } else {
                    Config::default().save_to(&config_path)?;
                    println!("✔ 設定ファイルを作成しました: {}", config_path.display());
                }
            }

            if show || !init {
                let path_or_unset = |p: &Option<PathBuf>| {
                    p.as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                };
                println!("設定 ({}):", config_path.display());
                println!("  検索元フォルダ: {}", path_or_unset(&config.source_dir));
                println!("  検索先フォルダ: {}", path_or_unset(&config.destination_dir));
                println!("  出力ファイル: {}", path_or_unset(&config.output_path));
                println!("  シート名: {}", config.sheet_name_template);
                println!("  見出し: {} / {}", config.headers[0], config.headers[1]);
                println!("  出力行: {}", config.row_policy);
                println!("  同名シート: {}", config.sheet_conflict);
            }
        }
    }

    Ok(())
}

fn scan_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("  [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ファイル")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use tempfile::tempdir;

    fn broken_config(dir: &Path) -> PathBuf {
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        path
    }

    #[test]
    fn test_list_ignores_broken_config() {
        let dir = tempdir().unwrap();
        let config = broken_config(dir.path());
        let folder = dir.path().join("src");
        std::fs::create_dir(&folder).unwrap();
        std::fs::write(folder.join("report.txt"), "").unwrap();

        let cli = Cli::try_parse_from([
            OsStr::new("name-xref"),
            OsStr::new("-c"),
            config.as_os_str(),
            OsStr::new("list"),
            folder.as_os_str(),
        ])
        .unwrap();

        assert!(execute(cli).is_ok());
    }

    #[test]
    fn test_config_command_reports_broken_config() {
        let dir = tempdir().unwrap();
        let config = broken_config(dir.path());

        let cli = Cli::try_parse_from([
            OsStr::new("name-xref"),
            OsStr::new("-c"),
            config.as_os_str(),
            OsStr::new("config"),
            OsStr::new("--show"),
        ])
        .unwrap();

        let err = execute(cli).unwrap_err();
        assert!(err.to_string().contains("設定ファイルを読み込めません"));
    }

    #[test]
    fn test_load_config_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("none.json");

        let (resolved, config) = load_config(Some(&path)).unwrap();
        assert_eq!(resolved, path);
        assert_eq!(config.sheet_name_template, Config::default().sheet_name_template);
    }
}
