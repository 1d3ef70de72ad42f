use clap::Parser;
use std::path::PathBuf;
use tactic_tagger::{cli, config, error, interactive, tagger};
use tactic_tagger_common::{ColumnType, Session};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, TaggerError};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Classify { input, column, output, format, summary, dictionary } => {
            println!("🏷  tactic-tagger - 分類\n");

            let column = tagger::resolve_column(column, &config)?;
            let store = tagger::build_store(&dictionary)?;
            println!("✔ カテゴリ: {}", store.labels().join(", "));

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let outcome = match tagger::run_classify(&input, &column, store, &output_dir, format, &config) {
                Err(TaggerError::Common(tactic_tagger_common::Error::EmptyTable)) => {
                    println!("⚠ 警告: {} にデータ行がありません。処理を中断します", input.display());
                    return Ok(());
                }
                other => other?,
            };
            println!("✔ {}行を分類（列: {}）", outcome.rows, column);

            if summary {
                println!();
                for line in tagger::summary_lines(&outcome.summary) {
                    println!("{}", line);
                }
            }

            for path in &outcome.written {
                println!("✔ 出力: {}", path.display());
            }
            println!("\n✅ 分類完了");
        }

        Commands::Columns { input } => {
            let table = tagger::read_input(&input)?;
            println!("{} ({}行)", input.display(), table.len());
            for header in table.headers() {
                let ty = table.column_type(header).unwrap_or(ColumnType::Text);
                println!("  {} [{}]", header, ty);
            }
        }

        Commands::Dictionary { json, dictionary } => {
            let store = tagger::build_store(&dictionary)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&store.to_json())?);
            } else {
                for line in tagger::dictionary_lines(&store) {
                    println!("{}", line);
                }
            }
        }

        Commands::Session { input, dictionary } => {
            println!("🏷  tactic-tagger - 対話モード\n");
            let store = tagger::build_store(&dictionary)?;
            let mut session = Session::with_store(store);
            interactive::run_interactive_session(&mut session, input.as_deref(), &config)?;
        }

        Commands::Config { set_output_name, set_default_column, clear_default_column, show } => {
            let mut config = config;

            if let Some(name) = set_output_name {
                config.set_output_name(name)?;
                println!("✔ 出力ファイル名を設定しました");
            }

            if let Some(column) = set_default_column {
                config.set_default_column(Some(column))?;
                println!("✔ 既定の分類列を設定しました");
            } else if clear_default_column {
                config.set_default_column(None)?;
                println!("✔ 既定の分類列を解除しました");
            }

            if show {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  出力ファイル名: {}", config.output_file_name);
                println!("  既定の分類列: {}", config.default_column.as_deref().unwrap_or("未設定"));
            }
        }
    }

    Ok(())
}
