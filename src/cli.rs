use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tactic-tagger")]
#[command(about = "キーワード辞書でマーケティング文言をカテゴリ分類するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 辞書の初期値と編集内容
#[derive(Args, Clone, Debug, Default)]
pub struct DictionaryArgs {
    /// 辞書JSONファイル（省略時は組み込みの既定辞書）
    #[arg(short, long)]
    pub dictionary: Option<PathBuf>,

    /// 既存カテゴリのキーワードを置き換え (label=kw1,kw2)
    #[arg(long = "set", value_name = "LABEL=KEYWORDS")]
    pub edits: Vec<String>,

    /// カテゴリを追加・上書き (label=kw1,kw2)
    #[arg(long = "add", value_name = "LABEL=KEYWORDS")]
    pub additions: Vec<String>,

    /// カテゴリを削除
    #[arg(long = "remove", value_name = "LABEL")]
    pub removals: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSVの指定列を分類して Category 列を付けて出力
    Classify {
        /// 入力ファイル（CSV / Excel）
        #[arg(required = true)]
        input: PathBuf,

        /// 分類する列名（省略時は設定の既定列）
        #[arg(short, long)]
        column: Option<String>,

        /// 出力ファイル/ディレクトリ（デフォルト: カレントディレクトリ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// カテゴリごとの件数を表示
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        dictionary: DictionaryArgs,
    },

    /// 入力ファイルの列一覧を表示
    Columns {
        /// 入力ファイル（CSV / Excel）
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 辞書を表示
    Dictionary {
        /// JSONで出力
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        dictionary: DictionaryArgs,
    },

    /// 対話的に辞書を編集して分類
    Session {
        /// 最初に読み込むファイル
        input: Option<PathBuf>,

        #[command(flatten)]
        dictionary: DictionaryArgs,
    },

    /// 設定を表示/編集
    Config {
        /// 出力ファイル名を設定
        #[arg(long)]
        set_output_name: Option<String>,

        /// 既定の分類列を設定
        #[arg(long)]
        set_default_column: Option<String>,

        /// 既定の分類列を解除
        #[arg(long)]
        clear_default_column: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Excel));
        assert_eq!("both".parse::<ExportFormat>(), Ok(ExportFormat::Both));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify_args() {
        let cli = Cli::try_parse_from([
            "tactic-tagger",
            "classify",
            "in.csv",
            "--column",
            "text",
            "--set",
            "urgency_marketing=hurry,now",
            "--add",
            "calm=relax",
            "--add",
            "soft=maybe",
            "--remove",
            "exclusive_marketing",
        ])
        .unwrap();

        match cli.command {
            Commands::Classify { column, dictionary, format, .. } => {
                assert_eq!(column.as_deref(), Some("text"));
                assert_eq!(format, ExportFormat::Csv);
                assert_eq!(dictionary.edits, vec!["urgency_marketing=hurry,now"]);
                assert_eq!(dictionary.additions.len(), 2);
                assert_eq!(dictionary.removals, vec!["exclusive_marketing"]);
            }
            _ => panic!("expected classify"),
        }
    }
}
