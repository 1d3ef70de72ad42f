//! 分類パイプライン
//!
//! 辞書の組み立て → 表の読み込み → 列の選択 → 分類 → 出力 を1回分実行する。

use crate::cli::{DictionaryArgs, ExportFormat};
use crate::config::Config;
use crate::error::{Result, TaggerError};
use crate::export;
use std::path::{Path, PathBuf};
use tactic_tagger_common::loader::InputFormat;
use tactic_tagger_common::{load_table, DictionaryStore, Session, Table, TagSummary};

/// `label=kw1,kw2` をラベルとキーワード文字列に分ける
pub fn parse_rule(arg: &str) -> Result<(String, String)> {
    let (label, keywords) = arg
        .split_once('=')
        .ok_or_else(|| TaggerError::InvalidRule(arg.to_string()))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(TaggerError::InvalidRule(arg.to_string()));
    }
    Ok((label.to_string(), keywords.to_string()))
}

/// コマンドライン指定から辞書を組み立てる
///
/// 適用順: 読み込み（または既定値）→ `--set` → `--add` → `--remove`
pub fn build_store(args: &DictionaryArgs) -> Result<DictionaryStore> {
    let mut store = match &args.dictionary {
        Some(path) => {
            if !path.exists() {
                return Err(TaggerError::FileNotFound(path.display().to_string()));
            }
            DictionaryStore::from_file(path)?
        }
        None => DictionaryStore::with_defaults(),
    };

    for arg in &args.edits {
        let (label, keywords) = parse_rule(arg)?;
        // 未登録ラベルは dictionary 側で warn! を出す（追加は --add）
        store.edit(&label, &keywords);
    }

    for arg in &args.additions {
        let (label, keywords) = parse_rule(arg)?;
        store.add_or_update(&label, &keywords);
    }

    for label in &args.removals {
        if store.remove(label).is_none() {
            eprintln!("警告: 未登録のカテゴリ '{}'", label);
        }
    }

    tracing::debug!(categories = store.len(), "dictionary built");
    Ok(store)
}

/// 入力ファイルを表として読み込む
pub fn read_input(input: &Path) -> Result<Table> {
    if !input.exists() {
        return Err(TaggerError::FileNotFound(input.display().to_string()));
    }
    if InputFormat::from_path(input).is_none() {
        return Err(TaggerError::UnsupportedFormat(input.display().to_string()));
    }
    Ok(load_table(input)?)
}

/// 列指定 → 設定の既定列 の順で分類列を決める
pub fn resolve_column(column: Option<String>, config: &Config) -> Result<String> {
    column
        .or_else(|| config.default_column.clone())
        .ok_or(TaggerError::MissingColumn)
}

/// 分類の実行結果
#[derive(Debug)]
pub struct ClassifyOutcome {
    pub rows: usize,
    pub written: Vec<PathBuf>,
    pub summary: TagSummary,
}

/// 1ファイル分の分類を実行して出力する
pub fn run_classify(
    input: &Path,
    column: &str,
    store: DictionaryStore,
    output: &Path,
    format: ExportFormat,
    config: &Config,
) -> Result<ClassifyOutcome> {
    let table = read_input(input)?;
    let name = input.display().to_string();

    let mut session = Session::with_store(store);
    session.load_table(&name, table)?;
    session.select_column(column)?;
    let summary = session.summary()?;
    let result = session.classify()?;

    let written = export::export_table(result, format, output, config.output_stem())?;

    Ok(ClassifyOutcome {
        rows: result.len(),
        written,
        summary,
    })
}

/// 集計を表示用の行にする
pub fn summary_lines(summary: &TagSummary) -> Vec<String> {
    let mut lines = Vec::with_capacity(summary.per_label.len() + 2);
    lines.push(format!(
        "分類済み: {}/{}行",
        summary.tagged_rows, summary.total_rows
    ));
    for (label, count) in &summary.per_label {
        lines.push(format!("  {}: {}", label, count));
    }
    lines.push(format!(
        "  (該当なし): {}",
        summary.total_rows - summary.tagged_rows
    ));
    lines
}

/// 辞書を表示用の行にする
pub fn dictionary_lines(store: &DictionaryStore) -> Vec<String> {
    store
        .iter()
        .map(|(label, keywords)| {
            let text = keywords.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
            if text.is_empty() {
                format!("{}: (キーワードなし)", label)
            } else {
                format!("{}: {}", label, text)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule() {
        assert_eq!(
            parse_rule(" scarcity =Only 3 left, almost gone").unwrap(),
            ("scarcity".to_string(), "Only 3 left, almost gone".to_string())
        );
        assert_eq!(parse_rule("empty=").unwrap(), ("empty".to_string(), String::new()));
        assert!(matches!(parse_rule("no-equals"), Err(TaggerError::InvalidRule(_))));
        assert!(matches!(parse_rule("=kw"), Err(TaggerError::InvalidRule(_))));
    }

    #[test]
    fn test_build_store_order_of_operations() {
        let args = DictionaryArgs {
            dictionary: None,
            edits: vec!["urgency_marketing=Rush, rush".into()],
            additions: vec!["calm=relax".into()],
            removals: vec!["exclusive_marketing".into()],
        };
        let store = build_store(&args).unwrap();
        assert_eq!(store.labels(), vec!["urgency_marketing", "calm"]);
        assert_eq!(store.keywords_text("urgency_marketing").as_deref(), Some("rush"));
    }

    #[test]
    fn test_build_store_ignores_unknown_edit() {
        let args = DictionaryArgs {
            edits: vec!["scarcity=only 2 left".into()],
            ..Default::default()
        };
        let store = build_store(&args).unwrap();
        assert_eq!(store, DictionaryStore::with_defaults());
    }

    #[test]
    fn test_build_store_missing_dictionary_file() {
        let args = DictionaryArgs {
            dictionary: Some(PathBuf::from("/nonexistent/dict.json")),
            ..Default::default()
        };
        assert!(matches!(build_store(&args), Err(TaggerError::FileNotFound(_))));
    }

    #[test]
    fn test_resolve_column() {
        let mut config = Config::default();
        assert!(matches!(resolve_column(None, &config), Err(TaggerError::MissingColumn)));

        config.default_column = Some("body".into());
        assert_eq!(resolve_column(None, &config).unwrap(), "body");
        assert_eq!(resolve_column(Some("text".into()), &config).unwrap(), "text");
    }

    #[test]
    fn test_summary_lines() {
        let summary = TagSummary {
            total_rows: 3,
            tagged_rows: 1,
            per_label: vec![("urgency_marketing".into(), 1)],
        };
        let lines = summary_lines(&summary);
        assert_eq!(lines[0], "分類済み: 1/3行");
        assert_eq!(lines[1], "  urgency_marketing: 1");
        assert_eq!(lines[2], "  (該当なし): 2");
    }

    #[test]
    fn test_dictionary_lines_marks_empty() {
        let mut store = DictionaryStore::new();
        store.add_or_update("empty", " , ");
        store.add_or_update("a", "y, x");
        assert_eq!(dictionary_lines(&store), vec!["empty: (キーワードなし)", "a: x, y"]);
    }
}
