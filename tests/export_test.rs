//! 出力・パイプラインの統合テスト

use std::path::Path;
use tactic_tagger::cli::{DictionaryArgs, ExportFormat};
use tactic_tagger::config::Config;
use tactic_tagger::error::TaggerError;
use tactic_tagger::export::export_table;
use tactic_tagger::tagger::{build_store, read_input, run_classify};
use tactic_tagger_common::{load_table, tag_table, DictionaryStore, Session, Table};
use tempfile::tempdir;

const INPUT: &str = "id,text\n1,hurry now\n2,nothing special\n3,\"VIP, limited time\"\n";

fn write_input(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("statements.csv");
    std::fs::write(&path, INPUT).unwrap();
    path
}

#[test]
fn test_run_classify_writes_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = write_input(dir.path());
    let out_dir = dir.path().join("out");

    let outcome = run_classify(
        &input,
        "text",
        DictionaryStore::with_defaults(),
        &out_dir,
        ExportFormat::Csv,
        &Config::default(),
    )
    .unwrap();

    assert_eq!(outcome.rows, 3);
    assert_eq!(outcome.written, vec![out_dir.join("categorized_statements.csv")]);
    assert_eq!(outcome.summary.tagged_rows, 2);

    let content = std::fs::read_to_string(&outcome.written[0]).unwrap();
    assert_eq!(
        content,
        "id,text,Category\n\
         1,hurry now,urgency_marketing\n\
         2,nothing special,\n\
         3,\"VIP, limited time\",\"urgency_marketing, exclusive_marketing\"\n"
    );
}

#[test]
fn test_run_classify_keeps_source_text_of_other_columns() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("prices.csv");
    std::fs::write(
        &input,
        "text,price,code,big\nhurry now,1.0,+7,1e3\nnothing special,2.50, 42,10.10\n",
    )
    .unwrap();

    let outcome = run_classify(
        &input,
        "text",
        DictionaryStore::with_defaults(),
        dir.path(),
        ExportFormat::Csv,
        &Config::default(),
    )
    .unwrap();

    let content = std::fs::read_to_string(&outcome.written[0]).unwrap();
    assert_eq!(
        content,
        "text,price,code,big,Category\n\
         hurry now,1.0,+7,1e3,urgency_marketing\n\
         nothing special,2.50, 42,10.10,\n"
    );
}

#[test]
fn test_failed_path_upload_clears_session() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = write_input(dir.path());
    let bad = dir.path().join("bad.csv");
    std::fs::write(&bad, "a,b\n1,2,3\n").unwrap();

    let mut session = Session::new();
    session.load_path(&good).unwrap();
    session.select_column("text").unwrap();
    session.classify().unwrap();

    assert!(session.load_path(&bad).is_err());
    assert!(session.table().is_none());
    assert!(session.result().is_none());
    assert!(session.download_csv().is_err());
}

#[test]
fn test_run_classify_empty_table() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("empty.csv");
    std::fs::write(&input, "text\n").unwrap();

    let result = run_classify(
        &input,
        "text",
        DictionaryStore::with_defaults(),
        dir.path(),
        ExportFormat::Csv,
        &Config::default(),
    );
    assert!(matches!(
        result,
        Err(TaggerError::Common(tactic_tagger_common::Error::EmptyTable))
    ));
    assert!(!dir.path().join("categorized_statements.csv").exists());
}

#[test]
fn test_run_classify_unknown_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = write_input(dir.path());

    let result = run_classify(
        &input,
        "body",
        DictionaryStore::with_defaults(),
        dir.path(),
        ExportFormat::Csv,
        &Config::default(),
    );
    assert!(matches!(
        result,
        Err(TaggerError::Common(tactic_tagger_common::Error::ColumnNotFound(_)))
    ));
}

#[test]
fn test_export_both_formats() {
    let dir = tempdir().expect("Failed to create temp dir");
    let table = Table::from_csv_str(INPUT).unwrap();
    let tagged = tag_table(&table, "text", &DictionaryStore::with_defaults()).unwrap();

    let written = export_table(&tagged, ExportFormat::Both, dir.path(), "tagged").unwrap();
    assert_eq!(written.len(), 2);
    for path in &written {
        let metadata = std::fs::metadata(path).expect("ファイルメタデータ取得失敗");
        assert!(metadata.len() > 0, "出力ファイルが空: {}", path.display());
    }

    // xlsx を読み戻して同じ表になること
    let reloaded = load_table(&dir.path().join("tagged.xlsx")).unwrap();
    assert_eq!(reloaded.headers(), tagged.headers());
    assert_eq!(reloaded.len(), 3);
}

#[test]
fn test_read_input_errors() {
    let missing = read_input(Path::new("/nonexistent/statements.csv"));
    assert!(matches!(missing, Err(TaggerError::FileNotFound(_))));

    let dir = tempdir().expect("Failed to create temp dir");
    let json = dir.path().join("statements.json");
    std::fs::write(&json, "{}").unwrap();
    assert!(matches!(read_input(&json), Err(TaggerError::UnsupportedFormat(_))));

    let malformed = dir.path().join("bad.csv");
    std::fs::write(&malformed, "a,b\n1,2,3\n").unwrap();
    assert!(matches!(read_input(&malformed), Err(TaggerError::Common(_))));
}

#[test]
fn test_build_store_from_json_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dict.json");
    std::fs::write(&path, r#"{"scarcity": ["Only 2 Left"], "urgency_marketing": "rush"}"#).unwrap();

    let args = DictionaryArgs {
        dictionary: Some(path),
        additions: vec!["calm=relax".into()],
        ..Default::default()
    };
    let store = build_store(&args).unwrap();
    assert_eq!(store.labels(), vec!["scarcity", "urgency_marketing", "calm"]);
    assert!(store.get("scarcity").unwrap().contains("only 2 left"));
}
