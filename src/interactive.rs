//! 対話式セッションモジュール
//!
//! 辞書の編集・ファイルの読み込み・列の選択・分類・保存をメニューから繰り返す。
//! 各操作のエラーはその操作だけを中断し、セッションは続ける。

use crate::config::Config;
use crate::error::{Result, TaggerError};
use crate::export;
use crate::tagger::{dictionary_lines, read_input, summary_lines};
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};
use tactic_tagger_common::{Session, Table, TAG_COLUMN};

/// プレビュー表示する行数
const PREVIEW_ROWS: usize = 10;

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShowCategories,
    EditCategory,
    AddCategory,
    RemoveCategory,
    ResetCategories,
    LoadFile,
    SelectColumn,
    Classify,
    Save,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 10] = [
        MenuAction::ShowCategories,
        MenuAction::EditCategory,
        MenuAction::AddCategory,
        MenuAction::RemoveCategory,
        MenuAction::ResetCategories,
        MenuAction::LoadFile,
        MenuAction::SelectColumn,
        MenuAction::Classify,
        MenuAction::Save,
        MenuAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::ShowCategories => "カテゴリ一覧",
            MenuAction::EditCategory => "カテゴリのキーワードを編集",
            MenuAction::AddCategory => "カテゴリを追加",
            MenuAction::RemoveCategory => "カテゴリを削除",
            MenuAction::ResetCategories => "既定の辞書に戻す",
            MenuAction::LoadFile => "ファイルを読み込む",
            MenuAction::SelectColumn => "分類する列を選ぶ",
            MenuAction::Classify => "分類を実行",
            MenuAction::Save => "結果を保存",
            MenuAction::Quit => "終了",
        }
    }
}

/// 現在の状態を1行で表す
pub fn status_line(session: &Session) -> String {
    let file = session.source_name().unwrap_or("-");
    let rows = session.table().map(|t| t.len()).unwrap_or(0);
    let column = session.selected_column().unwrap_or("-");
    let done = if session.result().is_some() { "済" } else { "未" };
    format!(
        "カテゴリ: {} | ファイル: {} ({}行) | 列: {} | 分類: {}",
        session.store().len(),
        file,
        rows,
        column,
        done
    )
}

/// 分類結果の先頭行を表示用にする（分類列と Category のみ）
pub fn preview_lines(table: &Table, column: &str, limit: usize) -> Vec<String> {
    let (Some(text_idx), Some(tag_idx)) =
        (table.column_index(column), table.column_index(TAG_COLUMN))
    else {
        return Vec::new();
    };

    table
        .rows()
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, row)| {
            let tag = row[tag_idx].to_string();
            let tag = if tag.is_empty() { "-".to_string() } else { tag };
            format!("{:>4}  {}  →  {}", i + 1, truncate(&row[text_idx].to_string(), 60), tag)
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

/// 対話式セッションを実行
pub fn run_interactive_session(
    session: &mut Session,
    input: Option<&Path>,
    config: &Config,
) -> Result<()> {
    if let Some(path) = input {
        report(load_file(session, path, config));
    }

    let items: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        println!("\n{}", status_line(session));
        let index = Select::new()
            .with_prompt("操作")
            .items(&items)
            .default(0)
            .interact()?;

        let action = MenuAction::ALL[index];
        let outcome = match action {
            MenuAction::ShowCategories => {
                show_categories(session);
                Ok(())
            }
            MenuAction::EditCategory => edit_category(session),
            MenuAction::AddCategory => add_category(session),
            MenuAction::RemoveCategory => remove_category(session),
            MenuAction::ResetCategories => reset_categories(session),
            MenuAction::LoadFile => prompt_load_file(session, config),
            MenuAction::SelectColumn => select_column(session),
            MenuAction::Classify => classify(session),
            MenuAction::Save => save_result(session, config),
            MenuAction::Quit => break,
        };

        // 入力端末の異常はセッション自体を終了する
        if let Err(TaggerError::Dialog(_)) = outcome {
            return outcome;
        }
        report(outcome);
    }

    println!("終了します");
    Ok(())
}

fn report(outcome: Result<()>) {
    if let Err(e) = outcome {
        println!("✗ {}", e);
    }
}

fn show_categories(session: &Session) {
    if session.store().is_empty() {
        println!("カテゴリがありません");
        return;
    }
    for line in dictionary_lines(session.store()) {
        println!("  {}", line);
    }
}

/// カテゴリを選ぶ（なければ None）
fn pick_category(session: &Session, prompt: &str) -> Result<Option<String>> {
    let labels = session.store().labels();
    if labels.is_empty() {
        println!("カテゴリがありません");
        return Ok(None);
    }
    let index = Select::new().with_prompt(prompt).items(&labels).default(0).interact()?;
    Ok(Some(labels[index].to_string()))
}

fn edit_category(session: &mut Session) -> Result<()> {
    let Some(label) = pick_category(session, "編集するカテゴリ")? else {
        return Ok(());
    };
    let current = session.store().keywords_text(&label).unwrap_or_default();

    let raw: String = Input::new()
        .with_prompt("キーワード（カンマ区切り）")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;

    session.store_mut().edit(&label, &raw);
    println!("✔ {} を更新しました", label);
    Ok(())
}

fn add_category(session: &mut Session) -> Result<()> {
    let label: String = Input::new()
        .with_prompt("新しいカテゴリ名")
        .allow_empty(true)
        .interact_text()?;
    if label.trim().is_empty() {
        println!("カテゴリ名が空のため追加しません");
        return Ok(());
    }

    let raw: String = Input::new()
        .with_prompt("キーワード（カンマ区切り）")
        .allow_empty(true)
        .interact_text()?;

    session.store_mut().add_or_update(&label, &raw);
    println!("✔ {} を追加しました", label.trim());
    Ok(())
}

fn remove_category(session: &mut Session) -> Result<()> {
    let Some(label) = pick_category(session, "削除するカテゴリ")? else {
        return Ok(());
    };
    session.store_mut().remove(&label);
    println!("✔ {} を削除しました", label);
    Ok(())
}

fn reset_categories(session: &mut Session) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt("すべてのカテゴリを既定値に戻しますか？")
        .default(false)
        .interact()?;
    if confirmed {
        session.reset_dictionaries();
        println!("✔ 既定の辞書に戻しました");
    }
    Ok(())
}

fn prompt_load_file(session: &mut Session, config: &Config) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("ファイルのパス（CSV / Excel）")
        .interact_text()?;
    load_file(session, Path::new(path.trim()), config)
}

fn load_file(session: &mut Session, path: &Path, config: &Config) -> Result<()> {
    let table = match read_input(path) {
        Ok(table) => table,
        Err(e) => {
            session.clear_table();
            return Err(e);
        }
    };
    let name = path.display().to_string();
    let rows = session.load_table(&name, table)?.len();
    println!("✔ {}行を読み込みました: {}", rows, name);

    if session.selected_column().is_none() {
        if let Some(column) = config.default_column.as_deref() {
            if session.select_column(column).is_ok() {
                println!("  列: {}", column);
            }
        }
    }
    Ok(())
}

fn select_column(session: &mut Session) -> Result<()> {
    let columns: Vec<String> = session.columns().into_iter().map(String::from).collect();
    if columns.is_empty() {
        println!("先にファイルを読み込んでください");
        return Ok(());
    }

    let default = session
        .selected_column()
        .and_then(|c| columns.iter().position(|x| x == c))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt("分類する列")
        .items(&columns)
        .default(default)
        .interact()?;

    session.select_column(&columns[index])?;
    Ok(())
}

fn classify(session: &mut Session) -> Result<()> {
    let summary = session.summary()?;
    let column = session
        .selected_column()
        .map(String::from)
        .unwrap_or_default();
    let result = session.classify()?;

    for line in preview_lines(result, &column, PREVIEW_ROWS) {
        println!("{}", line);
    }
    if result.len() > PREVIEW_ROWS {
        println!("  … 他 {}行", result.len() - PREVIEW_ROWS);
    }
    for line in summary_lines(&summary) {
        println!("{}", line);
    }
    Ok(())
}

fn save_result(session: &Session, config: &Config) -> Result<()> {
    let bytes = session.download_csv()?;
    let path: String = Input::new()
        .with_prompt("保存先")
        .with_initial_text(config.output_file_name.clone())
        .interact_text()?;
    let path = PathBuf::from(path.trim());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, bytes)?;
    println!("✔ 保存しました: {}", path.display());
    Ok(())
}
