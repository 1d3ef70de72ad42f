//! セッションモジュール
//!
//! 1ユーザー分の状態（辞書・読み込んだ表・選択列・分類結果）をまとめて保持する。
//! グローバル状態は持たず、操作はすべてこのオブジェクト経由で行う。

use crate::batch::{summarize, tag_table, TagSummary};
use crate::dictionary::DictionaryStore;
use crate::error::{Error, Result};
use crate::loader;
use crate::table::Table;
use std::path::Path;

/// ダウンロード時の固定ファイル名
pub const DOWNLOAD_FILE_NAME: &str = "categorized_statements.csv";

#[derive(Debug, Clone)]
pub struct Session {
    store: DictionaryStore,
    table: Option<Table>,
    source_name: Option<String>,
    selected_column: Option<String>,
    result: Option<Table>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// 既定辞書で新しいセッションを開始
    pub fn new() -> Self {
        Self::with_store(DictionaryStore::with_defaults())
    }

    pub fn with_store(store: DictionaryStore) -> Self {
        Self {
            store,
            table: None,
            source_name: None,
            selected_column: None,
            result: None,
        }
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DictionaryStore {
        &mut self.store
    }

    /// 辞書を既定値に戻す
    pub fn reset_dictionaries(&mut self) {
        self.store.reset();
    }

    /// CSVのバイト列を読み込む
    pub fn load_csv(&mut self, name: &str, bytes: &[u8]) -> Result<&Table> {
        match Table::from_csv_reader(bytes) {
            Ok(table) => self.load_table(name, table),
            Err(e) => {
                self.clear_table();
                Err(e)
            }
        }
    }

    /// ファイルを読み込む。失敗したら前の表と結果は破棄される。
    pub fn load_path(&mut self, path: &Path) -> Result<&Table> {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload")
            .to_string();
        match loader::load_table(path) {
            Ok(table) => self.load_table(&name, table),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "upload failed");
                self.clear_table();
                Err(e)
            }
        }
    }

    /// 読み込み済みの表をセットする。0行なら `EmptyTable` で中断。
    pub fn load_table(&mut self, name: &str, table: Table) -> Result<&Table> {
        if table.is_empty() {
            tracing::warn!(name, "uploaded table has no rows");
            self.clear_table();
            return Err(Error::EmptyTable);
        }

        let keep_selection = self
            .selected_column
            .as_deref()
            .is_some_and(|c| table.column_index(c).is_some());
        if !keep_selection {
            self.selected_column = None;
        }

        self.result = None;
        self.source_name = Some(name.to_string());
        tracing::info!(name, rows = table.len(), "table loaded");
        Ok(self.table.insert(table))
    }

    /// 表・ファイル名・分類結果を破棄する（辞書と選択列は残す）
    pub fn clear_table(&mut self) {
        self.table = None;
        self.source_name = None;
        self.result = None;
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// 選択可能な列名
    pub fn columns(&self) -> Vec<&str> {
        self.table
            .as_ref()
            .map(|t| t.headers().iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// 分類対象の列を選ぶ
    pub fn select_column(&mut self, column: &str) -> Result<()> {
        let table = self.table.as_ref().ok_or(Error::NoTable)?;
        if table.column_index(column).is_none() {
            return Err(Error::ColumnNotFound(column.to_string()));
        }
        if self.selected_column.as_deref() != Some(column) {
            self.result = None;
        }
        self.selected_column = Some(column.to_string());
        Ok(())
    }

    pub fn selected_column(&self) -> Option<&str> {
        self.selected_column.as_deref()
    }

    /// 現在の辞書で選択列を分類し、結果を保持して返す
    pub fn classify(&mut self) -> Result<&Table> {
        let table = self.table.as_ref().ok_or(Error::NoTable)?;
        let column = self.selected_column.as_deref().ok_or(Error::NoColumnSelected)?;
        let tagged = tag_table(table, column, &self.store)?;
        Ok(self.result.insert(tagged))
    }

    pub fn result(&self) -> Option<&Table> {
        self.result.as_ref()
    }

    /// 選択列の集計
    pub fn summary(&self) -> Result<TagSummary> {
        let table = self.table.as_ref().ok_or(Error::NoTable)?;
        let column = self.selected_column.as_deref().ok_or(Error::NoColumnSelected)?;
        summarize(table, column, &self.store)
    }

    /// 分類結果をCSV（UTF-8）で返す
    pub fn download_csv(&self) -> Result<Vec<u8>> {
        let result = self.result.as_ref().ok_or(Error::NoTable)?;
        result.to_csv_bytes()
    }
}
