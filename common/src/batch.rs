//! 一括分類モジュール
//!
//! 選択列の全行に分類を適用し、結果を `Category` 列として付加する。
//! 行順と他の列は変更しない。

use crate::classifier::{classify, matching_labels};
use crate::dictionary::DictionaryStore;
use crate::error::Result;
use crate::table::{Cell, Table};
use serde::Serialize;

/// 付加する列名
pub const TAG_COLUMN: &str = "Category";

/// 分類結果の集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    /// 全行数
    pub total_rows: usize,
    /// 1つ以上のカテゴリに一致した行数
    pub tagged_rows: usize,
    /// カテゴリごとの一致行数（辞書の反復順）
    pub per_label: Vec<(String, usize)>,
}

/// 表の指定列を分類し、`Category` 列を付けた新しい表を返す
pub fn tag_table(table: &Table, column: &str, store: &DictionaryStore) -> Result<Table> {
    let tags: Vec<Cell> = table
        .column(column)?
        .map(|cell| Cell::Text(classify(cell, store)))
        .collect();

    let mut tagged = table.clone();
    tagged.set_column(TAG_COLUMN, tags)?;

    tracing::info!(rows = tagged.len(), column, "table classified");
    Ok(tagged)
}

/// 指定列の値を辞書で集計する
pub fn summarize(table: &Table, column: &str, store: &DictionaryStore) -> Result<TagSummary> {
    let mut per_label: Vec<(String, usize)> =
        store.labels().into_iter().map(|l| (l.to_string(), 0)).collect();
    let mut summary = TagSummary::default();

    for cell in table.column(column)? {
        summary.total_rows += 1;
        let Some(text) = cell.as_text() else {
            continue;
        };
        let labels = matching_labels(text, store);
        if labels.is_empty() {
            continue;
        }
        summary.tagged_rows += 1;
        for label in labels {
            if let Some((_, count)) = per_label.iter_mut().find(|(l, _)| l == label) {
                *count += 1;
            }
        }
    }

    summary.per_label = per_label;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_tag_table_defaults() {
        let table = Table::from_csv_str("id,text\n1,hurry now\n2,nothing special\n").unwrap();
        let store = DictionaryStore::with_defaults();
        let tagged = tag_table(&table, "text", &store).unwrap();

        assert_eq!(tagged.headers(), &["id", "text", "Category"]);
        let tags: Vec<String> = tagged.column(TAG_COLUMN).unwrap().map(|c| c.to_string()).collect();
        assert_eq!(tags, vec!["urgency_marketing", ""]);

        assert_eq!(tagged.rows()[0][0], Cell::Int(1));
        assert_eq!(tagged.rows()[1][1], Cell::Text("nothing special".into()));
        // 元の表は変更されない
        assert_eq!(table.headers().len(), 2);
    }

    #[test]
    fn test_tag_table_numeric_column() {
        let table = Table::from_csv_str("n\n42\n7\n").unwrap();
        let tagged = tag_table(&table, "n", &DictionaryStore::with_defaults()).unwrap();
        let tags: Vec<String> = tagged.column(TAG_COLUMN).unwrap().map(|c| c.to_string()).collect();
        assert_eq!(tags, vec!["", ""]);
    }

    #[test]
    fn test_tag_table_unknown_column() {
        let table = Table::from_csv_str("text\nhurry\n").unwrap();
        let result = tag_table(&table, "body", &DictionaryStore::with_defaults());
        assert!(matches!(result, Err(Error::ColumnNotFound(c)) if c == "body"));
    }

    #[test]
    fn test_summarize() {
        let table = Table::from_csv_str("id,text\n1,hurry now\n2,VIP hurry\n3,nothing\n4,\n").unwrap();
        let summary = summarize(&table, "text", &DictionaryStore::with_defaults()).unwrap();
        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.tagged_rows, 2);
        assert_eq!(
            summary.per_label,
            vec![
                ("urgency_marketing".to_string(), 2),
                ("exclusive_marketing".to_string(), 1),
            ]
        );
    }
}
