//! 分類モジュール
//!
//! 文を小文字化し、各カテゴリのキーワードが部分文字列として
//! 含まれるかを辞書の反復順に判定する。副作用なし。

use crate::dictionary::DictionaryStore;
use crate::table::Cell;

/// 結果ラベルの区切り
pub const LABEL_SEPARATOR: &str = ", ";

/// 一致したラベルを辞書の反復順で返す
pub fn matching_labels<'a>(text: &str, store: &'a DictionaryStore) -> Vec<&'a str> {
    let lowered = text.to_lowercase();
    store
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k.as_str())))
        .map(|(label, _)| label)
        .collect()
}

/// 一致したラベルを ", " で連結（一致なしは空文字列）
pub fn classify_text(text: &str, store: &DictionaryStore) -> String {
    matching_labels(text, store).join(LABEL_SEPARATOR)
}

/// セルを分類する。文字列以外のセルは常に空文字列。
pub fn classify(cell: &Cell, store: &DictionaryStore) -> String {
    match cell.as_text() {
        Some(text) => classify_text(text, store),
        None => String::new(),
    }
}
