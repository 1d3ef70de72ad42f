//! カテゴリ辞書モジュール
//!
//! カテゴリラベル → キーワード集合の対応をセッション中だけ保持する。
//! 編集・追加・削除・リセットを受け付け、不正な入力は黙って正規化する。

use crate::defaults::DEFAULT_DICTIONARIES;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// 1カテゴリ分のキーワード集合（小文字・trim済み・空要素なし）
pub type KeywordSet = BTreeSet<String>;

/// カンマ区切りのキーワード文字列を正規化して集合にする
///
/// 各要素を trim して小文字化し、空要素は捨てる。重複は集合で潰れる。
pub fn parse_keywords(raw: &str) -> KeywordSet {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// ラベル → キーワード集合の辞書
///
/// 反復順は挿入順。既存ラベルの上書きは位置を保つ。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryStore {
    entries: Vec<(String, KeywordSet)>,
}

impl DictionaryStore {
    /// 空の辞書
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込み既定辞書の独立したコピー
    pub fn with_defaults() -> Self {
        let entries = DEFAULT_DICTIONARIES
            .iter()
            .map(|(label, keywords)| {
                let set = keywords.iter().map(|k| k.to_lowercase()).collect();
                (label.to_string(), set)
            })
            .collect();
        Self { entries }
    }

    /// 辞書全体を既定値に戻す
    pub fn reset(&mut self) {
        *self = Self::with_defaults();
    }

    /// 既存ラベルのキーワードをカンマ区切り文字列で置き換える
    ///
    /// 未登録のラベルは何もせず `false` を返す。
    pub fn edit(&mut self, label: &str, raw: &str) -> bool {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, keywords)) => {
                *keywords = parse_keywords(raw);
                true
            }
            None => {
                tracing::warn!(label, "unknown category, edit ignored");
                false
            }
        }
    }

    /// 全エディタの内容をまとめて反映する（描画ごとの再適用）
    pub fn apply_edits<'a, I>(&mut self, edits: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (label, raw) in edits {
            self.edit(label, raw);
        }
    }

    /// カテゴリを追加、既存なら上書き
    ///
    /// ラベルは trim され、空なら何もせず `false` を返す。
    pub fn add_or_update(&mut self, label: &str, raw: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }

        let keywords = parse_keywords(raw);
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, existing)) => *existing = keywords,
            None => self.entries.push((label.to_string(), keywords)),
        }
        true
    }

    /// カテゴリを削除
    pub fn remove(&mut self, label: &str) -> Option<KeywordSet> {
        let index = self.entries.iter().position(|(l, _)| l == label)?;
        Some(self.entries.remove(index).1)
    }

    /// ラベルのキーワード集合
    pub fn get(&self, label: &str) -> Option<&KeywordSet> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, keywords)| keywords)
    }

    /// エディタ表示用のカンマ区切り文字列
    pub fn keywords_text(&self, label: &str) -> Option<String> {
        self.get(label).map(|keywords| {
            keywords.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        })
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// ラベル一覧（反復順）
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// (ラベル, キーワード集合) を反復順に返す
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeywordSet)> {
        self.entries.iter().map(|(l, k)| (l.as_str(), k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// 形式: `{"label": ["kw", ...]}` または `{"label": "kw, kw"}`。キー順を保つ。
    pub fn from_json(json: &str) -> Result<Self> {
        let map: Map<String, Value> = serde_json::from_str(json)?;
        let mut store = Self::new();

        for (label, value) in map {
            let raw = match value {
                Value::String(s) => s,
                Value::Array(items) => {
                    let mut phrases = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            Value::String(s) => phrases.push(s),
                            other => {
                                return Err(Error::Parse(format!(
                                    "keyword for '{}' must be a string, got {}",
                                    label, other
                                )))
                            }
                        }
                    }
                    phrases.join(",")
                }
                other => {
                    return Err(Error::Parse(format!(
                        "keywords for '{}' must be a list or a string, got {}",
                        label, other
                    )))
                }
            };
            store.add_or_update(&label, &raw);
        }

        Ok(store)
    }

    /// 表示用JSON（キー順は反復順）
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(label, keywords)| {
                let list = keywords.iter().cloned().map(Value::String).collect();
                (label.clone(), Value::Array(list))
            })
            .collect();
        Value::Object(map)
    }
}
