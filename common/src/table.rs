//! 表データモジュール
//!
//! アップロードされたCSVを列名付きの表として保持する。
//! 列の型はデータフレームの読み込みと同じく列単位で推定する
//! （整数 → 浮動小数 → 真偽値 → 文字列の順）。空セルはどの型でも `Empty`。

use crate::error::{Error, Result};
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

/// 表の1セル
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    /// 文字列セルなら中身を返す
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Cell::Empty => Ok(()),
        }
    }
}

/// 推定された列の型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int => write!(f, "int"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Bool => write!(f, "bool"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// ヘッダー付きの表
///
/// CSVから読んだ数値・真偽値セルは元の文字列も `source` に残し、
/// 書き出しではそれをそのまま使う（`1.0` や ` 42` を書き換えない）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    source: Vec<Vec<Option<String>>>,
}

impl Table {
    /// ヘッダーと行から組み立てる。短い行は `Empty` で埋める。
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Result<Self> {
        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() > headers.len() {
                return Err(Error::Parse(format!(
                    "row {} has {} fields, expected {}",
                    i + 1,
                    row.len(),
                    headers.len()
                )));
            }
            row.resize(headers.len(), Cell::Empty);
        }
        let source = rows.iter().map(|row| vec![None; row.len()]).collect();
        Ok(Self {
            headers,
            rows,
            source,
        })
    }

    /// CSVファイルから読み込み
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes())
    }

    /// CSVリーダーから読み込み（先頭行はヘッダー）
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
                h.to_string()
            })
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(Error::Parse("no columns to parse from file".to_string()));
        }

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(Error::Parse(format!(
                    "row {} has {} fields, expected {}",
                    i + 1,
                    record.len(),
                    headers.len()
                )));
            }
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            raw_rows.push(row);
        }

        let column_types: Vec<ColumnType> = (0..headers.len())
            .map(|col| infer_column_type(raw_rows.iter().map(|row| row[col].as_str())))
            .collect();

        let mut rows = Vec::with_capacity(raw_rows.len());
        let mut source = Vec::with_capacity(raw_rows.len());
        for raw_row in raw_rows {
            let (row, raw): (Vec<Cell>, Vec<Option<String>>) = raw_row
                .into_iter()
                .zip(&column_types)
                .map(|(raw, ty)| parse_cell(raw, *ty))
                .unzip();
            rows.push(row);
            source.push(raw);
        }

        tracing::debug!(columns = headers.len(), "csv parsed");
        Ok(Self {
            headers,
            rows,
            source,
        })
    }

    /// CSVとして書き出し（ヘッダーあり、インデックス列なし）
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for (row, raw) in self.rows.iter().zip(&self.source) {
            let fields = row.iter().zip(raw).map(|(cell, raw)| match raw {
                Some(text) => text.clone(),
                None => cell.to_string(),
            });
            writer.write_record(fields)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// CSVバイト列（UTF-8）
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名から列番号（重複時は先頭）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 列の値を行順に返す
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Cell> + '_> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        Ok(self.rows.iter().map(move |row| &row[index]))
    }

    /// 列の型（空セルを除いて判定、全て空なら Float 扱い）
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        let index = self.column_index(name)?;
        let ty = self
            .rows
            .iter()
            .find_map(|row| match &row[index] {
                Cell::Text(_) => Some(ColumnType::Text),
                Cell::Int(_) => Some(ColumnType::Int),
                Cell::Float(_) => Some(ColumnType::Float),
                Cell::Bool(_) => Some(ColumnType::Bool),
                Cell::Empty => None,
            })
            .unwrap_or(ColumnType::Float);
        Some(ty)
    }

    /// 列を末尾に追加する。同名の列があればその場で置き換える。
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(Error::Parse(format!(
                "column '{}' has {} values, table has {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }

        match self.column_index(name) {
            Some(index) => {
                for ((row, raw), value) in self.rows.iter_mut().zip(&mut self.source).zip(values) {
                    row[index] = value;
                    raw[index] = None;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for ((row, raw), value) in self.rows.iter_mut().zip(&mut self.source).zip(values) {
                    row.push(value);
                    raw.push(None);
                }
            }
        }
        Ok(())
    }
}

/// 列の生文字列から型を推定する
fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: Iterator<Item = &'a str>,
{
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;

    for value in values.filter(|v| !v.is_empty()) {
        let v = value.trim();
        all_int &= v.parse::<i64>().is_ok();
        all_float &= parse_float(v).is_some();
        all_bool &= parse_bool(v).is_some();
        if !all_int && !all_float && !all_bool {
            return ColumnType::Text;
        }
    }

    if all_int {
        ColumnType::Int
    } else if all_float {
        ColumnType::Float
    } else if all_bool {
        ColumnType::Bool
    } else {
        ColumnType::Text
    }
}

/// 生文字列をセルに変換する。文字列以外になったときは元の文字列も返す。
fn parse_cell(raw: String, ty: ColumnType) -> (Cell, Option<String>) {
    if raw.is_empty() {
        return (Cell::Empty, None);
    }
    let v = raw.trim();
    let cell = match ty {
        ColumnType::Int => v.parse().ok().map(Cell::Int),
        ColumnType::Float => parse_float(v).map(Cell::Float),
        ColumnType::Bool => parse_bool(v).map(Cell::Bool),
        ColumnType::Text => None,
    };
    match cell {
        Some(cell) => (cell, Some(raw)),
        None => (Cell::Text(raw), None),
    }
}

/// "inf" や "nan" のような語は文字列として扱う
fn parse_float(v: &str) -> Option<f64> {
    if !v.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    v.parse().ok()
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
