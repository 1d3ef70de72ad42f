//! Excel入出力（共通ライブラリ）
//!
//! 読み込みは calamine で先頭シート、書き出しは rust_xlsxwriter。

use crate::error::{Error, Result};
use crate::table::{Cell, Table};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

/// Excelの最大行数
const MAX_ROWS: usize = 1_048_576;

fn excel_error(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// ブックの先頭シートを表として読み込み（先頭行はヘッダー）
pub fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| Error::Excel(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Parse("workbook has no sheets".to_string()))?
        .map_err(|e| Error::Excel(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(Error::Parse("no columns to parse from file".to_string()));
    }

    let body = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Table::new(headers, body)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(n) => Cell::Int(*n),
        Data::Float(x) => Cell::Float(*x),
        Data::Bool(b) => Cell::Bool(*b),
        // 日付はシリアル値のまま（文字列ではないので分類対象外）
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        _ => Cell::Empty,
    }
}

/// 表からブックを生成（ヘッダー行は太字）
pub fn build_workbook(table: &Table) -> Result<Workbook> {
    if table.len() + 1 > MAX_ROWS {
        return Err(Error::Excel(format!("too many rows for a worksheet: {}", table.len())));
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, header) in table.headers().iter().enumerate() {
        let col = column_number(col)?;
        worksheet
            .write_string_with_format(0, col, header, &header_format)
            .map_err(excel_error)?;
    }

    for (row_index, row) in table.rows().iter().enumerate() {
        let r = (row_index + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let c = column_number(col)?;
            match cell {
                Cell::Text(s) => worksheet.write_string(r, c, s),
                Cell::Int(n) => worksheet.write_number(r, c, *n as f64),
                Cell::Float(x) => worksheet.write_number(r, c, *x),
                Cell::Bool(b) => worksheet.write_boolean(r, c, *b),
                Cell::Empty => continue,
            }
            .map_err(excel_error)?;
        }
    }

    Ok(workbook)
}

/// 表を .xlsx として保存
pub fn write_workbook(table: &Table, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(table)?;
    workbook.save(path).map_err(excel_error)?;
    Ok(())
}

/// 表を .xlsx のバイト列にする
pub fn to_xlsx_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table)?;
    workbook.save_to_buffer().map_err(excel_error)
}

fn column_number(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| Error::Excel(format!("too many columns: {}", index + 1)))
}
