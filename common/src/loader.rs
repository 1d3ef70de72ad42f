//! ファイル読み込み
//!
//! 拡張子で形式を判定して `Table` にする。

use crate::error::{Error, Result};
use crate::table::Table;
use std::path::Path;

/// 読み込み可能な形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    #[cfg(feature = "excel")]
    Workbook,
}

impl InputFormat {
    /// 拡張子から判定（不明なら None）
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(InputFormat::Csv),
            #[cfg(feature = "excel")]
            "xlsx" | "xlsm" | "xls" | "ods" => Some(InputFormat::Workbook),
            _ => None,
        }
    }
}

/// ファイルを表として読み込む
pub fn load_table(path: &Path) -> Result<Table> {
    let format = InputFormat::from_path(path)
        .ok_or_else(|| Error::Parse(format!("unsupported file type: {}", path.display())))?;

    tracing::debug!(path = %path.display(), ?format, "loading table");
    match format {
        InputFormat::Csv => Table::from_csv_path(path),
        #[cfg(feature = "excel")]
        InputFormat::Workbook => crate::export::excel_core::read_workbook(path),
    }
}
