use crate::cli::ExportFormat;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tactic_tagger_common::export::excel_core;
use tactic_tagger_common::Table;

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, stem: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let csv_path = output.join(format!("{}.csv", stem));
        let excel_path = output.join(format!("{}.xlsx", stem));
        (csv_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(stem);
        let csv_path = parent.join(format!("{}.csv", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (csv_path, excel_path)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// CSV（UTF-8、ヘッダーあり、インデックス列なし）で保存
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, table.to_csv_bytes()?)?;
    Ok(())
}

/// Excelで保存
pub fn write_excel(table: &Table, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    excel_core::write_workbook(table, path)?;
    Ok(())
}

/// 分類結果を指定形式で書き出し、書いたパスを返す
pub fn export_table(
    table: &Table,
    format: ExportFormat,
    output: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    let written = match format {
        ExportFormat::Csv => {
            let path = output_path_for_format(output, stem, "csv");
            write_csv(table, &path)?;
            vec![path]
        }
        ExportFormat::Excel => {
            let path = output_path_for_format(output, stem, "xlsx");
            write_excel(table, &path)?;
            vec![path]
        }
        ExportFormat::Both => {
            let (csv_path, excel_path) = output_paths_for_both(output, stem);
            write_csv(table, &csv_path)?;
            write_excel(table, &excel_path)?;
            vec![csv_path, excel_path]
        }
    };

    for path in &written {
        tracing::info!(path = %path.display(), "result written");
    }
    Ok(written)
}
