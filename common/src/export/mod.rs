//! 表の入出力（CSV以外の形式）

#[cfg(feature = "excel")]
pub mod excel_core;
