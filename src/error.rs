use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式: {0}")]
    UnsupportedFormat(String),

    #[error("カテゴリ指定が不正です（label=kw1,kw2 の形式で指定してください）: {0}")]
    InvalidRule(String),

    #[error("分類する列が指定されていません。`--column` で指定するか `tactic-tagger config --set-default-column NAME` で設定してください")]
    MissingColumn,

    #[error("入力エラー: {0}")]
    Dialog(String),

    #[error(transparent)]
    Common(#[from] tactic_tagger_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for TaggerError {
    fn from(e: dialoguer::Error) -> Self {
        TaggerError::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaggerError>;
