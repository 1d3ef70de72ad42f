//! Tactic Tagger Common Library
//!
//! CLIとデスクトップ版で共有される辞書・分類・表データ

pub mod defaults;
pub mod error;
pub mod dictionary;
pub mod classifier;
pub mod table;
pub mod loader;
pub mod batch;
pub mod session;
pub mod export;

pub use error::{Error, Result};
pub use dictionary::{parse_keywords, DictionaryStore, KeywordSet};
pub use classifier::{classify, classify_text, matching_labels};
pub use table::{Cell, ColumnType, Table};
pub use loader::load_table;
pub use batch::{summarize, tag_table, TagSummary, TAG_COLUMN};
pub use session::{Session, DOWNLOAD_FILE_NAME};
