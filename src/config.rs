use crate::error::{TaggerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tactic_tagger_common::DOWNLOAD_FILE_NAME;

/// ツール設定（辞書は保存しない）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 出力ファイル名
    pub output_file_name: String,
    /// `--column` 省略時に使う列名
    pub default_column: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file_name: DOWNLOAD_FILE_NAME.into(),
            default_column: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TaggerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("tactic-tagger").join("config.json"))
    }

    pub fn set_output_name(&mut self, name: String) -> Result<()> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(TaggerError::Config("出力ファイル名が空です".into()));
        }
        self.output_file_name = name;
        self.save()
    }

    pub fn set_default_column(&mut self, column: Option<String>) -> Result<()> {
        self.default_column = column.filter(|c| !c.trim().is_empty());
        self.save()
    }

    /// 出力ファイル名の拡張子を除いた部分
    pub fn output_stem(&self) -> &str {
        std::path::Path::new(&self.output_file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("categorized_statements")
    }
}
