use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use tactic_tagger_common::Table;

pub fn load_table_file(path: &Path) -> Result<Table> {
    tactic_tagger_common::load_table(path).with_context(|| format!("load {}", path.display()))
}

pub fn save_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
